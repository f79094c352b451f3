//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod run;
pub mod tree;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::CmdTreeError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), CmdTreeError> {
    match cli.command {
        Commands::Run(args) => run::run(&args, cli.color),
        Commands::Tree(args) => tree::run(&args),
        Commands::Completions(args) => completions::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
