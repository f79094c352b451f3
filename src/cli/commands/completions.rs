//! Shell completion generation
//!
//! Generates completion scripts for `cmdtree` itself, or for the dispatcher
//! assembled from a command directory when `--root` is given.

use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use crate::assemble::Assembler;
use crate::cli::args::{Cli, CompletionsArgs, Shell};
use crate::error::CmdTreeError;

/// Generate and print a shell completion script to stdout.
///
/// # Errors
///
/// Returns an error if the dispatcher cannot be assembled.
pub fn run(args: &CompletionsArgs) -> Result<(), CmdTreeError> {
    let shell = match args.shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    let (mut cmd, bin_name) = match &args.root {
        Some(root) => {
            let options = args.namespace.assembly_options(root);
            let prog = options.program_name();
            let namespace = args.namespace.namespace(root);
            (Assembler::new(options).assemble(&namespace)?, prog)
        }
        None => (Cli::command(), "cmdtree".to_string()),
    };

    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    Ok(())
}
