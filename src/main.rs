//! `cmdtree` - assemble nested command dispatchers from command directories

use clap::Parser;

use cmdtree::cli::args::Cli;
use cmdtree::cli::commands;
use cmdtree::error::{CmdTreeError, ExitCode};
use cmdtree::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(CmdTreeError::Usage(err)) => {
            let _ = err.print();
            std::process::exit(ExitCode::USAGE_ERROR);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
