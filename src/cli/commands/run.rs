//! `cmdtree run`
//!
//! Assembles the dispatcher from a command directory and parses the trailing
//! arguments with it, printing the resulting [`Invocation`].

use crate::assemble::Assembler;
use crate::cli::args::{ColorChoice, OutputFormat, RunArgs};
use crate::error::CmdTreeError;
use crate::invocation::Invocation;

/// Assemble, parse, and print the invocation.
///
/// Help and version requests of the assembled dispatcher are printed and
/// count as success.
///
/// # Errors
///
/// Returns [`CmdTreeError::Usage`] when the dispatcher rejects the
/// arguments, or an assembly error if the directory cannot be assembled.
pub fn run(args: &RunArgs, color: ColorChoice) -> Result<(), CmdTreeError> {
    let options = args.namespace.assembly_options(&args.root);
    let prog = options.program_name();
    let namespace = args.namespace.namespace(&args.root);

    let command = Assembler::new(options)
        .assemble(&namespace)?
        .color(color.into());

    let argv = std::iter::once(prog).chain(args.args.iter().cloned());
    let matches = match command.clone().try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let invocation = Invocation::from_matches(&command, &matches);
    tracing::debug!(command = ?invocation.command, "parsed invocation");

    match args.format {
        OutputFormat::Human => print!("{invocation}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&invocation)?),
    }
    Ok(())
}
