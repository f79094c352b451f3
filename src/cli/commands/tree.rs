//! `cmdtree tree`
//!
//! Prints the tree the assembler builds from a command directory, before
//! linking: node kinds, synthesized index specs, dispatcher origins and the
//! summaries parents will show.

use crate::assemble::Assembler;
use crate::cli::args::{OutputFormat, TreeArgs};
use crate::error::CmdTreeError;
use crate::tree::TreeView;

/// Assemble the tree and print it.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or the tree cannot be
/// built.
pub fn run(args: &TreeArgs) -> Result<(), CmdTreeError> {
    let options = args.namespace.assembly_options(&args.root);
    let prog = options.program_name();
    let namespace = args.namespace.namespace(&args.root);

    let root = Assembler::new(options).prepare(&namespace)?;
    let mut view = TreeView::of(&root);
    view.name = prog;

    match args.format {
        OutputFormat::Human => print!("{}", view.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}
