//! Assembly entry points
//!
//! Runs the whole pipeline over one namespace: walk, build the tree,
//! allocate dispatchers, link post-order, and hand back the root command.

use clap::Command;

use crate::dispatch::{allocate, link::link};
use crate::error::Result;
use crate::namespace::Namespace;
use crate::tree::IndexNode;
use crate::tree::builder::TreeBuilder;

pub use crate::tree::builder::DEFAULT_INDEX_MARKER;

// ============================================================================
// Options
// ============================================================================

/// Assembly configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Program name shown in usage; the invoked binary's name when `None`.
    pub prog: Option<String>,

    /// Entry name holding a directory level's own spec.
    pub index_marker: String,

    /// Sort siblings by name rather than keeping the walker's order.
    pub sort_siblings: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            prog: None,
            index_marker: DEFAULT_INDEX_MARKER.to_string(),
            sort_siblings: false,
        }
    }
}

impl AssemblyOptions {
    /// The program name the assembled dispatcher presents itself under.
    #[must_use]
    pub fn program_name(&self) -> String {
        self.prog.clone().unwrap_or_else(invoked_name)
    }
}

/// Basename of the running executable, or the package name if unavailable.
#[must_use]
pub fn invoked_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| basename(&arg0))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Last component of `arg0`, extension included.
fn basename(arg0: &std::ffi::OsStr) -> Option<String> {
    std::path::Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

// ============================================================================
// Assembler
// ============================================================================

/// Builds fully linked dispatchers from namespaces.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssemblyOptions,
}

impl Assembler {
    #[must_use]
    pub const fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Walks the namespace, builds the tree, and allocates dispatchers.
    ///
    /// The returned tree is ready for linking; it is also what `cmdtree tree`
    /// displays.
    ///
    /// # Errors
    ///
    /// Fails if the walker fails, if two entries collide, or if an
    /// author-supplied dispatcher cannot be located.
    pub fn prepare<N: Namespace>(&self, namespace: &N) -> Result<IndexNode> {
        let entries = namespace.walk()?;
        let mut root = TreeBuilder::new(self.options.index_marker.as_str())
            .sort_siblings(self.options.sort_siblings)
            .build(entries)?;
        allocate(&mut root)?;
        Ok(root)
    }

    /// Links a prepared tree and returns its root command.
    ///
    /// # Errors
    ///
    /// Fails on duplicate subcommand names.
    pub fn resolve(&self, root: IndexNode) -> Result<Command> {
        let prog = self.options.program_name();
        let nodes = root.post_order().len();
        let command = resolve_root(link(root, &prog)?, &prog);

        tracing::info!(
            prog = %prog,
            nodes,
            subcommands = command.get_subcommands().count(),
            "assembled dispatcher"
        );
        Ok(command)
    }

    /// Assembles a namespace into one dispatcher.
    ///
    /// # Errors
    ///
    /// See [`Assembler::prepare`] and [`Assembler::resolve`]. No partial
    /// dispatcher is returned on failure.
    pub fn assemble<N: Namespace>(&self, namespace: &N) -> Result<Command> {
        let root = self.prepare(namespace)?;
        self.resolve(root)
    }
}

/// Presents the linked root command under the program's name.
#[must_use]
pub fn resolve_root(root: Command, prog: &str) -> Command {
    root.name(prog.to_string()).bin_name(prog.to_string())
}

/// Assembles a namespace with default options.
///
/// # Errors
///
/// See [`Assembler::assemble`].
pub fn assemble<N: Namespace>(namespace: &N) -> Result<Command> {
    Assembler::with_defaults().assemble(namespace)
}
