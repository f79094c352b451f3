//! Namespace walkers
//!
//! A namespace is the hierarchical source of command definitions. Walkers
//! flatten it into depth-first `(path, kind)` entries; file entries carry an
//! opaque payload the tree builder resolves through [`ResolveSpec`].

pub mod directory;
pub mod registry;

use crate::command::ResolveSpec;
use crate::error::NamespaceError;
use crate::tree::CommandPath;

pub use directory::{DirectoryNamespace, DirectoryOptions, ManifestFile};
pub use registry::{Registration, Registry};

/// Kind of a namespace entry.
#[derive(Debug, Clone)]
pub enum EntryKind<P> {
    /// A level that may contain further entries.
    Directory,
    /// A leaf module and its content.
    File(P),
}

/// One entry yielded by a walker.
#[derive(Debug, Clone)]
pub struct NamespaceEntry<P> {
    pub path: CommandPath,
    pub kind: EntryKind<P>,
}

impl<P> NamespaceEntry<P> {
    #[must_use]
    pub const fn directory(path: CommandPath) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    #[must_use]
    pub const fn file(path: CommandPath, payload: P) -> Self {
        Self {
            path,
            kind: EntryKind::File(payload),
        }
    }
}

/// Enumerates a hierarchical namespace.
///
/// Entries are expected in depth-first order with siblings in a stable order.
/// A file may be yielded without its ancestor directories; the tree builder
/// synthesizes the missing levels.
pub trait Namespace {
    type Payload: ResolveSpec;

    /// Walks the namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be enumerated.
    fn walk(&self) -> Result<Vec<NamespaceEntry<Self::Payload>>, NamespaceError>;
}
