//! Tree construction
//!
//! Turns a walker's flat, depth-first entry stream into a hierarchy of
//! index and terminal nodes. Each entry descends from the root along its
//! path; levels the walker never announced are synthesized with a blank
//! spec on the way down.

use crate::command::ResolveSpec;
use crate::error::AssemblyError;
use crate::namespace::{EntryKind, NamespaceEntry};
use crate::tree::{CommandPath, IndexNode, Node, ROOT_NAME, SpecOrigin, TerminalNode};

/// Default name of the entry holding a level's own command spec.
pub const DEFAULT_INDEX_MARKER: &str = "_index";

/// Builds an [`IndexNode`] tree from namespace entries.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    index_marker: String,
    sort_siblings: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_MARKER)
    }
}

impl TreeBuilder {
    #[must_use]
    pub fn new(index_marker: impl Into<String>) -> Self {
        Self {
            index_marker: index_marker.into(),
            sort_siblings: false,
        }
    }

    /// Sort siblings by name instead of keeping the walker's order.
    #[must_use]
    pub const fn sort_siblings(mut self, sort: bool) -> Self {
        self.sort_siblings = sort;
        self
    }

    /// Builds the tree rooted at a synthesized root node.
    ///
    /// File entries whose payload exposes no spec are skipped. A file named
    /// after the index marker replaces its level's blank spec.
    ///
    /// # Errors
    ///
    /// Fails when two entries land on the same position, or when a file entry
    /// has an empty path.
    pub fn build<P, I>(&self, entries: I) -> Result<IndexNode, AssemblyError>
    where
        P: ResolveSpec,
        I: IntoIterator<Item = NamespaceEntry<P>>,
    {
        let mut root = IndexNode::synthesized(ROOT_NAME);
        let mut skipped = 0_usize;
        for entry in entries {
            if !self.insert(&mut root, entry)? {
                skipped += 1;
            }
        }
        if self.sort_siblings {
            sort_recursive(&mut root);
        }

        tracing::debug!(
            nodes = root.post_order().len(),
            skipped,
            "built command tree"
        );
        Ok(root)
    }

    /// Inserts one entry, returning `false` if it contributed nothing.
    fn insert<P: ResolveSpec>(
        &self,
        root: &mut IndexNode,
        entry: NamespaceEntry<P>,
    ) -> Result<bool, AssemblyError> {
        let NamespaceEntry { path, kind } = entry;
        let payload = match kind {
            EntryKind::Directory => {
                ensure_index(root, &path)?;
                return Ok(true);
            }
            EntryKind::File(payload) => payload,
        };

        let (Some(name), Some(parent_path)) = (path.name(), path.parent()) else {
            return Err(AssemblyError::InvalidPath {
                path,
                reason: "a file entry needs a name",
            });
        };

        let Some(spec) = payload.resolve_spec() else {
            tracing::debug!(path = %path, "no command spec declared, skipping");
            return Ok(false);
        };

        let parent = ensure_index(root, &parent_path)?;
        if name == self.index_marker {
            if parent.origin == SpecOrigin::Declared {
                return Err(AssemblyError::DuplicateEntry { path });
            }
            tracing::trace!(path = %parent_path, "index spec declared");
            parent.declare(spec);
        } else {
            if parent.child(name).is_some() {
                return Err(AssemblyError::DuplicateEntry { path });
            }
            parent.children.push(Node::Terminal(TerminalNode {
                name: name.to_string(),
                spec,
            }));
        }
        Ok(true)
    }
}

/// Descends to the index node at `path`, synthesizing missing levels.
fn ensure_index<'a>(
    root: &'a mut IndexNode,
    path: &CommandPath,
) -> Result<&'a mut IndexNode, AssemblyError> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        let position = match current
            .children
            .iter()
            .position(|child| child.name() == segment)
        {
            Some(position) => position,
            None => {
                current
                    .children
                    .push(Node::Index(IndexNode::synthesized(segment.as_str())));
                current.children.len() - 1
            }
        };
        current = match &mut current.children[position] {
            Node::Index(index) => index,
            Node::Terminal(_) => {
                return Err(AssemblyError::DuplicateEntry {
                    path: path.segments()[..=depth].iter().cloned().collect(),
                });
            }
        };
    }
    Ok(current)
}

fn sort_recursive(node: &mut IndexNode) {
    node.children
        .sort_by(|a, b| a.name().cmp(b.name()));
    for child in &mut node.children {
        if let Node::Index(index) = child {
            sort_recursive(index);
        }
    }
}
