//! Command tree data model
//!
//! A namespace is reassembled into a strict hierarchy of [`IndexNode`]s (one
//! per namespace level) and [`TerminalNode`]s (leaf commands). The tree is
//! built once by [`builder::TreeBuilder`], given dispatch mechanisms by
//! [`crate::dispatch::allocate`], and consumed by the linker.

pub mod builder;

use std::fmt;

use serde::Serialize;

use crate::command::CommandSpec;
use crate::dispatch::{DispatchMechanism, DispatchOrigin};
use crate::dispatch::link::short_summary;

pub use builder::TreeBuilder;

/// Name given to the root index node before the program name is known.
pub const ROOT_NAME: &str = "__root__";

// ============================================================================
// CommandPath
// ============================================================================

/// Ordered namespace segments locating a node. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// The root path.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Parses a `/`-separated path, ignoring empty segments.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// The segments from the root downwards.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path one level up, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, rest)| Self(rest.to_vec()))
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for CommandPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join("/"))
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Where an index node's command spec came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecOrigin {
    /// Blank spec created because the namespace level supplied none.
    Synthesized,
    /// Spec supplied by the level's index marker entry.
    Declared,
}

/// A leaf command. Never owns children and never gains a dispatch mechanism.
#[derive(Debug, Clone)]
pub struct TerminalNode {
    pub name: String,
    pub spec: CommandSpec,
}

/// One namespace level, optionally invocable itself and routing to children.
#[derive(Debug, Clone)]
pub struct IndexNode {
    pub name: String,
    pub spec: CommandSpec,
    pub origin: SpecOrigin,
    /// Absent until [`crate::dispatch::allocate`] decides one is needed.
    pub dispatch: Option<DispatchMechanism>,
    pub children: Vec<Node>,
}

/// A tree node.
#[derive(Debug, Clone)]
pub enum Node {
    Index(IndexNode),
    Terminal(TerminalNode),
}

/// Borrowed view of a node, yielded by traversals.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Index(&'a IndexNode),
    Terminal(&'a TerminalNode),
}

impl IndexNode {
    /// Creates an index node with a blank spec.
    #[must_use]
    pub fn synthesized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            spec: CommandSpec::blank(&name),
            name,
            origin: SpecOrigin::Synthesized,
            dispatch: None,
            children: Vec::new(),
        }
    }

    /// Replaces the blank spec with one declared by the namespace.
    pub fn declare(&mut self, spec: CommandSpec) {
        self.spec = spec;
        self.origin = SpecOrigin::Declared;
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Looks up a descendant by path relative to this node.
    #[must_use]
    pub fn find(&self, path: &CommandPath) -> Option<NodeRef<'_>> {
        let mut current = NodeRef::Index(self);
        for segment in path.segments() {
            let NodeRef::Index(index) = current else {
                return None;
            };
            current = index.child(segment)?.as_ref();
        }
        Some(current)
    }

    /// Every node below and including this one in post-order, paired with
    /// the path of its parent (the ancestor chain). The receiver is last and
    /// carries the root path.
    #[must_use]
    pub fn post_order(&self) -> Vec<(NodeRef<'_>, CommandPath)> {
        let mut out = Vec::new();
        collect_post_order(self, &CommandPath::root(), &mut out);
        out.push((NodeRef::Index(self), CommandPath::root()));
        out
    }

    /// Index nodes only, in post-order, each with its own path.
    #[must_use]
    pub fn indexes(&self) -> Vec<(&IndexNode, CommandPath)> {
        self.post_order()
            .into_iter()
            .filter_map(|(node, parent)| match node {
                NodeRef::Index(index) => {
                    let own = if std::ptr::eq(index, self) {
                        CommandPath::root()
                    } else {
                        parent.join(index.name.as_str())
                    };
                    Some((index, own))
                }
                NodeRef::Terminal(_) => None,
            })
            .collect()
    }
}

fn collect_post_order<'a>(
    index: &'a IndexNode,
    path: &CommandPath,
    out: &mut Vec<(NodeRef<'a>, CommandPath)>,
) {
    for child in &index.children {
        if let Node::Index(sub) = child {
            collect_post_order(sub, &path.join(sub.name.as_str()), out);
        }
        out.push((child.as_ref(), path.clone()));
    }
}

impl Node {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Index(node) => &node.name,
            Self::Terminal(node) => &node.name,
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &CommandSpec {
        match self {
            Self::Index(node) => &node.spec,
            Self::Terminal(node) => &node.spec,
        }
    }

    #[must_use]
    pub const fn as_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Index(node) => NodeRef::Index(node),
            Self::Terminal(node) => NodeRef::Terminal(node),
        }
    }
}

impl NodeRef<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Index(node) => &node.name,
            Self::Terminal(node) => &node.name,
        }
    }
}

// ============================================================================
// Serializable view
// ============================================================================

/// Node kind as rendered by [`TreeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Index,
    Terminal,
}

/// Read-only snapshot of a tree, for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeView {
    pub name: String,
    pub path: CommandPath,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<SpecOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchOrigin>,
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeView>,
}

impl TreeView {
    /// Snapshots `root` and everything below it.
    #[must_use]
    pub fn of(root: &IndexNode) -> Self {
        Self::of_index(root, CommandPath::root())
    }

    fn of_index(node: &IndexNode, path: CommandPath) -> Self {
        let children = node
            .children
            .iter()
            .map(|child| match child {
                Node::Index(sub) => Self::of_index(sub, path.join(sub.name.as_str())),
                Node::Terminal(leaf) => Self {
                    name: leaf.name.clone(),
                    path: path.join(leaf.name.as_str()),
                    kind: NodeKind::Terminal,
                    origin: None,
                    dispatch: None,
                    summary: short_summary(child.spec().description().as_deref()),
                    children: Vec::new(),
                },
            })
            .collect();

        Self {
            name: node.name.clone(),
            path,
            kind: NodeKind::Index,
            origin: Some(node.origin),
            dispatch: node.dispatch.as_ref().map(DispatchMechanism::origin),
            summary: short_summary(node.spec.description().as_deref()),
            children,
        }
    }

    /// Renders an indented outline, one node per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        use std::fmt::Write as _;

        let mut label = self.name.clone();
        if self.kind == NodeKind::Index && depth > 0 {
            label.push('/');
        }
        let _ = write!(out, "{}{label}", "  ".repeat(depth));
        if self.origin == Some(SpecOrigin::Synthesized) {
            out.push_str(" [synthesized]");
        }
        if let Some(summary) = &self.summary {
            let _ = write!(out, "  {summary}");
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
