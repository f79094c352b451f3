//! Linking
//!
//! The second wiring pass registers every child command into its parent's
//! dispatcher. It runs post-order: an index node is composed into its
//! parent only after all of its own children were composed into it, so the
//! help a grandparent embeds for that branch is complete.

use clap::Command;

use crate::command::describe;
use crate::dispatch::DispatchMechanism;
use crate::error::AssemblyError;
use crate::tree::{CommandPath, IndexNode, Node};

/// Descriptions longer than this are truncated in parent help listings.
pub const SUMMARY_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = " ...";

/// Shortens a description for display in a parent's command list.
///
/// Descriptions of at most [`SUMMARY_MAX_CHARS`] characters pass through;
/// longer ones keep their first `SUMMARY_MAX_CHARS - 4` characters followed
/// by `" ..."`.
#[must_use]
pub fn short_summary(description: Option<&str>) -> Option<String> {
    let description = description?;
    if description.chars().count() <= SUMMARY_MAX_CHARS {
        return Some(description.to_string());
    }
    let mut summary: String = description
        .chars()
        .take(SUMMARY_MAX_CHARS - ELLIPSIS.len())
        .collect();
    summary.push_str(ELLIPSIS);
    Some(summary)
}

/// Full invocation name of `child` under the index node at `parent`.
#[must_use]
pub fn invocation_name(prog: &str, parent: &CommandPath, child: &str) -> String {
    let mut words = Vec::with_capacity(parent.len() + 2);
    words.push(prog);
    words.extend(parent.segments().iter().map(String::as_str));
    words.push(child);
    words.join(" ")
}

/// A fully linked child command waiting to be registered into its parent.
#[derive(Debug, Clone)]
pub struct LinkedChild {
    pub name: String,
    /// Position among its declared siblings.
    pub position: usize,
    pub command: Command,
}

/// Links a tree whose dispatchers were allocated, returning the root command.
///
/// # Errors
///
/// Fails on duplicate subcommand names or on an index node with children
/// that never received a dispatcher.
pub fn link(root: IndexNode, prog: &str) -> Result<Command, AssemblyError> {
    link_index(root, &CommandPath::root(), prog)
}

fn link_index(node: IndexNode, path: &CommandPath, prog: &str) -> Result<Command, AssemblyError> {
    let IndexNode {
        spec,
        dispatch,
        children,
        ..
    } = node;
    let command = spec.into_command();

    let Some(dispatch) = dispatch else {
        if children.is_empty() {
            return Ok(command);
        }
        return Err(AssemblyError::Unallocated {
            command: path.clone(),
        });
    };

    let mut linked = Vec::with_capacity(children.len());
    for (position, child) in children.into_iter().enumerate() {
        let name = child.name().to_string();
        let command = match child {
            Node::Terminal(leaf) => leaf.spec.into_command(),
            Node::Index(sub) => link_index(sub, &path.join(name.as_str()), prog)?,
        };
        linked.push(LinkedChild {
            name,
            position,
            command,
        });
    }

    register(command, &dispatch, path, prog, linked)
}

/// Registers linked children into `parent`'s dispatcher.
///
/// Display order follows each child's declared position, placed after any
/// subcommands the author registered, so the order of registration here does
/// not show in the generated help.
///
/// # Errors
///
/// Returns [`AssemblyError::DuplicateCommand`] if a name is already taken.
pub fn register(
    mut parent: Command,
    dispatch: &DispatchMechanism,
    parent_path: &CommandPath,
    prog: &str,
    children: impl IntoIterator<Item = LinkedChild>,
) -> Result<Command, AssemblyError> {
    let offset = dispatch.preexisting().len();
    for child in children {
        if parent.find_subcommand(&child.name).is_some() {
            return Err(AssemblyError::DuplicateCommand {
                parent: parent_path.clone(),
                name: child.name,
            });
        }
        let invocation = invocation_name(prog, parent_path, &child.name);
        tracing::trace!(parent = %parent_path, child = %child.name, %invocation, "linking");
        parent = parent.subcommand(import(
            child.command,
            &child.name,
            invocation,
            offset + child.position,
        ));
    }
    Ok(parent)
}

/// Composes a child command under a new name.
///
/// Arguments travel with the command itself and are not declared again. The
/// engine generates exactly one help flag per command when it builds, so the
/// child never ends up with a second one. When the summary truncates the
/// description, the full text stays available as the long help.
fn import(command: Command, name: &str, invocation: String, order: usize) -> Command {
    let description = describe(&command);
    let summary = short_summary(description.as_deref());

    let mut command = command
        .name(name.to_string())
        .bin_name(invocation)
        .display_order(order);

    if let (Some(summary), Some(description)) = (summary, description) {
        if summary != description && command.get_long_about().is_none() {
            command = command.long_about(description);
        }
        command = command.about(summary);
    }
    command
}
