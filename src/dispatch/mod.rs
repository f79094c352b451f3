//! Dispatch mechanism allocation
//!
//! The first wiring pass. Every index node with children needs a subcommand
//! dispatcher on its command. If the author already configured one on the
//! command they supplied, that dispatcher is reused: the engine allows only
//! one per command.

pub mod link;

use clap::Command;
use serde::Serialize;

use crate::command::CommandSpec;
use crate::error::AssemblyError;
use crate::tree::{CommandPath, IndexNode, Node};

/// Value name shown for the subcommand slot in generated usage.
pub const DISPATCH_VALUE_NAME: &str = "command";

/// How a node's dispatch mechanism was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchOrigin {
    /// Created by the assembler.
    Created,
    /// Configured by the command's author and reused.
    Reused,
}

/// The subcommand dispatcher of one index node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchMechanism {
    origin: DispatchOrigin,
    preexisting: Vec<String>,
}

impl DispatchMechanism {
    #[must_use]
    pub const fn created() -> Self {
        Self {
            origin: DispatchOrigin::Created,
            preexisting: Vec::new(),
        }
    }

    #[must_use]
    pub const fn reused(preexisting: Vec<String>) -> Self {
        Self {
            origin: DispatchOrigin::Reused,
            preexisting,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> DispatchOrigin {
        self.origin
    }

    /// Subcommands registered by the author before assembly.
    #[must_use]
    pub fn preexisting(&self) -> &[String] {
        &self.preexisting
    }

    /// Looks for a dispatcher already configured on `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DispatchNotFound`] when the command reports
    /// subcommand routing but has no subcommand registered.
    pub fn detect(spec: &CommandSpec, path: &CommandPath) -> Result<Option<Self>, AssemblyError> {
        let command = spec.command();
        if !reports_dispatch(command) {
            return Ok(None);
        }

        let registered: Vec<String> = command
            .get_subcommands()
            .map(|sub| sub.get_name().to_string())
            .collect();
        if registered.is_empty() {
            return Err(AssemblyError::DispatchNotFound {
                command: path.clone(),
            });
        }
        Ok(Some(Self::reused(registered)))
    }
}

/// Whether a command claims to route to subcommands.
#[must_use]
pub fn reports_dispatch(command: &Command) -> bool {
    command.has_subcommands()
        || command.is_subcommand_required_set()
        || command.get_subcommand_value_name().is_some()
}

/// Gives every index node with children a dispatch mechanism, post-order.
///
/// Nodes without children are left without one: they act as plain commands.
/// Running the pass again leaves already-wired nodes untouched.
///
/// # Errors
///
/// Fails if a node's command reports a dispatcher that cannot be located.
pub fn allocate(root: &mut IndexNode) -> Result<(), AssemblyError> {
    allocate_at(root, &CommandPath::root())
}

fn allocate_at(node: &mut IndexNode, path: &CommandPath) -> Result<(), AssemblyError> {
    for child in &mut node.children {
        if let Node::Index(sub) = child {
            let sub_path = path.join(sub.name.as_str());
            allocate_at(sub, &sub_path)?;
        }
    }

    if node.children.is_empty() || node.dispatch.is_some() {
        return Ok(());
    }

    let mechanism = match DispatchMechanism::detect(&node.spec, path)? {
        Some(existing) => {
            tracing::debug!(
                path = %path,
                preexisting = existing.preexisting().len(),
                "reusing author-supplied dispatcher"
            );
            existing
        }
        None => {
            tracing::debug!(path = %path, children = node.children.len(), "creating dispatcher");
            node.spec
                .update(|command| command.subcommand_value_name(DISPATCH_VALUE_NAME));
            DispatchMechanism::created()
        }
    };
    // Children may be named `help`. The `-h`/`--help` flag stays on every level.
    node.spec.update(|command| command.disable_help_subcommand(true));
    node.dispatch = Some(mechanism);
    Ok(())
}
