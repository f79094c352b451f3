//! In-memory namespace built from registration calls.
//!
//! Lets a program declare its command tree at compile time:
//!
//! ```
//! use clap::{Arg, Command};
//! use cmdtree::namespace::Registry;
//!
//! let registry = Registry::new()
//!     .command("math/add", Command::new("add").arg(Arg::new("x")).arg(Arg::new("y")))
//!     .command("negate", Command::new("negate").arg(Arg::new("x")));
//! ```

use crate::command::{CommandSpec, ResolveSpec};
use crate::error::NamespaceError;
use crate::namespace::{Namespace, NamespaceEntry};
use crate::tree::CommandPath;

/// Payload of a registered module.
#[derive(Debug, Clone)]
pub enum Registration {
    /// The module declares a command spec.
    Spec(CommandSpec),
    /// The module exists but declares no spec.
    Empty,
}

impl ResolveSpec for Registration {
    fn resolve_spec(&self) -> Option<CommandSpec> {
        match self {
            Self::Spec(spec) => Some(spec.clone()),
            Self::Empty => None,
        }
    }
}

/// Namespace whose entries are registered by the program itself.
///
/// Entries are walked in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<NamespaceEntry<Registration>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command at a `/`-separated path.
    #[must_use]
    pub fn command(mut self, path: &str, spec: impl Into<CommandSpec>) -> Self {
        self.entries.push(NamespaceEntry::file(
            CommandPath::parse(path),
            Registration::Spec(spec.into()),
        ));
        self
    }

    /// Registers an explicit directory level.
    #[must_use]
    pub fn directory(mut self, path: &str) -> Self {
        self.entries
            .push(NamespaceEntry::directory(CommandPath::parse(path)));
        self
    }

    /// Registers a module that declares no command.
    #[must_use]
    pub fn module(mut self, path: &str) -> Self {
        self.entries.push(NamespaceEntry::file(
            CommandPath::parse(path),
            Registration::Empty,
        ));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Namespace for Registry {
    type Payload = Registration;

    fn walk(&self) -> Result<Vec<NamespaceEntry<Registration>>, NamespaceError> {
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::EntryKind;
    use clap::Command;

    #[test]
    fn walk_preserves_registration_order() {
        let registry = Registry::new()
            .command("negate", Command::new("negate"))
            .directory("math")
            .command("math/add", Command::new("add"));

        let paths: Vec<String> = registry
            .walk()
            .unwrap()
            .iter()
            .map(|e| e.path.to_string())
            .collect();
        assert_eq!(paths, ["negate", "math", "math/add"]);
    }

    #[test]
    fn module_without_spec_resolves_to_none() {
        let registry = Registry::new().module("helpers");
        let entries = registry.walk().unwrap();
        match &entries[0].kind {
            EntryKind::File(payload) => assert!(payload.resolve_spec().is_none()),
            EntryKind::Directory => panic!("expected file entry"),
        }
    }

    #[test]
    fn empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.walk().unwrap().is_empty());
    }
}
