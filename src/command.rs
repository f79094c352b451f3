//! Command specifications
//!
//! A [`CommandSpec`] is one command's argument grammar, backed by a
//! [`clap::Command`]. The assembler only ever asks it for a description and
//! composes it into a parent; it never looks at the arguments themselves.

use clap::{Command, CommandFactory};

/// One command's argument grammar and description.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    command: Command,
}

impl CommandSpec {
    #[must_use]
    pub const fn new(command: Command) -> Self {
        Self { command }
    }

    /// A spec with no arguments and no description.
    #[must_use]
    pub fn blank(name: &str) -> Self {
        Self::new(Command::new(name.to_string()))
    }

    /// The spec of a clap-derived type.
    #[must_use]
    pub fn of<T: CommandFactory>() -> Self {
        Self::new(T::command())
    }

    /// Sets the description.
    #[must_use]
    pub fn about(self, about: impl Into<String>) -> Self {
        Self::new(self.command.about(about.into()))
    }

    /// The human-readable description, if any.
    ///
    /// Prefers the short `about` text and falls back to `long_about`.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        describe(&self.command)
    }

    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Applies a by-value clap builder step in place.
    pub fn update(&mut self, f: impl FnOnce(Command) -> Command) {
        let command = std::mem::take(&mut self.command);
        self.command = f(command);
    }

    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }
}

impl From<Command> for CommandSpec {
    fn from(command: Command) -> Self {
        Self::new(command)
    }
}

/// Description of a bare clap command, `about` first.
#[must_use]
pub fn describe(command: &Command) -> Option<String> {
    command
        .get_about()
        .or_else(|| command.get_long_about())
        .map(ToString::to_string)
}

// ============================================================================
// Payload resolution
// ============================================================================

/// Capability of a namespace payload to expose a command spec.
///
/// Returning `None` means the payload declares no usable spec; the entry is
/// then left out of the tree. Malformed payloads resolve to `None` too.
pub trait ResolveSpec {
    fn resolve_spec(&self) -> Option<CommandSpec>;
}

impl ResolveSpec for CommandSpec {
    fn resolve_spec(&self) -> Option<CommandSpec> {
        Some(self.clone())
    }
}

impl ResolveSpec for Command {
    fn resolve_spec(&self) -> Option<CommandSpec> {
        Some(CommandSpec::new(self.clone()))
    }
}

impl<T: ResolveSpec> ResolveSpec for Option<T> {
    fn resolve_spec(&self) -> Option<CommandSpec> {
        self.as_ref().and_then(ResolveSpec::resolve_spec)
    }
}
