//! Error types for `cmdtree`
//!
//! Assembly is a one-shot transformation: any error below aborts it and no
//! partial dispatcher is handed back to the caller.

use std::path::PathBuf;
use thiserror::Error;

use crate::tree::CommandPath;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for the `cmdtree` binary.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// The command tree could not be assembled
    pub const ASSEMBLY_ERROR: i32 = 2;

    /// I/O error (namespace unreadable, file not found)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (the assembled dispatcher rejected the arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cmdtree` operations.
#[derive(Debug, Error)]
pub enum CmdTreeError {
    /// Tree construction or wiring failed
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// The namespace walker failed
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    /// The assembled dispatcher rejected an argument list
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CmdTreeError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Assembly(_) => ExitCode::ASSEMBLY_ERROR,
            Self::Namespace(_) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Assembly Errors
// ============================================================================

/// Failures of the tree-assembly algorithm itself.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// A command reports a dispatch mechanism but none could be located.
    ///
    /// Continuing would register a second mechanism on the same command, so
    /// this is treated as an internal consistency failure.
    #[error("command '{command}' reports a subcommand dispatcher but none is registered")]
    DispatchNotFound {
        /// Path of the index node whose command is inconsistent
        command: CommandPath,
    },

    /// An index node with children reached linking without a dispatcher.
    #[error("command '{command}' has subcommands but no dispatcher was allocated")]
    Unallocated {
        /// Path of the index node
        command: CommandPath,
    },

    /// Two subcommands with the same name would be registered on one parent.
    #[error("duplicate subcommand '{name}' under '{parent}'")]
    DuplicateCommand {
        /// Path of the parent index node
        parent: CommandPath,
        /// The clashing subcommand name
        name: String,
    },

    /// The namespace yielded two entries that map to the same tree position.
    #[error("duplicate namespace entry at '{path}'")]
    DuplicateEntry {
        /// Path of the second entry
        path: CommandPath,
    },

    /// A file entry was yielded with a path that cannot name a command.
    #[error("invalid command path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: CommandPath,
        /// Why the path was rejected
        reason: &'static str,
    },
}

// ============================================================================
// Namespace Errors
// ============================================================================

/// Errors raised while walking a namespace.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// The namespace root is not a directory
    #[error("namespace root is not a directory: {path}")]
    NotADirectory {
        /// Path given as the root
        path: PathBuf,
    },

    /// Directory traversal failed
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Path being walked when the failure happened
        path: PathBuf,
        /// Underlying traversal error
        source: walkdir::Error,
    },

    /// An entry name is not valid UTF-8 and cannot become a command name
    #[error("entry name is not valid UTF-8: {path}")]
    InvalidName {
        /// Path of the offending entry
        path: PathBuf,
    },

    /// A file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Manifest Errors
// ============================================================================

/// Errors from parsing or validating a command manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML parsing failed
    #[error("parse error: {message}")]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// The manifest parsed but declares something invalid
    #[error("invalid manifest at {location}: {message}")]
    Invalid {
        /// Location inside the manifest (e.g. "args[1].short")
        location: String,
        /// Description of the problem
        message: String,
    },
}

impl From<serde_yaml::Error> for ManifestError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            line: err.location().map(|l| l.line()),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `cmdtree` operations.
pub type Result<T> = std::result::Result<T, CmdTreeError>;

// ============================================================================
// Tests
// ============================================================================
