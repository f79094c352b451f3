//! CLI argument definitions
//!
//! All Clap derive structs for `cmdtree` command-line parsing.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::assemble::{AssemblyOptions, DEFAULT_INDEX_MARKER, invoked_name};
use crate::namespace::directory::{DEFAULT_EXTENSION, DEFAULT_MAX_MANIFEST_SIZE};
use crate::namespace::{DirectoryNamespace, DirectoryOptions};
use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Assemble a nested command dispatcher from a directory of command manifests.
#[derive(Parser, Debug)]
#[command(name = "cmdtree", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "CMDTREE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true, env = "CMDTREE_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a dispatcher and parse arguments with it.
    Run(RunArgs),

    /// Print the assembled command tree.
    Tree(TreeArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Namespace Arguments
// ============================================================================

/// How a command directory is read and assembled.
#[derive(Args, Debug, Clone)]
pub struct NamespaceArgs {
    /// Program name shown in usage (defaults to the root directory's name).
    #[arg(long, env = "CMDTREE_PROG")]
    pub prog: Option<String>,

    /// File stem of a directory's own command manifest.
    #[arg(long, default_value = DEFAULT_INDEX_MARKER, env = "CMDTREE_INDEX_MARKER")]
    pub index_marker: String,

    /// Extension of command manifest files.
    #[arg(long, default_value = DEFAULT_EXTENSION, env = "CMDTREE_EXTENSION")]
    pub extension: String,

    /// Manifests larger than this many bytes are skipped.
    #[arg(long, default_value_t = DEFAULT_MAX_MANIFEST_SIZE, env = "CMDTREE_MAX_MANIFEST_SIZE")]
    pub max_manifest_size: u64,

    /// Sort sibling commands by name.
    #[arg(long)]
    pub sort: bool,
}

impl NamespaceArgs {
    /// Assembly options for the directory at `root`.
    #[must_use]
    pub fn assembly_options(&self, root: &Path) -> AssemblyOptions {
        let prog = self
            .prog
            .clone()
            .or_else(|| directory_name(root))
            .unwrap_or_else(invoked_name);
        AssemblyOptions {
            prog: Some(prog),
            index_marker: self.index_marker.clone(),
            sort_siblings: self.sort,
        }
    }

    /// The namespace walker for the directory at `root`.
    #[must_use]
    pub fn namespace(&self, root: &Path) -> DirectoryNamespace {
        DirectoryNamespace::with_options(
            root,
            DirectoryOptions {
                extension: self.extension.clone(),
                max_manifest_size: self.max_manifest_size,
            },
        )
    }
}

fn directory_name(root: &Path) -> Option<String> {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

// ============================================================================
// Run / Tree
// ============================================================================

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory holding the command manifests.
    #[arg(long, env = "CMDTREE_ROOT")]
    pub root: PathBuf,

    #[command(flatten)]
    pub namespace: NamespaceArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Arguments handed to the assembled dispatcher.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for `tree`.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory holding the command manifests.
    #[arg(long, env = "CMDTREE_ROOT")]
    pub root: PathBuf,

    #[command(flatten)]
    pub namespace: NamespaceArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,

    /// Generate completions for the dispatcher assembled from this directory.
    #[arg(long, env = "CMDTREE_ROOT")]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub namespace: NamespaceArgs,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

impl From<ColorChoice> for clap::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
