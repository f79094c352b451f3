//! Manifest schema
//!
//! Serde types for declarative `.cmd` manifests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declarative command: description, arguments and optional pre-wired
/// subcommands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Subcommand name. Ignored at the top level, where the file name wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Long description shown by `--help`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_about: Option<String>,

    /// Argument declarations in positional order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,

    /// Subcommands registered before the command enters the tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<Manifest>,
}

/// One argument declaration.
///
/// An argument without `short` and `long` is positional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: ArgKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,

    /// Defaults to `true` for positionals without a default, `false` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ScalarValue>,

    #[serde(default)]
    pub multiple: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ArgSpec {
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
            .unwrap_or_else(|| self.is_positional() && self.default.is_none())
    }
}

/// Value type of an argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Free-form text, optionally restricted by `choices`.
    #[default]
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean switch, `true` when present.
    Flag,
    /// Occurrence counter (`-vvv`).
    Count,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Flag => "flag",
            Self::Count => "count",
        })
    }
}

/// A scalar default value as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}
