//! Manifest validation
//!
//! Rejects declarations the argument engine would refuse to build, so a bad
//! manifest is reported and skipped instead of aborting the whole tree.

use std::collections::HashSet;

use crate::error::ManifestError;
use crate::manifest::schema::{ArgKind, Manifest};

/// Names the engine reserves for its generated help.
const RESERVED_NAME: &str = "help";
const RESERVED_SHORT: char = 'h';

/// Validates a manifest and all of its subcommands.
///
/// # Errors
///
/// Returns the first problem found, with its location inside the manifest.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    validate_at(manifest, "")
}

fn invalid(location: String, message: impl Into<String>) -> ManifestError {
    ManifestError::Invalid {
        location,
        message: message.into(),
    }
}

fn validate_at(manifest: &Manifest, prefix: &str) -> Result<(), ManifestError> {
    let mut names = HashSet::new();
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();
    let mut optional_positional = false;
    let mut variadic_positional = false;

    for (i, arg) in manifest.args.iter().enumerate() {
        let at = |field: &str| format!("{prefix}args[{i}].{field}");

        if arg.name.trim().is_empty() {
            return Err(invalid(at("name"), "must not be empty"));
        }
        if arg.name == RESERVED_NAME {
            return Err(invalid(at("name"), "'help' is reserved"));
        }
        if !names.insert(arg.name.as_str()) {
            return Err(invalid(at("name"), format!("duplicate argument '{}'", arg.name)));
        }

        if let Some(short) = arg.short {
            if short == RESERVED_SHORT {
                return Err(invalid(at("short"), "'-h' is reserved"));
            }
            if !shorts.insert(short) {
                return Err(invalid(at("short"), format!("duplicate short flag '-{short}'")));
            }
        }
        if let Some(long) = &arg.long {
            if long.is_empty() || long.starts_with('-') {
                return Err(invalid(at("long"), "must be a bare name like 'verbose'"));
            }
            if long == RESERVED_NAME {
                return Err(invalid(at("long"), "'--help' is reserved"));
            }
            if !longs.insert(long.as_str()) {
                return Err(invalid(at("long"), format!("duplicate long flag '--{long}'")));
            }
        }

        if matches!(arg.kind, ArgKind::Flag | ArgKind::Count) {
            if arg.is_positional() {
                return Err(invalid(at("type"), "flags and counters need 'short' or 'long'"));
            }
            if arg.default.is_some() {
                return Err(invalid(at("default"), "not allowed on flags and counters"));
            }
            if arg.multiple {
                return Err(invalid(at("multiple"), "not allowed on flags and counters"));
            }
        }

        if !arg.choices.is_empty() {
            if arg.kind != ArgKind::String {
                return Err(invalid(at("choices"), "only allowed on string arguments"));
            }
            if let Some(default) = &arg.default {
                let default = default.to_string();
                if !arg.choices.contains(&default) {
                    return Err(invalid(
                        at("default"),
                        format!("'{default}' is not one of the choices"),
                    ));
                }
            }
        }

        if let Some(default) = &arg.default {
            let text = default.to_string();
            let parses = match arg.kind {
                ArgKind::Integer => text.parse::<i64>().is_ok(),
                ArgKind::Float => text.parse::<f64>().is_ok(),
                ArgKind::String | ArgKind::Flag | ArgKind::Count => true,
            };
            if !parses {
                return Err(invalid(
                    at("default"),
                    format!("'{text}' is not a valid {}", arg.kind),
                ));
            }
        }

        if arg.is_positional() {
            if variadic_positional {
                return Err(invalid(
                    at("multiple"),
                    "only the last positional may take multiple values",
                ));
            }
            if arg.is_required() && optional_positional {
                return Err(invalid(
                    at("required"),
                    "required positional follows an optional one",
                ));
            }
            optional_positional |= !arg.is_required();
            variadic_positional |= arg.multiple;
        }
    }

    let mut subcommands = HashSet::new();
    for (j, sub) in manifest.subcommands.iter().enumerate() {
        let location = format!("{prefix}subcommands[{j}]");
        let name = sub.name.as_deref().unwrap_or_default();
        if name.trim().is_empty() {
            return Err(invalid(format!("{location}.name"), "must not be empty"));
        }
        if name == RESERVED_NAME {
            return Err(invalid(format!("{location}.name"), "'help' is reserved"));
        }
        if !subcommands.insert(name) {
            return Err(invalid(
                format!("{location}.name"),
                format!("duplicate subcommand '{name}'"),
            ));
        }
        validate_at(sub, &format!("{location}."))?;
    }

    Ok(())
}
