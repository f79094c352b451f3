//! Declarative command manifests
//!
//! A manifest is a small YAML document describing one command's arguments.
//! It is the payload format of [`crate::namespace::DirectoryNamespace`]:
//!
//! ```yaml
//! about: Add two numbers. Compute ( x + y )
//! args:
//!   - name: x
//!     type: float
//!   - name: y
//!     type: float
//! ```

pub mod schema;
pub mod validation;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::error::ManifestError;

pub use schema::{ArgKind, ArgSpec, Manifest, ScalarValue};
pub use validation::validate;

impl Manifest {
    /// Parses a manifest.
    ///
    /// An empty document yields `Ok(None)`: the file declares no command.
    ///
    /// # Errors
    ///
    /// Returns a parse error for invalid YAML, unknown fields or values of
    /// the wrong type.
    pub fn from_yaml(source: &str) -> Result<Option<Self>, ManifestError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let value: serde_yaml::Value = serde_yaml::from_str(source)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_yaml::from_value(value)?))
    }

    /// Validates the manifest and builds the command it declares.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the declaration is inconsistent.
    pub fn into_command(self, name: &str) -> Result<Command, ManifestError> {
        validate(&self)?;
        Ok(self.build(name))
    }

    fn build(self, name: &str) -> Command {
        let mut command = Command::new(name.to_string());
        if let Some(about) = self.about {
            command = command.about(about);
        }
        if let Some(long_about) = self.long_about {
            command = command.long_about(long_about);
        }
        for arg in self.args {
            command = command.arg(arg.into_arg());
        }
        for sub in self.subcommands {
            let sub_name = sub.name.clone().unwrap_or_default();
            command = command.subcommand(sub.build(&sub_name));
        }
        command
    }
}

impl ArgSpec {
    fn into_arg(self) -> Arg {
        let positional = self.is_positional();
        let required = self.is_required();

        let mut arg = Arg::new(self.name);
        if let Some(help) = self.help {
            arg = arg.help(help);
        }
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(long) = self.long {
            arg = arg.long(long);
        }

        arg = match self.kind {
            ArgKind::Flag => return arg.action(ArgAction::SetTrue),
            ArgKind::Count => return arg.action(ArgAction::Count),
            ArgKind::String if self.choices.is_empty() => arg.value_parser(value_parser!(String)),
            ArgKind::String => arg.value_parser(PossibleValuesParser::new(self.choices)),
            ArgKind::Integer => arg.value_parser(value_parser!(i64)),
            ArgKind::Float => arg.value_parser(value_parser!(f64)),
        };

        arg = if self.multiple {
            let arg = arg.action(ArgAction::Append);
            if positional { arg.num_args(1..) } else { arg }
        } else {
            arg.action(ArgAction::Set)
        };

        if let Some(default) = self.default {
            arg = arg.default_value(default.to_string());
        }
        arg.required(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD: &str = r"
about: Add two numbers. Compute ( x + y )
args:
  - name: x
    type: float
  - name: y
    type: float
";

    #[test]
    fn parses_and_builds_positional_floats() {
        let manifest = Manifest::from_yaml(ADD).unwrap().unwrap();
        let command = manifest.into_command("add").unwrap();
        assert_eq!(command.get_name(), "add");

        let matches = command.try_get_matches_from(["add", "2", "3.5"]).unwrap();
        assert_eq!(matches.get_one::<f64>("x"), Some(&2.0));
        assert_eq!(matches.get_one::<f64>("y"), Some(&3.5));
    }

    #[test]
    fn positionals_are_required_by_default() {
        let command = Manifest::from_yaml(ADD)
            .unwrap()
            .unwrap()
            .into_command("add")
            .unwrap();
        let err = command.try_get_matches_from(["add", "2"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn empty_document_declares_nothing() {
        assert!(Manifest::from_yaml("").unwrap().is_none());
        assert!(Manifest::from_yaml("# only a comment\n").unwrap().is_none());
        assert!(Manifest::from_yaml("~").unwrap().is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Manifest::from_yaml("about: x\nhandler: run\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(Manifest::from_yaml("- a\n- b\n").is_err());
        assert!(Manifest::from_yaml("args: 3\n").is_err());
    }

    #[test]
    fn bom_is_ignored() {
        let manifest = Manifest::from_yaml("\u{feff}about: Hi\n").unwrap().unwrap();
        assert_eq!(manifest.about.as_deref(), Some("Hi"));
    }

    #[test]
    fn options_flags_and_counters() {
        let yaml = r"
args:
  - name: verbose
    short: v
    type: count
  - name: dry_run
    long: dry-run
    type: flag
  - name: mode
    long: mode
    choices: [fast, slow]
    default: fast
  - name: limit
    long: limit
    type: integer
    default: 10
";
        let command = Manifest::from_yaml(yaml)
            .unwrap()
            .unwrap()
            .into_command("job")
            .unwrap();

        let matches = command
            .clone()
            .try_get_matches_from(["job", "-vv", "--dry-run"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        assert!(matches.get_flag("dry_run"));
        assert_eq!(matches.get_one::<String>("mode").map(String::as_str), Some("fast"));
        assert_eq!(matches.get_one::<i64>("limit"), Some(&10));

        let err = command
            .try_get_matches_from(["job", "--mode", "medium"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn multiple_values_append() {
        let yaml = r"
args:
  - name: files
    multiple: true
  - name: tag
    long: tag
    multiple: true
    required: false
";
        let command = Manifest::from_yaml(yaml)
            .unwrap()
            .unwrap()
            .into_command("cat")
            .unwrap();
        let matches = command
            .try_get_matches_from(["cat", "a", "b", "--tag", "x", "--tag", "y"])
            .unwrap();
        let files: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();
        assert_eq!(files, ["a", "b"]);
        let tags: Vec<&String> = matches.get_many::<String>("tag").unwrap().collect();
        assert_eq!(tags, ["x", "y"]);
    }

    #[test]
    fn subcommands_are_prewired() {
        let yaml = r"
about: A CLI with pre-existing subcommands
args:
  - name: verbose
    short: v
    long: verbose
    type: flag
subcommands:
  - name: manual
    about: A manually defined command
    args:
      - name: value
        type: integer
";
        let command = Manifest::from_yaml(yaml)
            .unwrap()
            .unwrap()
            .into_command("_index")
            .unwrap();
        assert!(command.find_subcommand("manual").is_some());

        let matches = command
            .try_get_matches_from(["_index", "manual", "21"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "manual");
        assert_eq!(sub.get_one::<i64>("value"), Some(&21));
    }

    #[test]
    fn invalid_manifest_does_not_build() {
        let yaml = "args:\n  - name: x\n  - name: x\n";
        let manifest = Manifest::from_yaml(yaml).unwrap().unwrap();
        assert!(matches!(
            manifest.into_command("dup"),
            Err(ManifestError::Invalid { .. })
        ));
    }
}
