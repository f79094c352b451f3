//! Structured results of a dispatched parse.
//!
//! The assembled dispatcher only parses; it runs nothing. [`Invocation`]
//! turns clap's matches into the selected command path plus the argument
//! values collected along the way, in a shape that serializes to JSON.

use std::fmt;
use std::path::PathBuf;

use clap::{ArgAction, ArgMatches, Command};
use serde::Serialize;
use serde_json::{Map, Value};

/// The command a parse selected and the values it produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Invocation {
    /// Subcommand names from the root down to the selected command.
    pub command: Vec<String>,

    /// Argument values by id, merged across levels. Where two levels declare
    /// the same id, the deeper level's value is the one kept here.
    pub args: Map<String, Value>,

    /// Argument values of each level separately: the root first, then one map
    /// per entry of `command`.
    pub levels: Vec<Map<String, Value>>,
}

impl Invocation {
    /// Collects the invocation from a parse of `command`.
    #[must_use]
    pub fn from_matches(command: &Command, matches: &ArgMatches) -> Self {
        let mut invocation = Self::default();
        let mut level = Some((command, matches));

        while let Some((command, matches)) = level {
            let mut values = Map::new();
            collect_args(command, matches, &mut values);
            invocation
                .args
                .extend(values.iter().map(|(id, value)| (id.clone(), value.clone())));
            invocation.levels.push(values);
            level = matches.subcommand().and_then(|(name, sub_matches)| {
                invocation.command.push(name.to_string());
                command
                    .find_subcommand(name)
                    .map(|sub| (sub, sub_matches))
            });
        }
        invocation
    }

    /// Argument value by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.args.get(id)
    }

    /// Argument value by id as parsed at `depth`, where 0 is the root.
    #[must_use]
    pub fn get_at(&self, depth: usize, id: &str) -> Option<&Value> {
        self.levels.get(depth)?.get(id)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.command.is_empty() {
            writeln!(f, "command: (root)")?;
        } else {
            writeln!(f, "command: {}", self.command.join(" "))?;
        }
        for (id, value) in &self.args {
            match value {
                Value::String(s) => writeln!(f, "  {id} = {s}")?,
                other => writeln!(f, "  {id} = {other}")?,
            }
        }
        Ok(())
    }
}

fn collect_args(command: &Command, matches: &ArgMatches, out: &mut Map<String, Value>) {
    for arg in command.get_arguments() {
        let id = arg.get_id().as_str();
        if matches!(
            arg.get_action(),
            ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
        ) {
            continue;
        }
        if let Some(value) = arg_value(matches, id, is_multiple(arg)) {
            out.insert(id.to_string(), value);
        }
    }
}

fn is_multiple(arg: &clap::Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg.get_num_args().is_some_and(|range| range.max_values() > 1)
}

/// Renders one argument's values, trying the value types clap commonly
/// produces before falling back to the raw strings.
fn arg_value(matches: &ArgMatches, id: &str, force_array: bool) -> Option<Value> {
    macro_rules! typed {
        ($($ty:ty => $conv:expr),+ $(,)?) => {
            $(
                if let Ok(values) = matches.try_get_many::<$ty>(id) {
                    let values: Vec<Value> = values?.map($conv).collect();
                    return Some(shape(values, force_array));
                }
            )+
        };
    }

    typed! {
        bool => |v: &bool| Value::Bool(*v),
        u8 => |v: &u8| Value::from(*v),
        i64 => |v: &i64| Value::from(*v),
        u64 => |v: &u64| Value::from(*v),
        i32 => |v: &i32| Value::from(*v),
        u32 => |v: &u32| Value::from(*v),
        usize => |v: &usize| Value::from(*v),
        f64 => |v: &f64| Value::from(*v),
        f32 => |v: &f32| Value::from(f64::from(*v)),
        String => |v: &String| Value::String(v.clone()),
        PathBuf => |v: &PathBuf| Value::String(v.display().to_string()),
    }

    let raw = matches.get_raw(id)?;
    let values = raw
        .map(|v| Value::String(v.to_string_lossy().into_owned()))
        .collect();
    Some(shape(values, force_array))
}

fn shape(mut values: Vec<Value>, force_array: bool) -> Value {
    if values.len() == 1 && !force_array {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}
