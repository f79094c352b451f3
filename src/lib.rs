//! `cmdtree` - nested command dispatchers from command namespaces
//!
//! Commands are authored independently, one per namespace entry, each with
//! its own argument grammar. `cmdtree` mirrors the namespace into a tree,
//! gives every level with children a subcommand dispatcher, and links the
//! levels bottom-up into one [`clap::Command`]:
//!
//! ```
//! use clap::{Arg, Command};
//! use cmdtree::{Assembler, AssemblyOptions, Registry};
//!
//! let registry = Registry::new()
//!     .command("math/add", Command::new("add").arg(Arg::new("x")).arg(Arg::new("y")))
//!     .command("negate", Command::new("negate").arg(Arg::new("x")));
//!
//! let options = AssemblyOptions { prog: Some("calc".into()), ..AssemblyOptions::default() };
//! let cli = Assembler::new(options).assemble(&registry)?;
//!
//! let matches = cli.try_get_matches_from(["calc", "math", "add", "2", "3"])?;
//! let (_, math) = matches.subcommand().unwrap();
//! let (_, add) = math.subcommand().unwrap();
//! assert_eq!(add.get_one::<String>("x").map(String::as_str), Some("2"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assemble;
pub mod cli;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod invocation;
pub mod manifest;
pub mod namespace;
pub mod observability;
pub mod tree;

pub use assemble::{Assembler, AssemblyOptions, assemble};
pub use command::{CommandSpec, ResolveSpec};
pub use error::{AssemblyError, CmdTreeError, Result};
pub use invocation::Invocation;
pub use namespace::{DirectoryNamespace, Namespace, Registry};
pub use tree::{CommandPath, IndexNode, TreeBuilder};
