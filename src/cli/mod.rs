//! Command-line interface of the `cmdtree` binary.

pub mod args;
pub mod commands;
