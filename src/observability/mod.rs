//! Observability
//!
//! Logging setup for the `cmdtree` binary. The library itself only emits
//! `tracing` events and never installs a subscriber.

pub mod logging;

pub use logging::{LogFormat, init_logging};
