//! Logging initialization for `cmdtree`.
//!
//! Structured logging via `tracing`, rendered to stderr as human-readable
//! text or JSON. `CMDTREE_LOG_LEVEL` overrides the verbosity flags.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable holding an explicit filter directive.
pub const LOG_LEVEL_ENV: &str = "CMDTREE_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Environment variable that turns colour off under `--color auto`.
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Decides whether human log lines carry ANSI escapes.
///
/// An explicit `--color always`/`never` wins over `NO_COLOR`.
#[must_use]
pub const fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool, no_color: bool) -> bool {
    match color {
        ColorChoice::Auto => stderr_is_terminal && !no_color,
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Initializes the global tracing subscriber.
///
/// If `CMDTREE_LOG_LEVEL` is set it takes precedence over `verbosity`.
/// Uses `try_init()`, so calling this more than once is harmless.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let show_target = verbosity >= 2;

    let use_ansi = ansi_enabled(
        color,
        std::io::stderr().is_terminal(),
        std::env::var_os(NO_COLOR_ENV).is_some(),
    );

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
