//! Setup and initialization functions for CLI
//!
//! Logging and output formatting are configured once, before any command
//! runs.

use crate::formatting::{ColorMode, FormattingConfig};
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default log level.
pub fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the `-v` count when set.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scorepack={}", log_level(verbosity))));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        // Already installed, e.g. by an embedding application
        eprintln!("Note: logging already configured: {}", e);
    }
}

pub fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}
