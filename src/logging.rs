//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the `[logging] level` config value.
//! Output goes to stderr so CLI results on stdout stay clean.

use crate::settings::LoggingSettings;
use tracing_subscriber::EnvFilter;

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(settings: &LoggingSettings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(&settings.level))
        .with_target(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr)
        .try_init();
}
