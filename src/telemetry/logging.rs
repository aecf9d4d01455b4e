//! Logging initialization.
//!
//! The RUST_LOG environment variable takes priority; otherwise the `[log]`
//! config section picks the level and the output format (pretty, compact,
//! json).

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log settings from the `[log]` config section.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format: pretty, compact, json
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Initializes the logging system. Safe to call more than once; later calls
/// leave the installed subscriber in place.
pub fn init_logging(config: Option<&LogConfig>) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => {
            let level = config.map_or(Level::INFO, |c| parse_level(&c.level));
            EnvFilter::new(level.as_str())
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.map_or("pretty", |c| c.format.as_str()) {
        "json" => {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init();
        }
        "compact" => {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().compact())
                .try_init();
        }
        _ => {
            let _ = registry.with(tracing_subscriber::fmt::layer()).try_init();
        }
    }
}

/// Parses a log level string into a Level; unknown strings fall back to
/// info.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}
