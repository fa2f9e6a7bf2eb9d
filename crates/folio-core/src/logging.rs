//! Tracing subscriber setup
//!
//! Libraries in this workspace only emit `tracing` events; binaries call
//! [`init`] once. The filter comes from `RUST_LOG`, falling back to `info`.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Build the env filter, using `fallback` when `RUST_LOG` is unusable
#[must_use]
pub fn filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber, writing to stderr
///
/// Returns `false` if a subscriber was already installed.
pub fn init(format: LogFormat) -> bool {
    init_with_filter(format, filter(DEFAULT_FILTER))
}

/// Install the global subscriber with an explicit filter
pub fn init_with_filter(format: LogFormat, filter: EnvFilter) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    if installed {
        tracing::debug!("Logging initialised ({:?})", format);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_refused() {
        init(LogFormat::Text);
        assert!(!init(LogFormat::Json));
    }
}
