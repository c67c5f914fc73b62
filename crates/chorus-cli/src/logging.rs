//! Tracing subscriber setup

use chorus_core::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Layer `--verbose` over the configured logging settings
fn effective(config: &LoggingConfig, verbose: bool) -> LoggingConfig {
    let mut effective = config.clone();
    if verbose {
        effective.merge(LoggingConfig {
            level: "debug".to_string(),
            format: String::new(),
        });
    }
    effective
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level; `--verbose` forces `debug`.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let config = effective(config, verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_level_and_keeps_format() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: "json".to_string(),
        };

        let verbose = effective(&config, true);
        assert_eq!(verbose.level, "debug");
        assert_eq!(verbose.format, "json");

        assert_eq!(effective(&config, false), config);
    }
}
