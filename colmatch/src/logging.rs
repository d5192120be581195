//! Logging utilities and configuration for colmatch.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary. [`setup::init_logging`] writes to stderr so that stdout can
//! carry a clean JSON document.

/// Truncates a string to at most `max_length` bytes, on a character boundary.
///
/// ```rust
/// use colmatch::logging::truncate_field;
///
/// assert_eq!(truncate_field("short", 10), "short");
/// assert_eq!(truncate_field("abcdef", 3), "abc...(truncated)");
/// ```
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        return value.to_string();
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...(truncated)", &value[..end])
}

/// Subscriber setup for binaries and tests.
pub mod setup {
    use tracing::Level;

    use crate::error::{ColmatchError, Result};

    /// Configuration for the logging subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for dependencies
        pub level: Level,
        /// Log level for colmatch itself
        pub colmatch_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::WARN,
                colmatch_level: Level::INFO,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Only warnings and errors.
        pub fn quiet() -> Self {
            Self {
                colmatch_level: Level::WARN,
                ..Self::default()
            }
        }

        /// Debug output from colmatch, info from dependencies.
        pub fn verbose() -> Self {
            Self {
                level: Level::INFO,
                colmatch_level: Level::DEBUG,
                ..Self::default()
            }
        }

        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        pub fn with_colmatch_level(mut self, level: Level) -> Self {
            self.colmatch_level = level;
            self
        }

        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},colmatch={}",
                    self.level.as_str().to_lowercase(),
                    self.colmatch_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Installs a global subscriber writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use colmatch::logging::setup::{init_logging, LoggingConfig};
    ///
    /// init_logging(LoggingConfig::verbose().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| ColmatchError::configuration(format!("failed to install logger: {e}")))
    }
}
