//! Structured logging setup
//!
//! Logging goes through the `tracing` ecosystem and is written to stderr so
//! that stdout stays reserved for the final status line of a run.
//!
//! # Example
//!
//! ```no_run
//! use readmegen::util::logging;
//!
//! logging::init_from_env();
//!
//! tracing::info!(root = "/tmp/project", "Scanning project");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// HTTP crates that are pinned to `warn` unless `RUST_LOG` says otherwise
const QUIET_CRATES: &[&str] = &["h2", "hyper", "hyper_util", "reqwest"];

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for the `readmegen` target
    pub level: Level,

    /// Emit JSON lines instead of human-readable output
    pub use_json: bool,

    /// Include the module target (e.g. `readmegen::scan`)
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Default configuration at the given level
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations, for log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }

    /// Debug level with compact console output
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

/// Parses a log level from a string, falling back to `INFO`
///
/// ```
/// use readmegen::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("nonsense"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn directive(spec: &str) -> Option<Directive> {
    spec.parse().ok()
}

/// Builds the filter used by [`init_logging`]
///
/// When `RUST_LOG` is set its directives are used as-is. Otherwise the crate
/// logs at the configured level and the HTTP stack is pinned to `warn`.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    if env::var("RUST_LOG").is_err() {
        if let Some(own) = directive(&format!("readmegen={}", config.level)) {
            filter = filter.add_directive(own);
        }
        for name in QUIET_CRATES {
            if let Some(quiet) = directive(&format!("{}=warn", name)) {
                filter = filter.add_directive(quiet);
            }
        }
    }

    filter
}

/// Initializes the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(&config);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Initializes logging with [`LoggingConfig::default`]
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from `READMEGEN_LOG_LEVEL` and `READMEGEN_LOG_JSON`
pub fn init_from_env() {
    let level_str = env::var("READMEGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let use_json = env::var("READMEGEN_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    });
}
