use std::env::var;
use std::str::FromStr;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "compact" | "pretty" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Initialize the subscriber with a default level.
///
/// `RUST_LOG` still overrides the level, and `RUST_LOG_FORMAT` takes
/// precedence over `format` when it is set.
pub fn init(level: LevelFilter, format: Option<LogFormat>) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let env_format = var("RUST_LOG_FORMAT").ok();
    let (format, rejected) = resolve_format(env_format.as_deref(), format);

    let log_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_filter(env_filter)
            .boxed(),
    };

    if let Err(error) = tracing_subscriber::registry().with(log_layer).try_init() {
        warn!("Tracing subscriber already installed: {error}");
    }

    if let Some(error) = rejected {
        warn!("Ignoring RUST_LOG_FORMAT, falling back to {format:?}: {error}");
    }
}

/// Pick the output format: a valid `RUST_LOG_FORMAT` wins over the configured
/// one. Returns the parse error of an invalid environment value.
fn resolve_format(env_value: Option<&str>, configured: Option<LogFormat>) -> (LogFormat, Option<String>) {
    match env_value.map(str::parse::<LogFormat>) {
        Some(Ok(format)) => (format, None),
        Some(Err(error)) => (configured.unwrap_or_default(), Some(error)),
        None => (configured.unwrap_or_default(), None),
    }
}
