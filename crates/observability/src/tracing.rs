//! Tracing/logging initialization.
//!
//! `RUST_LOG` selects the filter (default `info`); `TALLYBOOK_LOG_FORMAT`
//! selects `json` (default) or `pretty` output.

use core::str::FromStr;

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "TALLYBOOK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => bail!("unknown log format '{other}' (expected json or pretty)"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives; `None` means `info`.
    pub filter: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let format = match var(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?,
            None => LogFormat::default(),
        };
        Ok(Self {
            format,
            filter: var(EnvFilter::DEFAULT_ENV),
        })
    }

    fn env_filter(&self) -> EnvFilter {
        self.filter
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). A bad
/// configuration falls back to the defaults and is reported once the
/// subscriber is up.
pub fn init() {
    let (config, problem) = match ObservabilityConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (ObservabilityConfig::default(), Some(err)),
    };
    init_with(&config);
    if let Some(err) = problem {
        let error = format!("{err:#}");
        ::tracing::warn!(%error, "using default logging configuration");
    }
}

/// Initialize tracing/logging with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
