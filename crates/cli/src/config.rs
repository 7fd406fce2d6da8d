//! Environment-driven client configuration.
//!
//! [`ClientConfig::from_env`] reads the `HYBRID_*` variables; tests go
//! through [`ClientConfig::from_lookup`] with an in-memory map.

use hybrid_client::reconnect::{ExponentialBackoff, NoReconnect, ReconnectConfig, ReconnectPolicy};

/// Default backend host for local development.
const DEFAULT_HOST: &str = "localhost:8000";

/// Default number of reconnect attempts under the backoff policy.
const DEFAULT_RECONNECT_MAX_ATTEMPTS: u32 = 5;

/// What to do when the socket drops mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectMode {
    /// Give up; the user starts over.
    None,
    /// Retry with exponential backoff.
    Backoff,
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend `host[:port]` (default: `localhost:8000`).
    pub host: String,
    /// Use `wss`/`https` instead of `ws`/`http` (default: `false`).
    pub secure: bool,
    /// Open the dashboard in the system browser on completion (default: `false`).
    pub open_browser: bool,
    /// Reconnect strategy (default: [`ReconnectMode::None`]).
    pub reconnect: ReconnectMode,
    /// Attempts before the backoff policy gives up (default: `5`).
    pub reconnect_max_attempts: u32,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default          |
    /// |---------------------------------|------------------|
    /// | `HYBRID_HOST`                   | `localhost:8000` |
    /// | `HYBRID_SECURE`                 | `false`          |
    /// | `HYBRID_OPEN_BROWSER`           | `false`          |
    /// | `HYBRID_RECONNECT`              | `none`           |
    /// | `HYBRID_RECONNECT_MAX_ATTEMPTS` | `5`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HYBRID_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let secure = parse_flag("HYBRID_SECURE", lookup("HYBRID_SECURE"))?;
        let open_browser = parse_flag("HYBRID_OPEN_BROWSER", lookup("HYBRID_OPEN_BROWSER"))?;

        let reconnect = match lookup("HYBRID_RECONNECT").as_deref().map(str::trim) {
            None | Some("") | Some("none") => ReconnectMode::None,
            Some("backoff") => ReconnectMode::Backoff,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "HYBRID_RECONNECT",
                    value: other.to_string(),
                })
            }
        };

        let reconnect_max_attempts = match lookup("HYBRID_RECONNECT_MAX_ATTEMPTS") {
            None => DEFAULT_RECONNECT_MAX_ATTEMPTS,
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "HYBRID_RECONNECT_MAX_ATTEMPTS",
                value: v,
            })?,
        };

        Ok(Self {
            host,
            secure,
            open_browser,
            reconnect,
            reconnect_max_attempts,
        })
    }

    /// Build the reconnect policy selected by this configuration.
    pub fn reconnect_policy(&self) -> Box<dyn ReconnectPolicy> {
        match self.reconnect {
            ReconnectMode::None => Box::new(NoReconnect),
            ReconnectMode::Backoff => Box::new(ExponentialBackoff::new(ReconnectConfig {
                max_attempts: self.reconnect_max_attempts,
                ..Default::default()
            })),
        }
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}
