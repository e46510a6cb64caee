//! Configuration loading and management

use std::time::Duration;

use anyhow::{Context, Result};

/// Assistant timing configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Delay before retrying recognition after a runtime error
    pub retry_delay: Duration,

    /// How long a processed transcript stays visible before being cleared
    pub transcript_clear_delay: Duration,

    /// Delay between a page announcement request and the spoken welcome
    pub announce_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(1),
            transcript_clear_delay: Duration::from_secs(3),
            announce_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Load configuration from environment overrides and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(ms) = env_millis("ASSISTANT_RETRY_DELAY_MS")? {
            config.retry_delay = ms;
        }
        if let Some(ms) = env_millis("ASSISTANT_TRANSCRIPT_CLEAR_MS")? {
            config.transcript_clear_delay = ms;
        }
        if let Some(ms) = env_millis("ASSISTANT_ANNOUNCE_DELAY_MS")? {
            config.announce_delay = ms;
        }

        Ok(config)
    }
}

/// Read an optional millisecond duration from the environment
fn env_millis(var: &str) -> Result<Option<Duration>> {
    match std::env::var(var) {
        Ok(value) => {
            let ms: u64 = value
                .parse()
                .with_context(|| format!("{var} must be an integer millisecond count"))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(_) => Ok(None),
    }
}
