use anyhow::{Context, Result};
use std::time::Duration;

use crate::constants::{NWS_API_BASE, USER_AGENT};

/// Runtime settings for the server, resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the NWS API, without a trailing slash.
    pub api_base: String,
    /// Identifying `User-Agent` sent with every request.
    pub user_agent: String,
    /// Optional bound on each upstream request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Loads `NWS_API_BASE`, `NWS_USER_AGENT` and `NWS_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base) = non_blank(lookup("NWS_API_BASE")) {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(agent) = non_blank(lookup("NWS_USER_AGENT")) {
            config.user_agent = agent;
        }

        if let Some(raw) = non_blank(lookup("NWS_TIMEOUT_SECS")) {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("NWS_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"))?;
            if secs == 0 {
                anyhow::bail!("NWS_TIMEOUT_SECS must be greater than zero");
            }
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
