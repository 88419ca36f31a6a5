//! Bridge config: tracker and platform endpoints, webhook callback, tile refresh, logging.
//! Loaded from env.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::github::DEFAULT_GITHUB_API_URL;

/// Env-driven settings for the bridge process.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// GITHUB_API_URL
    pub github_api_url: String,
    /// PLATFORM_URL
    pub platform_url: String,
    /// PLATFORM_TOKEN, bearer token for outgoing platform calls
    pub platform_token: Option<String>,
    /// WEBHOOK_CALLBACK_URL, where the tracker delivers webhooks
    pub webhook_callback_url: String,
    /// TILE_REFRESH_INTERVAL_SECS
    pub tile_refresh_interval_secs: u64,
    /// RECENT_ISSUES_LIMIT
    pub recent_issues_limit: usize,
    /// LOG_FILE
    pub log_file: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} not set", name))
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl BridgeConfig {
    /// Load from environment variables. Fails if a required variable is missing.
    pub fn load() -> Result<Self> {
        let github_api_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());
        let platform_url = required("PLATFORM_URL")?;
        let platform_token = env::var("PLATFORM_TOKEN").ok().filter(|t| !t.is_empty());
        let webhook_callback_url = required("WEBHOOK_CALLBACK_URL")?;
        let tile_refresh_interval_secs = parsed_or("TILE_REFRESH_INTERVAL_SECS", 60);
        let recent_issues_limit = parsed_or("RECENT_ISSUES_LIMIT", 10);
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/tracker-bridge.log".to_string());

        Ok(Self {
            github_api_url,
            platform_url,
            platform_token,
            webhook_callback_url,
            tile_refresh_interval_secs,
            recent_issues_limit,
            log_file,
        })
    }

    /// Validate config: URLs must parse, the refresh interval must be non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("GITHUB_API_URL", &self.github_api_url),
            ("PLATFORM_URL", &self.platform_url),
            ("WEBHOOK_CALLBACK_URL", &self.webhook_callback_url),
        ] {
            if reqwest::Url::parse(value).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, value);
            }
        }
        if self.tile_refresh_interval_secs == 0 {
            anyhow::bail!("TILE_REFRESH_INTERVAL_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn tile_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.tile_refresh_interval_secs)
    }
}
