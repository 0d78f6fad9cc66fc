// src/config.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::notify::NotificationMethod;

pub const DEFAULT_LAST_VERSION_FILE: &str = "last_version.txt";
pub const DEFAULT_CHECK_FREQUENCY: u64 = 60;

/// Outbound mail relay used by the email backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address placed in the `From` header
    pub from: String,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "your_username".to_string(),
            password: "your_password".to_string(),
            from: "asuswrt-merlin-notifier@example.com".to_string(),
        }
    }
}

/// Process-wide settings, read once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub last_version_file: PathBuf,
    pub notification: NotificationMethod,
    pub smtp: SmtpSettings,
    /// Poll interval in units of five seconds
    pub check_frequency: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let feed_url = get("RSS_FEED_URL").context("RSS_FEED_URL is not set")?;

        let check_frequency = match get("CHECK_FREQUENCY") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("CHECK_FREQUENCY must be a whole number, got {raw:?}"))?,
            None => DEFAULT_CHECK_FREQUENCY,
        };

        let defaults = SmtpSettings::default();
        let smtp = SmtpSettings {
            host: get("SMTP_HOST").unwrap_or(defaults.host),
            port: match get("SMTP_PORT") {
                Some(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("SMTP_PORT must be a port number, got {raw:?}"))?,
                None => defaults.port,
            },
            username: get("SMTP_USERNAME").unwrap_or(defaults.username),
            password: get("SMTP_PASSWORD").unwrap_or(defaults.password),
            from: get("EMAIL_FROM").unwrap_or(defaults.from),
        };

        let notification = NotificationMethod::resolve(
            get("NOTIFICATION_METHOD").as_deref(),
            get("EMAIL_ADDRESS").as_deref(),
            get("SLACK_WEBHOOK_URL").as_deref(),
        );

        Ok(Self {
            feed_url,
            last_version_file: get("LAST_VERSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LAST_VERSION_FILE)),
            notification,
            smtp,
            check_frequency,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Time to sleep between poll cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.check_frequency.saturating_mul(5))
    }

    /// Log the effective settings. The SMTP password is left out.
    pub fn log_summary(&self) {
        info!("RSS Feed URL: {}", self.feed_url);
        info!("Last Version File: {}", self.last_version_file.display());
        info!("Notification Method: {}", self.notification);
        info!("SMTP Relay: {}:{} as {}", self.smtp.host, self.smtp.port, self.smtp.username);
        info!(
            "Check Frequency: {} (every {}s)",
            self.check_frequency,
            self.poll_interval().as_secs()
        );
    }
}
