// src/notify/mod.rs
//! Notification backends for new firmware announcements.
//!
//! The configured method is resolved once into a [`NotificationMethod`]
//! carrying its validated destination. Delivery problems are logged here and
//! never reach the poll loop.

pub mod email;
pub mod webhook;

use regex::Regex;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{Config, SmtpSettings};

pub const EMAIL_SUBJECT: &str = "New Asuswrt-Merlin Firmware Available";
pub const WEBHOOK_URL_PREFIX: &str = "https://hooks.slack.com/";

const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to compose email: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("webhook returned HTTP {0}")]
    Status(u16),
}

/// Where notifications go. Destinations are validated before a variant is
/// built; anything unusable ends up as `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationMethod {
    Console,
    Email(String),
    Webhook(String),
    Unavailable { method: String },
}

impl NotificationMethod {
    /// Resolve the configured method name and destinations.
    pub fn resolve(
        method: Option<&str>,
        email_address: Option<&str>,
        webhook_url: Option<&str>,
    ) -> Self {
        let name = method.unwrap_or_default().trim();
        match name.to_ascii_lowercase().as_str() {
            "print" | "console" => Self::Console,
            "email" => match email_address {
                Some(address) if is_valid_email(address) => Self::Email(address.to_string()),
                _ => Self::unavailable(name),
            },
            "slack" | "webhook" => match webhook_url {
                Some(url) if is_valid_webhook_url(url) => Self::Webhook(url.to_string()),
                _ => Self::unavailable(name),
            },
            _ => Self::unavailable(name),
        }
    }

    fn unavailable(name: &str) -> Self {
        Self::Unavailable {
            method: name.to_string(),
        }
    }
}

impl fmt::Display for NotificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::Email(address) => write!(f, "email to {address}"),
            Self::Webhook(_) => write!(f, "slack webhook"),
            Self::Unavailable { method } if method.is_empty() => write!(f, "<unset>"),
            Self::Unavailable { method } => write!(f, "{method} (unavailable)"),
        }
    }
}

/// Basic `local@domain.tld` check. Not a full RFC 5322 parser.
pub fn is_valid_email(address: &str) -> bool {
    !address.is_empty()
        && Regex::new(EMAIL_PATTERN)
            .map(|re| re.is_match(address))
            .unwrap_or(false)
}

pub fn is_valid_webhook_url(url: &str) -> bool {
    url.starts_with(WEBHOOK_URL_PREFIX) && url.len() > WEBHOOK_URL_PREFIX.len()
}

/// Result of a single notify call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the log
    Printed,
    Sent,
    Failed,
    /// No usable method configured
    Skipped,
}

/// Anything that can announce a new version.
pub trait Notify {
    fn notify(&self, message: &str) -> Delivery;
}

/// Dispatches to the configured backend.
pub struct Notifier {
    method: NotificationMethod,
    smtp: SmtpSettings,
    agent: ureq::Agent,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self::with_method(config.notification.clone(), config.smtp.clone())
    }

    pub fn with_method(method: NotificationMethod, smtp: SmtpSettings) -> Self {
        Self {
            method,
            smtp,
            agent: crate::http_agent(),
        }
    }
}

impl Notify for Notifier {
    fn notify(&self, message: &str) -> Delivery {
        match &self.method {
            NotificationMethod::Console => {
                info!("{message}");
                Delivery::Printed
            }
            NotificationMethod::Email(address) => {
                match email::send(&self.smtp, address, EMAIL_SUBJECT, message) {
                    Ok(()) => {
                        info!("Email sent successfully to {address}");
                        Delivery::Sent
                    }
                    Err(e) => {
                        error!("Error sending email: {e}");
                        Delivery::Failed
                    }
                }
            }
            NotificationMethod::Webhook(url) => match webhook::post(&self.agent, url, message) {
                Ok(()) => {
                    info!("Message sent to Slack successfully");
                    Delivery::Sent
                }
                Err(e) => {
                    error!("Error sending message to Slack: {e}");
                    Delivery::Failed
                }
            },
            NotificationMethod::Unavailable { method } => {
                warn!("Unknown notification method or invalid credentials: {method:?}");
                Delivery::Skipped
            }
        }
    }
}
