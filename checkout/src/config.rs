//! Configuration for the checkout.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Parsing goes through a lookup function so tests can feed values without
//! touching the process environment.

use crate::error::ConfigError;
use crate::rules::TicketRules;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default REST backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default ticket role table: ticket 1 is the parent, all others children
pub const DEFAULT_TICKET_ROLES: &str = "1:parent,*:child";

/// Checkout configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// REST backend base URL (`ZOOMA_API_BASE_URL`)
    pub api_base_url: String,
    /// Per-request HTTP timeout in seconds (`ZOOMA_HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,
    /// Ticket role table (`ZOOMA_TICKET_ROLES`)
    pub ticket_rules: TicketRules,
    /// Notification auto-dismiss in seconds, 0 disables (`ZOOMA_NOTIFICATION_TTL_SECS`)
    pub notification_ttl_secs: u64,
    /// Store shutdown wait in seconds (`ZOOMA_SHUTDOWN_TIMEOUT_SECS`)
    pub shutdown_timeout_secs: u64,
    /// Serve catalog and checkout from memory (`ZOOMA_MOCK_BACKEND`)
    pub mock_backend: bool,
    /// Log filter (`RUST_LOG`)
    pub log_level: String,
}

impl CheckoutConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `ZOOMA_TICKET_ROLES` is not a valid role table.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Malformed numbers and booleans fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the ticket role table is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u64| match lookup(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, default, "Ignoring malformed setting");
                default
            }),
            None => default,
        };

        Ok(Self {
            api_base_url: lookup("ZOOMA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            http_timeout_secs: number("ZOOMA_HTTP_TIMEOUT_SECS", 30),
            ticket_rules: lookup("ZOOMA_TICKET_ROLES")
                .as_deref()
                .unwrap_or(DEFAULT_TICKET_ROLES)
                .parse()?,
            notification_ttl_secs: number("ZOOMA_NOTIFICATION_TTL_SECS", 5),
            shutdown_timeout_secs: number("ZOOMA_SHUTDOWN_TIMEOUT_SECS", 10),
            mock_backend: lookup("ZOOMA_MOCK_BACKEND")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(false),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Per-request HTTP timeout
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Notification auto-dismiss delay, `None` when disabled
    #[must_use]
    pub const fn notification_ttl(&self) -> Option<Duration> {
        match self.notification_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Store shutdown wait
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 30,
            ticket_rules: TicketRules::default(),
            notification_ttl_secs: 5,
            shutdown_timeout_secs: 10,
            mock_backend: false,
            log_level: "info".to_string(),
        }
    }
}
