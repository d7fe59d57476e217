//! Collaborators injected into the checkout reducer.

use crate::config::CheckoutConfig;
use crate::gateway::{CheckoutGateway, TicketCatalog};
use crate::rules::TicketRules;
use std::sync::Arc;
use std::time::Duration;
use zooma_core::environment::Clock;

/// Environment dependencies for the checkout reducer.
///
/// Production wires the HTTP adapters and `SystemClock`; tests inject the
/// in-process gateways and a `FixedClock`.
#[derive(Clone)]
pub struct CheckoutEnvironment {
    catalog: Arc<dyn TicketCatalog>,
    gateway: Arc<dyn CheckoutGateway>,
    clock: Arc<dyn Clock>,
    rules: TicketRules,
    notification_ttl: Option<Duration>,
}

impl CheckoutEnvironment {
    /// Create an environment with the default ticket rules and no
    /// notification auto-dismiss
    #[must_use]
    pub fn new(
        catalog: Arc<dyn TicketCatalog>,
        gateway: Arc<dyn CheckoutGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            clock,
            rules: TicketRules::default(),
            notification_ttl: None,
        }
    }

    /// Take ticket rules and notification timing from `config`
    #[must_use]
    pub fn configured(mut self, config: &CheckoutConfig) -> Self {
        self.rules = config.ticket_rules.clone();
        self.notification_ttl = config.notification_ttl();
        self
    }

    /// Use a different ticket role table
    #[must_use]
    pub fn with_rules(mut self, rules: TicketRules) -> Self {
        self.rules = rules;
        self
    }

    /// Auto-dismiss notifications after `ttl`
    #[must_use]
    pub const fn with_notification_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.notification_ttl = ttl;
        self
    }

    /// Ticket catalog
    #[must_use]
    pub fn catalog(&self) -> &dyn TicketCatalog {
        self.catalog.as_ref()
    }

    /// Checkout endpoint
    #[must_use]
    pub fn gateway(&self) -> &dyn CheckoutGateway {
        self.gateway.as_ref()
    }

    /// Clock for notification timestamps
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Ticket role table
    #[must_use]
    pub const fn rules(&self) -> &TicketRules {
        &self.rules
    }

    /// Notification auto-dismiss delay
    #[must_use]
    pub const fn notification_ttl(&self) -> Option<Duration> {
        self.notification_ttl
    }
}

impl std::fmt::Debug for CheckoutEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutEnvironment")
            .field("rules", &self.rules)
            .field("notification_ttl", &self.notification_ttl)
            .finish_non_exhaustive()
    }
}
