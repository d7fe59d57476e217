//! Collaborators the checkout flow talks to.
//!
//! The flow only sees the [`TicketCatalog`] and [`CheckoutGateway`] traits.
//! Production wires in the HTTP adapters from [`crate::http`]; development and
//! tests use the in-process implementations below.
//!
//! Note: methods return `BoxFuture` instead of being `async fn` so the traits
//! stay dyn-compatible and can sit behind an `Arc` in the environment.

use crate::error::GatewayError;
use crate::order::Order;
use crate::types::{CatalogTicket, CheckoutRedirect};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;

/// Gateway result
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Source of the purchasable ticket types
pub trait TicketCatalog: Send + Sync {
    /// Fetch the current catalog
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the catalog cannot be fetched or decoded.
    fn fetch_catalog(&self) -> BoxFuture<'static, GatewayResult<Vec<CatalogTicket>>>;
}

/// The external checkout endpoint
pub trait CheckoutGateway: Send + Sync {
    /// Submit a validated order and get the payment redirect
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport failure or when the backend
    /// rejects the order.
    fn checkout(&self, order: &Order) -> BoxFuture<'static, GatewayResult<CheckoutRedirect>>;
}

// ============================================================================
// In-process implementations
// ============================================================================

/// Holds requests until the test releases them
#[derive(Clone, Debug, Default)]
struct Gate(Option<Arc<Semaphore>>);

impl Gate {
    fn closed() -> Self {
        Self(Some(Arc::new(Semaphore::new(0))))
    }

    async fn pass(self) {
        if let Some(semaphore) = self.0 {
            // A closed semaphore lets everything through.
            if let Ok(permit) = semaphore.acquire().await {
                permit.forget();
            }
        }
    }

    fn release(&self, requests: usize) {
        if let Some(semaphore) = &self.0 {
            semaphore.add_permits(requests);
        }
    }
}

/// Catalog served from memory
#[derive(Clone, Debug)]
pub struct StaticTicketCatalog {
    outcome: Arc<Mutex<GatewayResult<Vec<CatalogTicket>>>>,
    fetches: Arc<AtomicUsize>,
    gate: Gate,
}

impl StaticTicketCatalog {
    /// Serve `tickets` on every fetch
    #[must_use]
    pub fn new(tickets: Vec<CatalogTicket>) -> Self {
        Self::with_outcome(Ok(tickets))
    }

    /// Fail every fetch with `error`
    #[must_use]
    pub fn failing(error: GatewayError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: GatewayResult<Vec<CatalogTicket>>) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            fetches: Arc::new(AtomicUsize::new(0)),
            gate: Gate::default(),
        }
    }

    /// Hold every fetch until [`StaticTicketCatalog::release`] lets it through
    #[must_use]
    pub fn held(mut self) -> Self {
        self.gate = Gate::closed();
        self
    }

    /// Let `fetches` held fetches complete
    pub fn release(&self, fetches: usize) {
        self.gate.release(fetches);
    }

    /// Replace what later fetches return
    pub fn set_outcome(&self, outcome: GatewayResult<Vec<CatalogTicket>>) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Number of fetches started
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl TicketCatalog for StaticTicketCatalog {
    fn fetch_catalog(&self) -> BoxFuture<'static, GatewayResult<Vec<CatalogTicket>>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let outcome = Arc::clone(&self.outcome);
        let gate = self.gate.clone();

        Box::pin(async move {
            gate.pass().await;
            let outcome = outcome.lock().unwrap_or_else(PoisonError::into_inner).clone();
            tracing::debug!(ok = outcome.is_ok(), "Static catalog served");
            outcome
        })
    }
}

/// Checkout endpoint stand-in that records every order it receives
#[derive(Clone, Debug)]
pub struct MockCheckoutGateway {
    outcome: Arc<Mutex<GatewayResult<CheckoutRedirect>>>,
    orders: Arc<Mutex<Vec<Order>>>,
    calls: Arc<AtomicUsize>,
    gate: Gate,
}

impl MockCheckoutGateway {
    /// Answer every checkout with a redirect to `url`
    #[must_use]
    pub fn succeeding(url: impl Into<String>) -> Self {
        Self::with_outcome(Ok(CheckoutRedirect::new(url)))
    }

    /// Fail every checkout with `error`
    #[must_use]
    pub fn failing(error: GatewayError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: GatewayResult<CheckoutRedirect>) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            orders: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            gate: Gate::default(),
        }
    }

    /// Hold every checkout in flight until [`MockCheckoutGateway::release`]
    #[must_use]
    pub fn held(mut self) -> Self {
        self.gate = Gate::closed();
        self
    }

    /// Let `requests` held checkouts complete
    pub fn release(&self, requests: usize) {
        self.gate.release(requests);
    }

    /// Replace what later checkouts return
    pub fn set_outcome(&self, outcome: GatewayResult<CheckoutRedirect>) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Number of checkouts started
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Orders received, oldest first
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CheckoutGateway for MockCheckoutGateway {
    fn checkout(&self, order: &Order) -> BoxFuture<'static, GatewayResult<CheckoutRedirect>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());

        let outcome = Arc::clone(&self.outcome);
        let gate = self.gate.clone();
        let tickets = order.ticket_count();

        Box::pin(async move {
            gate.pass().await;
            let outcome = outcome.lock().unwrap_or_else(PoisonError::into_inner).clone();
            tracing::info!(tickets, ok = outcome.is_ok(), "Mock checkout processed");
            outcome
        })
    }
}
