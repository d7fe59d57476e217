//! REST adapters for the zoo backend.
//!
//! Every endpoint answers with an envelope: `{ "data": ... }` on success and
//! `{ "error": ... }` when the backend rejects the request.

use crate::error::GatewayError;
use crate::gateway::{CheckoutGateway, GatewayResult, TicketCatalog};
use crate::order::Order;
use crate::types::{CatalogTicket, CheckoutRedirect};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Response envelope of the backend
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Shared HTTP client bound to the backend base URL
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` with a per-request `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Read a response and unwrap its envelope
async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let status = response.status();
    let body = response.text().await?;
    decode_envelope(status, &body)
}

/// Turn a status and body into the `data` payload or a [`GatewayError`]
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> GatewayResult<T> {
    let envelope = serde_json::from_str::<Envelope<T>>(body);

    if !status.is_success() {
        let reason = envelope
            .ok()
            .and_then(|e| e.error)
            .map_or_else(|| format!("HTTP {status}"), |e| error_text(&e));
        return Err(GatewayError::Backend(reason));
    }

    let envelope = envelope.map_err(|e| GatewayError::Decode(e.to_string()))?;

    if let Some(error) = envelope.error {
        return Err(GatewayError::Backend(error_text(&error)));
    }

    envelope
        .data
        .ok_or_else(|| GatewayError::Decode("response has no data".to_string()))
}

fn error_text(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Object(fields) => fields
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string),
        other => other.to_string(),
    }
}

/// `GET {base}/tickets`
#[derive(Clone, Debug)]
pub struct HttpTicketCatalog {
    api: ApiClient,
}

impl HttpTicketCatalog {
    /// Catalog backed by `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl TicketCatalog for HttpTicketCatalog {
    fn fetch_catalog(&self) -> BoxFuture<'static, GatewayResult<Vec<CatalogTicket>>> {
        let request = self.api.client.get(self.api.url("tickets"));

        Box::pin(async move {
            let response = request.send().await?;
            let tickets: Vec<CatalogTicket> = read_envelope(response).await?;
            tracing::debug!(tickets = tickets.len(), "Ticket catalog fetched");
            Ok(tickets)
        })
    }
}

/// `POST {base}/orders/checkout`
#[derive(Clone, Debug)]
pub struct HttpCheckoutGateway {
    api: ApiClient,
}

impl HttpCheckoutGateway {
    /// Gateway backed by `api`
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl CheckoutGateway for HttpCheckoutGateway {
    fn checkout(&self, order: &Order) -> BoxFuture<'static, GatewayResult<CheckoutRedirect>> {
        let request = self.api.client.post(self.api.url("orders/checkout")).json(order);

        Box::pin(async move {
            let response = request.send().await?;
            let redirect: CheckoutRedirect = read_envelope(response).await?;
            tracing::info!(url = %redirect.url, "Checkout accepted");
            Ok(redirect)
        })
    }
}
