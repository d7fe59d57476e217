//! Business metrics for the ticket checkout.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `zooma_checkout_flows_mounted_total` - Checkout flows opened
//! - `zooma_checkout_catalog_fetches_total{outcome}` - Catalog fetches (ok, failed)
//! - `zooma_checkout_submissions_total{outcome}` - Submissions (started, succeeded, failed)
//! - `zooma_checkout_validation_failures_total{reason}` - Submissions blocked before the call
//! - `zooma_checkout_gateway_errors_total{kind}` - Gateway failures (network, backend, decode)
//! - `zooma_checkout_tickets_ordered_total` - Tickets in successful checkouts
//! - `zooma_checkout_order_value_dong_total` - Value of successful checkouts in đồng
//!
//! ## Histograms
//! - `zooma_checkout_duration_seconds` - Checkout call latency

use crate::error::GatewayError;
use crate::validation::ValidationError;
use metrics::{describe_counter, describe_histogram};
use std::time::Duration;

/// Initialize and register all checkout metric descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_checkout_metrics() {
    describe_counter!("zooma_checkout_flows_mounted_total", "Checkout flows opened");
    describe_counter!(
        "zooma_checkout_catalog_fetches_total",
        "Ticket catalog fetches by outcome (ok, failed)"
    );
    describe_counter!(
        "zooma_checkout_submissions_total",
        "Checkout submissions by outcome (started, succeeded, failed)"
    );
    describe_counter!(
        "zooma_checkout_validation_failures_total",
        "Submissions blocked by pre-submit validation, by reason"
    );
    describe_counter!(
        "zooma_checkout_gateway_errors_total",
        "Catalog and checkout gateway failures by kind"
    );
    describe_counter!(
        "zooma_checkout_tickets_ordered_total",
        "Tickets included in successful checkouts"
    );
    describe_counter!(
        "zooma_checkout_order_value_dong_total",
        "Value of successful checkouts in đồng"
    );
    describe_histogram!(
        "zooma_checkout_duration_seconds",
        "Time taken by the external checkout call"
    );

    tracing::info!("Checkout metrics registered");
}

/// Record a checkout flow being mounted.
pub fn record_flow_mounted() {
    metrics::counter!("zooma_checkout_flows_mounted_total").increment(1);
}

/// Record the outcome of a catalog fetch.
pub fn record_catalog_fetch(result: Result<usize, &GatewayError>) {
    match result {
        Ok(tickets) => {
            metrics::counter!("zooma_checkout_catalog_fetches_total", "outcome" => "ok")
                .increment(1);
            tracing::debug!(tickets, "Recorded catalog_fetch metric");
        },
        Err(error) => {
            metrics::counter!("zooma_checkout_catalog_fetches_total", "outcome" => "failed")
                .increment(1);
            record_gateway_error(error);
        },
    }
}

/// Record a submission that passed validation and went to the gateway.
pub fn record_submission_started() {
    metrics::counter!("zooma_checkout_submissions_total", "outcome" => "started").increment(1);
}

/// Record a submission blocked by validation.
pub fn record_validation_failure(error: ValidationError) {
    metrics::counter!("zooma_checkout_validation_failures_total", "reason" => error.kind())
        .increment(1);
    tracing::debug!(reason = error.kind(), "Recorded validation_failure metric");
}

/// Record a successful checkout.
///
/// # Arguments
///
/// * `tickets` - Tickets in the order
/// * `value_dong` - Order total
/// * `elapsed` - Time the checkout call took
pub fn record_checkout_succeeded(tickets: u64, value_dong: u64, elapsed: Duration) {
    metrics::counter!("zooma_checkout_submissions_total", "outcome" => "succeeded").increment(1);
    metrics::counter!("zooma_checkout_tickets_ordered_total").increment(tickets);
    metrics::counter!("zooma_checkout_order_value_dong_total").increment(value_dong);
    metrics::histogram!("zooma_checkout_duration_seconds").record(elapsed.as_secs_f64());
}

/// Record a failed checkout call.
pub fn record_checkout_failed(error: &GatewayError, elapsed: Duration) {
    metrics::counter!("zooma_checkout_submissions_total", "outcome" => "failed").increment(1);
    metrics::histogram!("zooma_checkout_duration_seconds").record(elapsed.as_secs_f64());
    record_gateway_error(error);
}

fn record_gateway_error(error: &GatewayError) {
    metrics::counter!("zooma_checkout_gateway_errors_total", "kind" => error.kind()).increment(1);
    tracing::debug!(kind = error.kind(), "Recorded gateway_error metric");
}
