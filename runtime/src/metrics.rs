//! Store metrics.
//!
//! The Store records through the `metrics` facade; whichever recorder the
//! host application installs picks them up. Without a recorder every call is
//! a no-op.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `store.actions.total` - Actions applied by the reducer
//! - `store.effects.executed{type}` - Effects started, by variant
//! - `store.shutdown.initiated` / `.completed` / `.timeout` / `.rejected_actions`
//!
//! ## Histograms
//! - `store.reducer.duration_seconds` - Time spent inside the reducer

use metrics::{describe_counter, describe_histogram};

/// Register descriptions for every metric the Store records.
///
/// Call once at startup, after installing a recorder.
pub fn register_store_metrics() {
    describe_counter!("store.actions.total", "Total number of actions applied by the reducer");
    describe_counter!(
        "store.effects.executed",
        "Effects started by the store, labelled by effect type"
    );
    describe_counter!("store.shutdown.initiated", "Graceful shutdowns started");
    describe_counter!("store.shutdown.completed", "Graceful shutdowns that drained every effect");
    describe_counter!("store.shutdown.timeout", "Graceful shutdowns that timed out");
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken by a single reducer invocation"
    );

    tracing::debug!("Store metrics registered");
}
