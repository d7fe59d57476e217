//! The ticket checkout flow.
//!
//! One mounted checkout is one [`CheckoutStore`]: the store owns the
//! [`CheckoutFlowState`], runs [`CheckoutFlowReducer`] for every
//! [`CheckoutAction`], and executes the effects it returns.
//!
//! # Architecture
//!
//! ```text
//! Mount ──► fetch catalog ──► CatalogLoaded / CatalogFailed
//!   │
//!   ▼
//! Tickets ─► Date ─► Your info ─► Summary
//!                                   │ NextStep / Submit
//!                                   ▼
//!                         validate_for_submission
//!                          │ err            │ ok
//!                          ▼                ▼
//!                    notification     checkout call (InFlight)
//!                                           │
//!                         CheckoutSucceeded / CheckoutFailed
//!                          │                │
//!                          ▼                ▼
//!                      Completed      notification, step kept
//! ```
//!
//! Results of the catalog fetch and the checkout call carry the
//! [`SessionId`] they were started in. Unmounting or remounting bumps the
//! session, so late results are dropped instead of touching a newer flow.

pub mod actions;
pub mod environment;
pub mod reducer;
pub mod state;
pub mod store;
#[cfg(test)]
mod tests;

pub use actions::CheckoutAction;
pub use environment::CheckoutEnvironment;
pub use reducer::{CATALOG_FAILED_TITLE, CheckoutFlowReducer};
pub use state::{
    CatalogStatus, CheckoutFlowState, Notification, NotificationId, SessionId, SubmissionStatus,
};
pub use store::{CheckoutStore, checkout_store};
