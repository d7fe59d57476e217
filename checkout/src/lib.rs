//! # Zooma Checkout
//!
//! The multi-step ticket checkout of the Zooma zoo site.
//!
//! A customer moves through four steps (tickets, visit date, their info,
//! summary) and confirms. The order is validated against the ticket rules and,
//! if it passes, handed to the backend checkout endpoint, which answers with a
//! payment redirect.
//!
//! ## Modules
//!
//! - [`steps`]: the step orchestrator ([`StepSequence`], [`FlowStep`])
//! - [`order`]: the order aggregator ([`Order`])
//! - [`rules`] and [`validation`]: parent/child ticket rules and pre-submit checks
//! - [`gateway`] and [`http`]: the catalog and checkout collaborators
//! - [`flow`]: state, actions and reducer tying it together on a `Store`
//! - [`config`] and [`metrics`]: environment configuration and business metrics
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zooma_checkout::{
//!     CheckoutAction, CheckoutEnvironment, checkout_store,
//!     gateway::{MockCheckoutGateway, StaticTicketCatalog},
//! };
//! use zooma_core::environment::SystemClock;
//!
//! # async fn run() -> Result<(), zooma_runtime::StoreError> {
//! let env = CheckoutEnvironment::new(
//!     Arc::new(StaticTicketCatalog::new(Vec::new())),
//!     Arc::new(MockCheckoutGateway::succeeding("https://pay.example")),
//!     Arc::new(SystemClock),
//! );
//! let store = checkout_store(env);
//!
//! store
//!     .send(CheckoutAction::Mount { resume_step: Some("1".into()), current_user: None })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod http;
pub mod metrics;
pub mod order;
pub mod rules;
pub mod steps;
pub mod types;
pub mod validation;

pub use config::CheckoutConfig;
pub use error::{ConfigError, GatewayError};
pub use flow::{
    CheckoutAction, CheckoutEnvironment, CheckoutFlowReducer, CheckoutFlowState, CheckoutStore,
    checkout_store,
};
pub use order::Order;
pub use rules::{TicketRole, TicketRules};
pub use steps::{CheckoutStep, FlowStep, StepSequence};
pub use validation::{ValidationError, ValidationResult, validate_for_submission};
