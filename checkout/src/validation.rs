//! Pre-submit business rules for an order.
//!
//! Checks run in a fixed order and stop at the first failure: authentication,
//! then an empty cart, then the parent/child rule. Callers can rely on the
//! reported reason being the highest-precedence one.

use crate::order::Order;
use crate::rules::{TicketRole, TicketRules};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title of every checkout failure notification
pub const CHECKOUT_FAILED_TITLE: &str = "Failed to checkout";

/// Why an order cannot be submitted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// No signed-in buyer
    #[error("You need to login or sign up to continue")]
    AuthenticationRequired,

    /// Every quantity is zero
    #[error("You need to buy at least 1 ticket")]
    EmptyCart,

    /// Child tickets picked without any parent ticket
    #[error("You need to buy at least 1 parent ticket with child ticket")]
    ParentTicketRequired,
}

impl ValidationError {
    /// Label used for metrics
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::EmptyCart => "empty_cart",
            Self::ParentTicketRequired => "parent_ticket_required",
        }
    }
}

/// Result of [`validate_for_submission`]
pub type ValidationResult = Result<(), ValidationError>;

/// Check whether `order` may be handed to the checkout endpoint
///
/// # Errors
///
/// - [`ValidationError::AuthenticationRequired`] when no user is set
/// - [`ValidationError::EmptyCart`] when every quantity is zero
/// - [`ValidationError::ParentTicketRequired`] when a child ticket is picked
///   without a parent ticket
pub fn validate_for_submission(order: &Order, rules: &TicketRules) -> ValidationResult {
    if order.current_user.is_none() {
        return Err(ValidationError::AuthenticationRequired);
    }

    let all_zero = order.all_zero();
    let child_without_parent = has_child_without_parent(order, rules);

    if all_zero {
        return Err(ValidationError::EmptyCart);
    }
    if child_without_parent {
        return Err(ValidationError::ParentTicketRequired);
    }

    Ok(())
}

/// Whether a child ticket is picked while no parent ticket is
///
/// An all-zero cart never violates the rule; it is "nothing selected yet".
#[must_use]
pub fn has_child_without_parent(order: &Order, rules: &TicketRules) -> bool {
    let picked = |role: TicketRole| {
        order
            .tickets
            .iter()
            .any(|ticket| ticket.quantity > 0 && rules.role_of(ticket.id) == role)
    };

    picked(TicketRole::Child) && !picked(TicketRole::Parent) && !order.all_zero()
}
