//! Domain types for the ticket checkout.
//!
//! Value objects shared by the step orchestrator, the order aggregator and the
//! gateway adapters. Everything that crosses the wire derives serde with the
//! camelCase field names the REST backend uses.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a ticket type in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u32);

impl TicketId {
    /// Create a `TicketId` from its numeric value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the numeric value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for TicketId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in customer placing the order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Account identifier
    pub id: String,
    /// Display name
    pub user_name: String,
    /// Contact email, when the account has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CurrentUser {
    /// Create a user without an email
    #[must_use]
    pub fn new(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            email: None,
        }
    }

    /// Attach a contact email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

// ============================================================================
// Money
// ============================================================================

/// An amount in whole Vietnamese đồng
///
/// Displays the way the site prints prices: thousands grouped with `.` and a
/// trailing `₫`, e.g. `150.000 ₫`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero đồng
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole đồng
    #[must_use]
    pub const fn from_dong(dong: u64) -> Self {
        Self(dong)
    }

    /// The amount in whole đồng
    #[must_use]
    pub const fn dong(self) -> u64 {
        self.0
    }

    /// Add two amounts, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by a quantity, saturating at `u64::MAX`
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        write!(f, "{grouped} ₫")
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// A ticket type as offered by the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTicket {
    /// Ticket type
    pub id: TicketId,
    /// Display name ("Adult", "Child", ...)
    pub name: String,
    /// Short description shown on the selection step
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: Money,
}

impl CatalogTicket {
    /// Create a catalog entry
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: TicketId::new(id),
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// A catalog ticket together with the quantity the customer chose
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTicket {
    /// Ticket type
    pub id: TicketId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Unit price
    pub price: Money,
    /// Chosen quantity
    pub quantity: u32,
}

impl OrderTicket {
    /// Build an order line from a catalog entry
    #[must_use]
    pub fn from_catalog(ticket: CatalogTicket, quantity: u32) -> Self {
        Self {
            id: ticket.id,
            name: ticket.name,
            description: ticket.description,
            price: ticket.price,
            quantity,
        }
    }

    /// `price × quantity`
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }
}

/// Where to send the customer to pay, as returned by the checkout endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRedirect {
    /// Payment page URL
    pub url: String,
}

impl CheckoutRedirect {
    /// Wrap a redirect URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
