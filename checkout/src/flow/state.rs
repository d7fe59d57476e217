//! State owned by one mounted checkout flow.

use crate::order::Order;
use crate::steps::{CheckoutStep, StepSequence};
use crate::types::CheckoutRedirect;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one mount of the flow
///
/// Async results carry the session they were started in; results from an
/// earlier session are stale and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// The session after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a notification so it can be dismissed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Create a `NotificationId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A dismissible message for the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Handle for dismissal
    pub id: NotificationId,
    /// Headline ("Failed to checkout")
    pub title: String,
    /// Detail
    pub description: String,
    /// When it was raised
    pub raised_at: DateTime<Utc>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Progress of the ticket catalog fetch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogStatus {
    /// Not requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Order lines reflect the latest catalog
    Ready,
    /// Last fetch failed; the flow keeps working with what it has
    Unavailable {
        /// Why the fetch failed
        reason: String,
    },
}

impl CatalogStatus {
    /// Whether the catalog has been merged into the order
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Progress of the checkout call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Nothing submitted
    #[default]
    Idle,
    /// Checkout call in flight; further submits are ignored
    InFlight,
    /// Checkout accepted; see [`CheckoutFlowState::redirect`]
    Succeeded,
    /// Checkout call failed; the user may retry
    Failed {
        /// Why the call failed
        reason: String,
    },
}

/// State of the checkout flow
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlowState {
    /// Current mount; bumped on mount and unmount
    pub session: SessionId,
    /// Whether the flow is on screen
    pub mounted: bool,
    /// Step position
    pub steps: StepSequence,
    /// The cart
    pub order: Order,
    /// Catalog fetch progress
    pub catalog: CatalogStatus,
    /// Checkout call progress
    pub submission: SubmissionStatus,
    /// Why the last submit was rejected before calling the gateway
    pub validation_error: Option<ValidationError>,
    /// Payment page returned by a successful checkout
    pub redirect: Option<CheckoutRedirect>,
    /// Notifications still on screen, oldest first
    pub notifications: Vec<Notification>,
    next_notification: u64,
}

impl CheckoutFlowState {
    /// A fresh, unmounted flow
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Step being shown, `None` once completed
    #[must_use]
    pub fn current_step(&self) -> Option<CheckoutStep> {
        self.steps.current().and_then(CheckoutStep::from_index)
    }

    /// Whether a checkout call is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionStatus::InFlight)
    }

    /// Whether the success view should be shown
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.steps.is_completed()
    }

    /// Whether the order may still be edited
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.mounted && !self.is_submitting() && !self.is_completed()
    }

    /// Add a notification and return its id
    pub fn raise(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        raised_at: DateTime<Utc>,
    ) -> NotificationId {
        self.next_notification += 1;
        let id = NotificationId(self.next_notification);

        self.notifications.push(Notification {
            id,
            title: title.into(),
            description: description.into(),
            raised_at,
        });
        id
    }

    /// Remove a notification; returns whether it was present
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }
}
