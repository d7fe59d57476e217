//! Actions for the checkout flow.

use crate::flow::state::{NotificationId, SessionId};
use crate::types::{CatalogTicket, CheckoutRedirect, CurrentUser, TicketId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every input the checkout flow reacts to.
///
/// User intents come from the step views; the `*Loaded`, `*Failed` and
/// `*Succeeded` actions are produced by effects and carry the session they
/// were started in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutAction {
    // Lifecycle
    /// The flow appeared on screen
    Mount {
        /// Raw 1-indexed `step` query parameter
        resume_step: Option<String>,
        /// Signed-in user, if any
        current_user: Option<CurrentUser>,
    },

    /// The flow left the screen; pending results become stale
    Unmount,

    // Catalog
    /// Fetch the catalog again, keeping chosen quantities
    RefreshCatalog,

    /// Catalog fetch finished
    CatalogLoaded {
        /// Session the fetch belongs to
        session: SessionId,
        /// Ticket types on offer
        tickets: Vec<CatalogTicket>,
    },

    /// Catalog fetch failed
    CatalogFailed {
        /// Session the fetch belongs to
        session: SessionId,
        /// Error description
        reason: String,
    },

    // Navigation
    /// "Next Step"; on the last step this is "Confirm" and submits
    NextStep,

    /// "Go Back"
    PreviousStep,

    /// Step indicator click or deep link, clamped into range
    GoToStep {
        /// Zero-based target
        index: i64,
    },

    // Order edits
    /// Change how many of a ticket type to buy; negatives clamp to zero
    SetTicketQuantity {
        /// Ticket type
        id: TicketId,
        /// Requested quantity
        quantity: i64,
    },

    /// Pick or clear the visit date
    SetVisitDate {
        /// Day of the visit
        date: Option<NaiveDate>,
    },

    /// The signed-in user changed
    SetCurrentUser {
        /// New user, `None` after sign-out
        user: Option<CurrentUser>,
    },

    // Submission
    /// Validate the order and hand it to the checkout endpoint
    Submit,

    /// Checkout endpoint accepted the order
    CheckoutSucceeded {
        /// Session the call belongs to
        session: SessionId,
        /// Where to pay
        redirect: CheckoutRedirect,
    },

    /// Checkout call failed
    CheckoutFailed {
        /// Session the call belongs to
        session: SessionId,
        /// Error description
        reason: String,
    },

    // Notifications
    /// Close a notification (user click or auto-dismiss)
    DismissNotification {
        /// Notification to close
        id: NotificationId,
    },
}
