//! Reducer for the checkout flow.

use crate::flow::{
    CatalogStatus, CheckoutAction, CheckoutEnvironment, CheckoutFlowState, SessionId,
    SubmissionStatus,
};
use crate::metrics;
use crate::order::Order;
use crate::steps::{Advance, resume_index};
use crate::validation::{CHECKOUT_FAILED_TITLE, validate_for_submission};
use std::time::Instant;
use zooma_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Title of the notification raised when the catalog cannot be loaded
pub const CATALOG_FAILED_TITLE: &str = "Error initializing the app";

/// Effect list returned by the reducer
type Effects = SmallVec<[Effect<CheckoutAction>; 4]>;

/// Reducer for the ticket checkout flow.
///
/// Coordinates:
/// - Step navigation, where "next" on the last step means "confirm"
/// - Order edits, blocked while a checkout call is in flight
/// - The catalog fetch and the checkout call, whose results are applied only
///   if they belong to the current session
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutFlowReducer;

impl CheckoutFlowReducer {
    /// Create a new checkout flow reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether an async result belongs to the flow currently on screen
    fn is_current(state: &CheckoutFlowState, session: SessionId) -> bool {
        if state.mounted && state.session == session {
            true
        } else {
            tracing::debug!(
                %session,
                current = %state.session,
                mounted = state.mounted,
                "Dropping stale result"
            );
            false
        }
    }

    fn fetch_catalog(env: &CheckoutEnvironment, session: SessionId) -> Effect<CheckoutAction> {
        let fetch = env.catalog().fetch_catalog();

        Effect::future(async move {
            match fetch.await {
                Ok(tickets) => {
                    metrics::record_catalog_fetch(Ok(tickets.len()));
                    Some(CheckoutAction::CatalogLoaded { session, tickets })
                },
                Err(error) => {
                    metrics::record_catalog_fetch(Err(&error));
                    Some(CheckoutAction::CatalogFailed {
                        session,
                        reason: error.to_string(),
                    })
                },
            }
        })
    }

    /// Raise a notification, scheduling its dismissal when a TTL is set
    fn notify(
        state: &mut CheckoutFlowState,
        env: &CheckoutEnvironment,
        title: &str,
        description: String,
    ) -> Effects {
        let id = state.raise(title, description, env.clock().now());

        match env.notification_ttl() {
            Some(duration) => smallvec![Effect::Delay {
                duration,
                action: Box::new(CheckoutAction::DismissNotification { id }),
            }],
            None => smallvec![Effect::None],
        }
    }

    fn submit(state: &mut CheckoutFlowState, env: &CheckoutEnvironment) -> Effects {
        if !state.mounted || state.is_completed() {
            return smallvec![Effect::None];
        }
        if state.is_submitting() {
            tracing::debug!(
                session = %state.session,
                "Checkout already in flight, ignoring submit"
            );
            return smallvec![Effect::None];
        }
        if !state.steps.is_last() {
            tracing::debug!(step = ?state.steps.current(), "Submit outside the last step ignored");
            return smallvec![Effect::None];
        }

        if let Err(error) = validate_for_submission(&state.order, env.rules()) {
            tracing::info!(reason = error.kind(), "Order rejected before checkout");
            metrics::record_validation_failure(error);
            state.validation_error = Some(error);
            return Self::notify(state, env, CHECKOUT_FAILED_TITLE, error.to_string());
        }

        state.validation_error = None;
        state.submission = SubmissionStatus::InFlight;
        metrics::record_submission_started();

        let session = state.session;
        let tickets = state.order.ticket_count();
        let value = state.order.total().dong();
        let call = env.gateway().checkout(&state.order);
        tracing::info!(%session, tickets, value, "Submitting checkout");

        smallvec![Effect::future(async move {
            let started = Instant::now();

            match call.await {
                Ok(redirect) => {
                    metrics::record_checkout_succeeded(tickets, value, started.elapsed());
                    Some(CheckoutAction::CheckoutSucceeded { session, redirect })
                },
                Err(error) => {
                    metrics::record_checkout_failed(&error, started.elapsed());
                    Some(CheckoutAction::CheckoutFailed {
                        session,
                        reason: error.to_string(),
                    })
                },
            }
        })]
    }
}

impl Reducer for CheckoutFlowReducer {
    type State = CheckoutFlowState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::Mount {
                resume_step,
                current_user,
            } => {
                state.session = state.session.next();
                state.mounted = true;
                state.steps.reset();
                state.steps.go_to(resume_index(resume_step.as_deref()));
                state.order = Order::default();
                state.order.set_current_user(current_user);
                state.catalog = CatalogStatus::Loading;
                state.submission = SubmissionStatus::Idle;
                state.validation_error = None;
                state.redirect = None;
                state.notifications.clear();

                metrics::record_flow_mounted();
                tracing::info!(
                    session = %state.session,
                    step = ?state.steps.current(),
                    "Checkout mounted"
                );

                smallvec![Self::fetch_catalog(env, state.session)]
            },

            CheckoutAction::Unmount => {
                state.session = state.session.next();
                state.mounted = false;
                state.steps.reset();
                state.order = Order::default();
                state.catalog = CatalogStatus::Idle;
                state.submission = SubmissionStatus::Idle;
                state.validation_error = None;
                state.redirect = None;
                state.notifications.clear();

                tracing::info!("Checkout unmounted");
                smallvec![Effect::None]
            },

            CheckoutAction::RefreshCatalog => {
                if !state.mounted {
                    return smallvec![Effect::None];
                }
                state.catalog = CatalogStatus::Loading;
                smallvec![Self::fetch_catalog(env, state.session)]
            },

            CheckoutAction::CatalogLoaded { session, tickets } => {
                if !Self::is_current(state, session) {
                    return smallvec![Effect::None];
                }
                // Merge against the quantities in state now, not at fetch time.
                state.order.set_tickets(tickets);
                state.catalog = CatalogStatus::Ready;
                tracing::debug!(tickets = state.order.tickets.len(), "Catalog merged into order");
                smallvec![Effect::None]
            },

            CheckoutAction::CatalogFailed { session, reason } => {
                if !Self::is_current(state, session) {
                    return smallvec![Effect::None];
                }
                tracing::warn!(%reason, "Ticket catalog unavailable");
                state.catalog = CatalogStatus::Unavailable {
                    reason: reason.clone(),
                };
                Self::notify(state, env, CATALOG_FAILED_TITLE, reason)
            },

            CheckoutAction::NextStep => {
                if !state.mounted || state.is_submitting() {
                    return smallvec![Effect::None];
                }
                match state.steps.next() {
                    Advance::AwaitingConfirmation => Self::submit(state, env),
                    Advance::Moved(_) | Advance::Ignored => smallvec![Effect::None],
                }
            },

            CheckoutAction::PreviousStep => {
                if state.mounted && !state.is_submitting() {
                    state.steps.previous();
                }
                smallvec![Effect::None]
            },

            CheckoutAction::GoToStep { index } => {
                if state.mounted && !state.is_submitting() {
                    state.steps.go_to(index);
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SetTicketQuantity { id, quantity } => {
                if state.is_editable() && state.order.set_ticket_quantity(id, quantity).is_none() {
                    tracing::debug!(%id, "Quantity for unknown ticket ignored");
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SetVisitDate { date } => {
                if state.is_editable() {
                    state.order.set_date(date);
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SetCurrentUser { user } => {
                if state.is_editable() {
                    state.order.set_current_user(user);
                }
                smallvec![Effect::None]
            },

            CheckoutAction::Submit => Self::submit(state, env),

            CheckoutAction::CheckoutSucceeded { session, redirect } => {
                if !Self::is_current(state, session) || !state.is_submitting() {
                    return smallvec![Effect::None];
                }
                tracing::info!(url = %redirect.url, "Checkout succeeded");
                state.submission = SubmissionStatus::Succeeded;
                state.redirect = Some(redirect);
                state.steps.mark_completed();
                state.order.reset();
                smallvec![Effect::None]
            },

            CheckoutAction::CheckoutFailed { session, reason } => {
                if !Self::is_current(state, session) || !state.is_submitting() {
                    return smallvec![Effect::None];
                }
                tracing::warn!(%reason, "Checkout failed");
                state.submission = SubmissionStatus::Failed {
                    reason: reason.clone(),
                };
                Self::notify(state, env, CHECKOUT_FAILED_TITLE, reason)
            },

            CheckoutAction::DismissNotification { id } => {
                state.dismiss(id);
                smallvec![Effect::None]
            },
        }
    }
}
