//! Unit tests for `CheckoutFlowReducer`.
//!
//! Effects are inspected, not executed; async results are fed in by hand
//! with the session they would carry.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use super::*;
use crate::error::GatewayError;
use crate::gateway::{MockCheckoutGateway, StaticTicketCatalog};
use crate::steps::FlowStep;
use crate::types::{CatalogTicket, CheckoutRedirect, CurrentUser, Money, TicketId};
use crate::validation::ValidationError;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use zooma_core::{effect::Effect, reducer::Reducer};
use zooma_testing::{ReducerTest, assertions, test_clock};

fn zoo_catalog() -> Vec<CatalogTicket> {
    vec![
        CatalogTicket::new(1, "Adult", "13 and over", Money::from_dong(100_000)),
        CatalogTicket::new(2, "Child", "3 to 12", Money::from_dong(50_000)),
        CatalogTicket::new(3, "Toddler", "Under 3", Money::from_dong(20_000)),
    ]
}

fn user() -> CurrentUser {
    CurrentUser::new("u-1", "linh")
}

fn env_with(gateway: MockCheckoutGateway) -> CheckoutEnvironment {
    CheckoutEnvironment::new(
        Arc::new(StaticTicketCatalog::new(zoo_catalog())),
        Arc::new(gateway),
        Arc::new(test_clock()),
    )
}

fn env() -> CheckoutEnvironment {
    env_with(MockCheckoutGateway::succeeding("https://pay.example/order/1"))
}

/// Mounted with the catalog merged, on the first step
fn mounted(env: &CheckoutEnvironment, current_user: Option<CurrentUser>) -> CheckoutFlowState {
    let reducer = CheckoutFlowReducer::new();
    let mut state = CheckoutFlowState::new();
    reducer.reduce(
        &mut state,
        CheckoutAction::Mount {
            resume_step: None,
            current_user,
        },
        env,
    );
    let session = state.session;
    reducer.reduce(
        &mut state,
        CheckoutAction::CatalogLoaded {
            session,
            tickets: zoo_catalog(),
        },
        env,
    );
    state
}

/// Mounted, signed in, on the summary step with `quantities` picked
fn at_summary(env: &CheckoutEnvironment, quantities: &[(u32, i64)]) -> CheckoutFlowState {
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(env, Some(user()));
    for &(id, quantity) in quantities {
        reducer.reduce(
            &mut state,
            CheckoutAction::SetTicketQuantity {
                id: TicketId::new(id),
                quantity,
            },
            env,
        );
    }
    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 3 }, env);
    state
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_mount_resets_and_fetches_catalog() {
    let env = env();

    ReducerTest::new(CheckoutFlowReducer::new())
        .with_env(env)
        .given_state(CheckoutFlowState::new())
        .when_action(CheckoutAction::Mount {
            resume_step: Some("3".to_string()),
            current_user: Some(user()),
        })
        .then_state(|state| {
            assert!(state.mounted);
            assert_eq!(state.steps.current(), Some(2));
            assert_eq!(state.catalog, CatalogStatus::Loading);
            assert_eq!(state.order.current_user, Some(user()));
            assert!(state.order.tickets.is_empty());
        })
        .then_effects(|effects| {
            assertions::assert_effects_count(effects, 1);
            assertions::assert_has_future_effect(effects);
        })
        .run();
}

#[test]
fn test_mount_without_step_param_starts_at_first_step() {
    let state = mounted(&env(), None);
    assert_eq!(state.steps.position(), FlowStep::Step(0));
    assert!(state.catalog.is_ready());
    assert_eq!(state.order.tickets.len(), 3);
    assert!(state.order.all_zero());
}

#[test]
fn test_remount_starts_new_session() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(&env, Some(user()));
    let first = state.session;

    reducer.reduce(
        &mut state,
        CheckoutAction::Mount {
            resume_step: None,
            current_user: None,
        },
        &env,
    );

    assert_ne!(state.session, first);
    assert!(state.order.current_user.is_none());
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_refresh_keeps_quantities() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(&env, None);

    reducer.reduce(
        &mut state,
        CheckoutAction::SetTicketQuantity {
            id: TicketId::new(2),
            quantity: 3,
        },
        &env,
    );
    let effects = reducer.reduce(&mut state, CheckoutAction::RefreshCatalog, &env);
    assertions::assert_has_future_effect(&effects);
    assert_eq!(state.catalog, CatalogStatus::Loading);

    // Quantity edited while the fetch was in flight
    reducer.reduce(
        &mut state,
        CheckoutAction::SetTicketQuantity {
            id: TicketId::new(1),
            quantity: 1,
        },
        &env,
    );
    let session = state.session;
    reducer.reduce(
        &mut state,
        CheckoutAction::CatalogLoaded {
            session,
            tickets: zoo_catalog(),
        },
        &env,
    );

    assert!(state.catalog.is_ready());
    assert_eq!(state.order.quantity_of(TicketId::new(1)), 1);
    assert_eq!(state.order.quantity_of(TicketId::new(2)), 3);
}

#[test]
fn test_stale_catalog_result_ignored() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(&env, None);
    let stale = state.session;

    reducer.reduce(&mut state, CheckoutAction::Unmount, &env);
    reducer.reduce(
        &mut state,
        CheckoutAction::CatalogLoaded {
            session: stale,
            tickets: zoo_catalog(),
        },
        &env,
    );

    assert!(state.order.tickets.is_empty());
    assert_eq!(state.catalog, CatalogStatus::Idle);
}

#[test]
fn test_catalog_failure_notifies_and_schedules_dismissal() {
    let env = env().with_notification_ttl(Some(Duration::from_secs(5)));
    let reducer = CheckoutFlowReducer::new();
    let mut state = CheckoutFlowState::new();
    reducer.reduce(
        &mut state,
        CheckoutAction::Mount {
            resume_step: None,
            current_user: None,
        },
        &env,
    );
    let session = state.session;

    let effects = reducer.reduce(
        &mut state,
        CheckoutAction::CatalogFailed {
            session,
            reason: GatewayError::Network("offline".into()).to_string(),
        },
        &env,
    );

    assert!(matches!(state.catalog, CatalogStatus::Unavailable { .. }));
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(
        state.notifications[0].to_string(),
        "Error initializing the app: Network error: offline"
    );
    assert_eq!(state.notifications[0].raised_at, test_clock_now());

    let id = state.notifications[0].id;
    assertions::assert_has_delayed_action(&effects, |action| {
        *action == CheckoutAction::DismissNotification { id }
    });

    // The flow stays usable
    reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    assert_eq!(state.steps.current(), Some(1));
}

fn test_clock_now() -> chrono::DateTime<chrono::Utc> {
    use zooma_core::environment::Clock;
    test_clock().now()
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_clamps() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(&env, None);

    reducer.reduce(&mut state, CheckoutAction::PreviousStep, &env);
    assert_eq!(state.steps.current(), Some(0));

    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 99 }, &env);
    assert_eq!(state.steps.current(), Some(3));
    assert!(state.steps.is_last());

    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: -5 }, &env);
    assert_eq!(state.steps.current(), Some(0));

    reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    assert_eq!(state.current_step(), Some(crate::steps::CheckoutStep::YourInfo));
}

#[test]
fn test_submit_outside_last_step_ignored() {
    let gateway = MockCheckoutGateway::succeeding("https://pay.example");
    let env = env_with(gateway.clone());

    ReducerTest::new(CheckoutFlowReducer::new())
        .with_env(env.clone())
        .given_state(mounted(&env, Some(user())))
        .when_action(CheckoutAction::SetTicketQuantity {
            id: TicketId::new(1),
            quantity: 1,
        })
        .when_action(CheckoutAction::Submit)
        .then_state(|state| {
            assert_eq!(state.submission, SubmissionStatus::Idle);
            assert!(state.notifications.is_empty());
        })
        .then_effects(|effects| assertions::assert_no_effects(effects))
        .run();

    assert_eq!(gateway.calls(), 0);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_confirm_without_user_requires_login() {
    let gateway = MockCheckoutGateway::succeeding("https://pay.example");
    let env = env_with(gateway.clone());
    let reducer = CheckoutFlowReducer::new();
    let mut state = mounted(&env, None);
    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 3 }, &env);

    reducer.reduce(&mut state, CheckoutAction::NextStep, &env);

    assert_eq!(state.validation_error, Some(ValidationError::AuthenticationRequired));
    assert_eq!(
        state.notifications[0].to_string(),
        "Failed to checkout: You need to login or sign up to continue"
    );
    assert_eq!(state.steps.current(), Some(3));
    assert_eq!(gateway.calls(), 0);
}

#[test]
fn test_confirm_empty_cart() {
    let env = env();
    let mut state = at_summary(&env, &[]);

    CheckoutFlowReducer::new().reduce(&mut state, CheckoutAction::Submit, &env);

    assert_eq!(state.validation_error, Some(ValidationError::EmptyCart));
    assert_eq!(state.submission, SubmissionStatus::Idle);
}

#[test]
fn test_confirm_child_without_parent() {
    let env = env();
    let mut state = at_summary(&env, &[(2, 2)]);

    CheckoutFlowReducer::new().reduce(&mut state, CheckoutAction::Submit, &env);

    assert_eq!(state.validation_error, Some(ValidationError::ParentTicketRequired));
    assert_eq!(
        state.notifications[0].description,
        "You need to buy at least 1 parent ticket with child ticket"
    );
}

#[test]
fn test_custom_rules_drive_validation() {
    let env = env().with_rules(crate::rules::TicketRules::parent_gated([3]));
    let mut state = at_summary(&env, &[(1, 2)]);

    CheckoutFlowReducer::new().reduce(&mut state, CheckoutAction::Submit, &env);

    assert_eq!(state.validation_error, Some(ValidationError::ParentTicketRequired));
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_valid_order_goes_to_gateway_once() {
    let gateway = MockCheckoutGateway::succeeding("https://pay.example").held();
    let env = env_with(gateway.clone());
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1), (2, 2)]);

    let effects = reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    assertions::assert_has_future_effect(&effects);
    assert!(state.is_submitting());
    assert_eq!(state.validation_error, None);

    let again = reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    assertions::assert_no_effects(&again);
    let confirm = reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    assertions::assert_no_effects(&confirm);

    assert_eq!(gateway.calls(), 1);
    let sent = &gateway.orders()[0];
    assert_eq!(sent.quantity_of(TicketId::new(2)), 2);
    assert_eq!(sent.current_user, Some(user()));
}

#[test]
fn test_edits_blocked_while_in_flight() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    reducer.reduce(&mut state, CheckoutAction::Submit, &env);

    reducer.reduce(
        &mut state,
        CheckoutAction::SetTicketQuantity {
            id: TicketId::new(1),
            quantity: 5,
        },
        &env,
    );
    reducer.reduce(
        &mut state,
        CheckoutAction::SetVisitDate {
            date: NaiveDate::from_ymd_opt(2025, 6, 1),
        },
        &env,
    );

    assert_eq!(state.order.quantity_of(TicketId::new(1)), 1);
    assert_eq!(state.order.date, None);
}

#[test]
fn test_navigation_blocked_while_in_flight() {
    let env = env_with(MockCheckoutGateway::failing(GatewayError::Network(
        "connection reset".into(),
    )));
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    reducer.reduce(&mut state, CheckoutAction::NextStep, &env);
    assert!(state.is_submitting());
    let session = state.session;

    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 0 }, &env);
    reducer.reduce(&mut state, CheckoutAction::PreviousStep, &env);
    assert_eq!(state.steps.position(), FlowStep::Step(3));

    reducer.reduce(
        &mut state,
        CheckoutAction::CheckoutFailed {
            session,
            reason: "Network error: connection reset".to_string(),
        },
        &env,
    );

    assert_eq!(state.steps.position(), FlowStep::Step(3));
    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 0 }, &env);
    assert_eq!(state.steps.position(), FlowStep::Step(0));
}

#[test]
fn test_success_completes_and_keeps_redirect() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    let session = state.session;

    reducer.reduce(
        &mut state,
        CheckoutAction::CheckoutSucceeded {
            session,
            redirect: CheckoutRedirect::new("https://pay.example/order/1"),
        },
        &env,
    );

    assert!(state.is_completed());
    assert_eq!(state.current_step(), None);
    assert_eq!(state.submission, SubmissionStatus::Succeeded);
    assert_eq!(state.redirect, Some(CheckoutRedirect::new("https://pay.example/order/1")));
    assert!(state.order.all_zero());

    // Nothing moves a completed flow
    reducer.reduce(&mut state, CheckoutAction::GoToStep { index: 1 }, &env);
    let effects = reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    assertions::assert_no_effects(&effects);
    assert_eq!(state.steps.position(), FlowStep::Completed);
}

#[test]
fn test_failure_keeps_step_and_allows_retry() {
    let gateway = MockCheckoutGateway::failing(GatewayError::Backend("Ticket sold out".into()));
    let env = env_with(gateway.clone());
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    let session = state.session;

    reducer.reduce(
        &mut state,
        CheckoutAction::CheckoutFailed {
            session,
            reason: "Backend error: Ticket sold out".to_string(),
        },
        &env,
    );

    assert_eq!(state.steps.position(), FlowStep::Step(3));
    assert!(matches!(state.submission, SubmissionStatus::Failed { .. }));
    assert_eq!(state.notifications[0].title, "Failed to checkout");

    reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    assert!(state.is_submitting());
    assert_eq!(gateway.calls(), 2);
}

#[test]
fn test_late_checkout_result_after_unmount_ignored() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    reducer.reduce(&mut state, CheckoutAction::Submit, &env);
    let stale = state.session;

    reducer.reduce(&mut state, CheckoutAction::Unmount, &env);
    reducer.reduce(
        &mut state,
        CheckoutAction::CheckoutSucceeded {
            session: stale,
            redirect: CheckoutRedirect::new("https://pay.example/late"),
        },
        &env,
    );

    assert!(!state.mounted);
    assert!(!state.is_completed());
    assert_eq!(state.redirect, None);
    assert_eq!(state.submission, SubmissionStatus::Idle);
}

#[test]
fn test_result_without_submission_ignored() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[(1, 1)]);
    let session = state.session;

    reducer.reduce(
        &mut state,
        CheckoutAction::CheckoutFailed {
            session,
            reason: "boom".to_string(),
        },
        &env,
    );

    assert_eq!(state.submission, SubmissionStatus::Idle);
    assert!(state.notifications.is_empty());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_dismiss_notification() {
    let env = env();
    let reducer = CheckoutFlowReducer::new();
    let mut state = at_summary(&env, &[]);
    let effects = reducer.reduce(&mut state, CheckoutAction::Submit, &env);

    // No TTL configured, so nothing is scheduled
    assert!(effects.iter().all(Effect::is_none));
    let id = state.notifications[0].id;

    reducer.reduce(&mut state, CheckoutAction::DismissNotification { id }, &env);
    assert!(state.notifications.is_empty());

    // Dismissing twice is harmless
    reducer.reduce(&mut state, CheckoutAction::DismissNotification { id }, &env);
    assert!(state.notifications.is_empty());
}
