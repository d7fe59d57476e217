//! Property and scenario tests for steps, the order aggregator and validation.
//!
//! Run with: `cargo test --test order_properties_test`

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::num::NonZeroUsize;
use zooma_checkout::gateway::{StaticTicketCatalog, TicketCatalog};
use zooma_checkout::types::{CatalogTicket, CurrentUser, Money, TicketId};
use zooma_checkout::{
    Order, StepSequence, TicketRole, TicketRules, ValidationError, validate_for_submission,
};

fn catalog(ids: &[u32]) -> Vec<CatalogTicket> {
    ids.iter()
        .map(|&id| CatalogTicket::new(id, format!("Ticket {id}"), "", Money::from_dong(10_000)))
        .collect()
}

/// Signed-in order over tickets 1..=3 with the given quantities
fn order(adult: i64, child: i64, toddler: i64) -> Order {
    let mut order = Order::default();
    order.set_tickets(catalog(&[1, 2, 3]));
    order.set_ticket_quantity(TicketId::new(1), adult);
    order.set_ticket_quantity(TicketId::new(2), child);
    order.set_ticket_quantity(TicketId::new(3), toddler);
    order.set_current_user(Some(CurrentUser::new("u-1", "linh")));
    order
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_go_to_on_four_steps() {
    let mut steps = StepSequence::checkout();
    steps.go_to(-5);
    assert_eq!(steps.current(), Some(0));
    steps.go_to(99);
    assert_eq!(steps.current(), Some(3));
}

#[test]
fn test_unauthenticated_empty_cart_reports_authentication() {
    let mut empty = order(0, 0, 0);
    empty.set_current_user(None);

    assert_eq!(
        validate_for_submission(&empty, &TicketRules::default()),
        Err(ValidationError::AuthenticationRequired)
    );
}

#[test]
fn test_child_without_parent_scenario() {
    assert_eq!(
        validate_for_submission(&order(0, 2, 0), &TicketRules::default()),
        Err(ValidationError::ParentTicketRequired)
    );
}

#[test]
fn test_parent_with_child_scenario() {
    assert_eq!(validate_for_submission(&order(1, 2, 0), &TicketRules::default()), Ok(()));
}

#[test]
fn test_all_zero_scenario() {
    assert_eq!(
        validate_for_submission(&order(0, 0, 0), &TicketRules::default()),
        Err(ValidationError::EmptyCart)
    );
}

#[test]
fn test_edit_survives_fresh_catalog() {
    let source = StaticTicketCatalog::new(catalog(&[1, 2, 3]));
    let mut order = Order::default();

    order.set_tickets(tokio_test::block_on(source.fetch_catalog()).unwrap());
    order.set_ticket_quantity(TicketId::new(2), 3);
    order.set_tickets(tokio_test::block_on(source.fetch_catalog()).unwrap());

    assert_eq!(order.quantity_of(TicketId::new(2)), 3);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_go_to_always_clamps(total in 1usize..16, index in any::<i64>()) {
        let mut steps = StepSequence::new(NonZeroUsize::new(total).unwrap());
        let selected = steps.go_to(index).unwrap();

        prop_assert!(selected < total);
        if index <= 0 {
            prop_assert_eq!(selected, 0);
        } else if index as u64 >= total as u64 {
            prop_assert_eq!(selected, total - 1);
        } else {
            prop_assert_eq!(selected as i64, index);
        }
    }

    #[test]
    fn prop_navigation_stays_in_range(
        total in 1usize..8,
        moves in prop::collection::vec(0u8..3, 0..40),
    ) {
        let mut steps = StepSequence::new(NonZeroUsize::new(total).unwrap());
        for m in moves {
            match m {
                0 => { steps.next(); },
                1 => steps.previous(),
                _ => { steps.go_to(i64::from(m) * 7 - 10); },
            }
            let index = steps.current().unwrap();
            prop_assert!(index < total);
            prop_assert_eq!(steps.is_first(), index == 0);
            prop_assert_eq!(steps.is_last(), index == total - 1);
        }
    }

    #[test]
    fn prop_quantity_never_negative(quantity in any::<i64>()) {
        let mut order = order(0, 0, 0);
        let stored = order.set_ticket_quantity(TicketId::new(2), quantity).unwrap();

        let expected = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        prop_assert_eq!(stored, expected);
        prop_assert_eq!(order.quantity_of(TicketId::new(2)), expected);
    }

    #[test]
    fn prop_merge_is_idempotent(
        ids in prop::collection::vec(1u32..20, 0..10),
        edits in prop::collection::vec((1u32..20, 0i64..50), 0..10),
    ) {
        let mut order = Order::default();
        order.set_tickets(catalog(&ids));
        for (id, quantity) in edits {
            order.set_ticket_quantity(TicketId::new(id), quantity);
        }

        order.set_tickets(catalog(&ids));
        let once = order.clone();
        order.set_tickets(catalog(&ids));

        prop_assert_eq!(&order, &once);
    }

    #[test]
    fn prop_merge_covers_catalog_exactly(
        first in prop::collection::vec(1u32..20, 0..10),
        second in prop::collection::vec(1u32..20, 0..10),
        edits in prop::collection::vec((1u32..20, 1i64..50), 0..10),
    ) {
        let mut order = Order::default();
        order.set_tickets(catalog(&first));
        for &(id, quantity) in &edits {
            order.set_ticket_quantity(TicketId::new(id), quantity);
        }
        let before = order.clone();

        order.set_tickets(catalog(&second));

        let mut expected_ids = Vec::new();
        for id in &second {
            if !expected_ids.contains(id) {
                expected_ids.push(*id);
            }
        }
        let ids: Vec<u32> = order.tickets.iter().map(|t| t.id.value()).collect();
        prop_assert_eq!(ids, expected_ids);

        for line in &order.tickets {
            prop_assert_eq!(line.quantity, before.quantity_of(line.id));
        }
    }

    #[test]
    fn prop_validation_reasons_follow_precedence(
        signed_in in any::<bool>(),
        adult in 0i64..3,
        child in 0i64..3,
        toddler in 0i64..3,
    ) {
        let mut order = order(adult, child, toddler);
        if !signed_in {
            order.set_current_user(None);
        }
        let result = validate_for_submission(&order, &TicketRules::default());

        let expected = if !signed_in {
            Err(ValidationError::AuthenticationRequired)
        } else if adult + child + toddler == 0 {
            Err(ValidationError::EmptyCart)
        } else if adult == 0 {
            Err(ValidationError::ParentTicketRequired)
        } else {
            Ok(())
        };
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn prop_independent_tickets_never_trip_parent_rule(extra in 1i64..10) {
        let rules = TicketRules::new(TicketRole::Independent).with_role(1, TicketRole::Parent);
        let order = order(0, extra, extra);

        prop_assert_eq!(validate_for_submission(&order, &rules), Ok(()));
    }
}
