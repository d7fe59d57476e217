//! The order aggregator: the cart a checkout flow builds up step by step.

use crate::types::{CatalogTicket, CurrentUser, Money, OrderTicket, TicketId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Tickets, visit date and buyer collected by the checkout
///
/// `tickets` holds one line per catalog ticket type, in catalog order, with
/// zero quantities for types the customer has not picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Signed-in buyer; `None` means not authenticated
    pub current_user: Option<CurrentUser>,
    /// Day of the visit
    pub date: Option<NaiveDate>,
    /// One line per catalog ticket type
    pub tickets: Vec<OrderTicket>,
}

impl Order {
    /// Rebuild the ticket lines from a freshly fetched catalog
    ///
    /// Lines follow catalog order. Quantities already in the order are kept
    /// for every id the catalog still offers; new ids start at zero and ids the
    /// catalog dropped disappear. When the catalog repeats an id, the first
    /// entry wins.
    pub fn set_tickets(&mut self, catalog: impl IntoIterator<Item = CatalogTicket>) {
        let chosen: HashMap<TicketId, u32> = self
            .tickets
            .iter()
            .map(|ticket| (ticket.id, ticket.quantity))
            .collect();
        let mut seen = HashSet::new();

        self.tickets = catalog
            .into_iter()
            .filter(|ticket| seen.insert(ticket.id))
            .map(|ticket| {
                let quantity = chosen.get(&ticket.id).copied().unwrap_or(0);
                OrderTicket::from_catalog(ticket, quantity)
            })
            .collect();
    }

    /// Set the quantity of one ticket type
    ///
    /// Negative input clamps to zero and anything above `u32::MAX` clamps to
    /// `u32::MAX`. Returns the stored quantity, or `None` when the order has
    /// no line for `id`.
    pub fn set_ticket_quantity(&mut self, id: TicketId, quantity: i64) -> Option<u32> {
        let line = self.tickets.iter_mut().find(|ticket| ticket.id == id)?;
        line.quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        Some(line.quantity)
    }

    /// Set the visit date
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Set or clear the buyer
    pub fn set_current_user(&mut self, user: Option<CurrentUser>) {
        self.current_user = user;
    }

    /// Line for a ticket type
    #[must_use]
    pub fn ticket(&self, id: TicketId) -> Option<&OrderTicket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    /// Chosen quantity of a ticket type, zero when absent
    #[must_use]
    pub fn quantity_of(&self, id: TicketId) -> u32 {
        self.ticket(id).map_or(0, |ticket| ticket.quantity)
    }

    /// Whether no ticket has been picked
    #[must_use]
    pub fn all_zero(&self) -> bool {
        self.tickets.iter().all(|ticket| ticket.quantity == 0)
    }

    /// Number of tickets picked across all types
    #[must_use]
    pub fn ticket_count(&self) -> u64 {
        self.tickets
            .iter()
            .map(|ticket| u64::from(ticket.quantity))
            .fold(0, u64::saturating_add)
    }

    /// Order total
    #[must_use]
    pub fn total(&self) -> Money {
        self.tickets
            .iter()
            .map(OrderTicket::subtotal)
            .fold(Money::ZERO, Money::saturating_add)
    }

    /// Drop every choice while keeping the catalog lines
    pub fn reset(&mut self) {
        for ticket in &mut self.tickets {
            ticket.quantity = 0;
        }
        self.date = None;
        self.current_user = None;
    }
}
