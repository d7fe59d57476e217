//! Step orchestration for multi-step flows.
//!
//! A [`StepSequence`] walks a fixed number of ordered steps. Its position is a
//! single tagged value, [`FlowStep`], so "completed" can never coexist with a
//! stale step index. Navigation clamps instead of failing: deep links and
//! step-indicator clicks may ask for any index.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Number of steps in the ticket checkout
pub const CHECKOUT_STEPS: NonZeroUsize = match NonZeroUsize::new(CheckoutStep::ALL.len()) {
    Some(total) => total,
    None => NonZeroUsize::MIN,
};

/// Position of a flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStep {
    /// Showing the step at this zero-based index
    Step(usize),
    /// The flow finished; only the success view is shown
    Completed,
}

/// Outcome of [`StepSequence::next`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward to this index
    Moved(usize),
    /// Already on the last step; the caller decides whether to complete
    AwaitingConfirmation,
    /// The flow is already completed
    Ignored,
}

/// A fixed-length sequence of steps and the current position in it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSequence {
    total: NonZeroUsize,
    position: FlowStep,
}

impl StepSequence {
    /// Start at the first of `total` steps
    #[must_use]
    pub const fn new(total: NonZeroUsize) -> Self {
        Self {
            total,
            position: FlowStep::Step(0),
        }
    }

    /// The four-step ticket checkout
    #[must_use]
    pub const fn checkout() -> Self {
        Self::new(CHECKOUT_STEPS)
    }

    /// Number of steps
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total.get()
    }

    /// Current position
    #[must_use]
    pub const fn position(&self) -> FlowStep {
        self.position
    }

    /// Current step index, `None` once completed
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        match self.position {
            FlowStep::Step(index) => Some(index),
            FlowStep::Completed => None,
        }
    }

    /// Whether the current step is the first one
    #[must_use]
    pub const fn is_first(&self) -> bool {
        matches!(self.position, FlowStep::Step(0))
    }

    /// Whether the current step is the last one
    #[must_use]
    pub const fn is_last(&self) -> bool {
        matches!(self.position, FlowStep::Step(index) if index + 1 == self.total.get())
    }

    /// Whether the flow has completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.position, FlowStep::Completed)
    }

    /// Move forward one step
    ///
    /// On the last step the index stays put and
    /// [`Advance::AwaitingConfirmation`] is returned; completing is up to the
    /// caller.
    pub fn next(&mut self) -> Advance {
        match self.position {
            FlowStep::Completed => Advance::Ignored,
            FlowStep::Step(_) if self.is_last() => Advance::AwaitingConfirmation,
            FlowStep::Step(index) => {
                let next = (index + 1).min(self.last_index());
                self.position = FlowStep::Step(next);
                Advance::Moved(next)
            },
        }
    }

    /// Move back one step; no-op on the first step or once completed
    pub fn previous(&mut self) {
        if let FlowStep::Step(index) = self.position {
            self.position = FlowStep::Step(index.saturating_sub(1));
        }
    }

    /// Jump to `index`, clamped into `[0, total - 1]`
    ///
    /// Returns the index actually selected, or `None` once completed.
    pub fn go_to(&mut self, index: i64) -> Option<usize> {
        if self.is_completed() {
            return None;
        }

        let clamped = if index < 0 {
            0
        } else {
            usize::try_from(index)
                .unwrap_or(usize::MAX)
                .min(self.last_index())
        };
        self.position = FlowStep::Step(clamped);
        Some(clamped)
    }

    /// One-way transition to [`FlowStep::Completed`]
    pub const fn mark_completed(&mut self) {
        self.position = FlowStep::Completed;
    }

    /// Back to the first step, leaving completion behind
    pub const fn reset(&mut self) {
        self.position = FlowStep::Step(0);
    }

    const fn last_index(&self) -> usize {
        self.total.get() - 1
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::checkout()
    }
}

/// Turn the 1-indexed `step` query parameter into a `go_to` target
///
/// A missing parameter reads as `"0"` and anything unparsable as `0`, so both
/// land on `-1`, which `go_to` clamps to the first step.
#[must_use]
pub fn resume_index(param: Option<&str>) -> i64 {
    param
        .unwrap_or("0")
        .trim()
        .parse::<i64>()
        .unwrap_or(0)
        .saturating_sub(1)
}

/// The steps of the ticket checkout, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Choose ticket quantities
    Tickets,
    /// Pick the visit date
    Date,
    /// Confirm who is buying
    YourInfo,
    /// Review and confirm
    Summary,
}

impl CheckoutStep {
    /// Every step in display order
    pub const ALL: [Self; 4] = [Self::Tickets, Self::Date, Self::YourInfo, Self::Summary];

    /// Step at a zero-based index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based index of this step
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sidebar title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Tickets => "Tickets",
            Self::Date => "Date",
            Self::YourInfo => "Your info",
            Self::Summary => "Summary",
        }
    }

    /// Sidebar description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Tickets => "Choose your tickets",
            Self::Date => "Pick the day of your visit",
            Self::YourInfo => "Tell us who is coming",
            Self::Summary => "Review and confirm your order",
        }
    }
}
