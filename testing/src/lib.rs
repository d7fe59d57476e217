//! # Zooma Testing
//!
//! Testing utilities for reducers and flows built on `zooma-core`.
//!
//! This crate provides:
//! - A deterministic [`FixedClock`]
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use zooma_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(CheckoutFlowReducer)
//!     .with_env(test_environment())
//!     .given_state(mounted_state())
//!     .when_action(CheckoutAction::PreviousStep)
//!     .then_state(|state| assert!(state.steps.is_first()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use zooma_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making notification timestamps and
    /// submission times reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use zooma_testing::mocks::FixedClock;
    /// use zooma_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}


// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
