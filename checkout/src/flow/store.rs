//! Store wiring for the checkout flow.

use crate::flow::{CheckoutAction, CheckoutEnvironment, CheckoutFlowReducer, CheckoutFlowState};
use zooma_runtime::Store;

/// Store running one checkout flow
pub type CheckoutStore =
    Store<CheckoutFlowState, CheckoutAction, CheckoutEnvironment, CheckoutFlowReducer>;

/// Create a store for an unmounted checkout flow.
///
/// Send [`CheckoutAction::Mount`] to start it.
#[must_use]
pub fn checkout_store(env: CheckoutEnvironment) -> CheckoutStore {
    Store::new(CheckoutFlowState::new(), CheckoutFlowReducer::new(), env)
}
