//! Reducer trait for store state transitions.

use super::intent::Intent;
use super::state::StoreState;

/// Reducer transforms state based on intents.
///
/// Must be a pure function: (State, Intent) -> State. Effects that a
/// transition requests are recorded in the returned state and carried
/// out by the owning store.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
