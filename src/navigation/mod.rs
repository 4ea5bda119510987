//! Navigation-highlight store.
//!
//! Keeps the index of the highlighted top-level section in step with the
//! router's current path.

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::NavigationIntent;
pub use reducer::{action_for, NavigationReducer, PathAction, HOME_PATH};
pub use state::{NavigationState, Section};
pub use store::NavigationStore;
