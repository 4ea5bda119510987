//! Model-View-Intent primitives shared by the stores.
//!
//! Stores own a state value and change it only by dispatching intents
//! through a reducer.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Observer
//!    ↑                                │
//!    └────────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
