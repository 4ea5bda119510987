//! Base trait for store state.

/// Marker trait for state held by a store.
///
/// Snapshots are cloned out for readers and compared in tests, so the
/// state must be `Clone + PartialEq`, and `Default` is the initial value.
pub trait StoreState: Clone + PartialEq + Default {}
