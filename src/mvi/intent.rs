//! Base trait for intents dispatched to a store.

/// Marker trait for intent objects.
///
/// Intents are either explicit calls made by the host (`add_active`)
/// or events observed from a collaborator (a path change).
pub trait Intent {}
