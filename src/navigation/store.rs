use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::mvi::Reducer;
use crate::navigation::intent::NavigationIntent;
use crate::navigation::reducer::NavigationReducer;
use crate::navigation::state::{NavigationState, Section};
use crate::router::PathListener;

/// Shared handle to the highlighted-section state.
///
/// Clones share state, so one handle can be subscribed to the router
/// while another is read by the host.
#[derive(Clone, Default)]
pub struct NavigationStore {
    inner: Arc<RwLock<NavigationState>>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> i32 {
        self.inner.read().active
    }

    pub fn section(&self) -> Option<Section> {
        self.inner.read().section()
    }

    pub fn snapshot(&self) -> NavigationState {
        self.inner.read().clone()
    }

    /// Set the highlight directly.
    pub fn add_active(&self, active: i32) {
        if Section::from_index(active).is_none() {
            debug!(active, "highlight set outside known sections");
        }
        self.dispatch(NavigationIntent::SetActive(active));
    }

    /// Apply the path rule and return the navigation it requests, if any.
    pub fn observe_path(&self, path: &str) -> Option<String> {
        let before = self.active();
        self.dispatch(NavigationIntent::PathChanged(path.to_string()));

        let mut state = self.inner.write();
        if state.active != before {
            debug!(path, from = before, to = state.active, "highlight changed");
        }
        state.redirect.take()
    }

    fn dispatch(&self, intent: NavigationIntent) {
        let mut state = self.inner.write();
        let current = std::mem::take(&mut *state);
        *state = NavigationReducer::reduce(current, intent);
    }
}

impl PathListener for NavigationStore {
    fn on_path_change(&mut self, path: &str) -> Option<String> {
        self.observe_path(path)
    }
}
