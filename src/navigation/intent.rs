use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Host-requested highlight. Any integer is accepted.
    SetActive(i32),
    /// The router's current path changed (or was observed at subscription).
    PathChanged(String),
}

impl Intent for NavigationIntent {}
