//! Declarative route table.
//!
//! Maps URL paths to view identifiers and an access-control flag.
//! Patterns may contain `:name` segments that capture one path segment.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

/// Errors raised when building a route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route path '{path}' must start with '/'")]
    InvalidPath { path: String },

    #[error("Route path '{path}' is declared more than once")]
    DuplicatePath { path: String },

    #[error("Route name '{name}' is declared more than once")]
    DuplicateName { name: String },
}

/// Opaque view identifier rendered for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Group,
    OneGroup,
    Course,
    Attendance,
    Payme,
    Users,
    Teacher,
}

impl View {
    /// Component name as known to the view layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Group => "Group",
            Self::OneGroup => "OneGroup",
            Self::Course => "Course",
            Self::Attendance => "AttendanceView",
            Self::Payme => "Payme",
            Self::Users => "UserView",
            Self::Teacher => "Teacher",
        }
    }
}

/// One navigable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Slash-prefixed pattern, e.g. `/group/:id`.
    pub path: String,
    /// Unique route name.
    pub name: String,
    pub view: View,
    /// Whether the route is only reachable with an authenticated session.
    pub requires_auth: bool,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
            requires_auth: false,
        }
    }

    /// Mark the route as requiring authentication.
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Match a concrete path against this entry's pattern.
    ///
    /// Returns the captured `:param` segments on success.
    fn capture(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = self.path.split('/').collect();
        let actual: Vec<&str> = path.split('/').collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, segment) in pattern.iter().zip(&actual) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    if segment.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), (*segment).to_string());
                }
                None if expected == segment => {}
                None => return None,
            }
        }
        Some(params)
    }
}

/// A route matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub entry: &'a RouteEntry,
    pub params: BTreeMap<String, String>,
}

impl ResolvedRoute<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered, immutable set of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table, checking that every path is slash-prefixed and that
    /// paths and names are unique.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();

        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(RouteError::InvalidPath {
                    path: entry.path.clone(),
                });
            }
            if !paths.insert(entry.path.as_str()) {
                return Err(RouteError::DuplicatePath {
                    path: entry.path.clone(),
                });
            }
            if !names.insert(entry.name.as_str()) {
                return Err(RouteError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The application's route table.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                RouteEntry::new("/home", "home", View::Home).protected(),
                RouteEntry::new("/group", "group", View::Group).protected(),
                RouteEntry::new("/group/:id", "onegroup", View::OneGroup).protected(),
                RouteEntry::new("/course", "course", View::Course).protected(),
                RouteEntry::new("/attendance", "attendance", View::Attendance),
                RouteEntry::new("/payme", "payme", View::Payme),
                RouteEntry::new("/users", "users", View::Users),
                RouteEntry::new("/teacher", "teacher", View::Teacher),
            ],
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Look up an entry by its declared pattern (no parameter matching).
    pub fn by_path(&self, pattern: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.path == pattern)
    }

    /// Resolve a concrete path to the first entry whose pattern matches.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        self.entries.iter().find_map(|entry| {
            entry
                .capture(path)
                .map(|params| ResolvedRoute { entry, params })
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}
