//! In-process router.
//!
//! Holds the current path, notifies registered listeners of every change
//! and performs the navigations those listeners request. Listeners run to
//! completion one at a time; requested redirects are queued and applied
//! after the notification round that produced them.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, warn};

use crate::routes::{ResolvedRoute, RouteEntry, RouteTable};

/// Upper bound on chained redirects triggered by a single navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("Path '{path}' must start with '/'")]
    InvalidPath { path: String },

    #[error("Redirect limit of {limit} exceeded while navigating to '{path}'")]
    RedirectLoop { path: String, limit: usize },
}

/// Result of a single `push`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The current path changed and listeners were notified.
    Changed,
    /// The target equals the current path; nothing happened.
    Duplicate,
    /// The access guard refused the target route.
    Blocked { path: String },
}

/// Observer of the router's current path.
///
/// Called once at registration with the current path, then once per
/// change. Returning `Some(path)` asks the router to navigate there.
pub trait PathListener {
    fn on_path_change(&mut self, path: &str) -> Option<String>;
}

impl<F> PathListener for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn on_path_change(&mut self, path: &str) -> Option<String> {
        self(path)
    }
}

/// Decides whether a route that requires authentication may be entered.
pub trait AccessGuard {
    fn allows(&self, route: &RouteEntry) -> bool;
}

pub struct Router {
    table: RouteTable,
    current: String,
    listeners: Vec<Box<dyn PathListener>>,
    guard: Option<Box<dyn AccessGuard>>,
}

impl Router {
    pub fn new(table: RouteTable, initial_path: impl Into<String>) -> Result<Self, RouterError> {
        let current = initial_path.into();
        validate_path(&current)?;
        Ok(Self {
            table,
            current,
            listeners: Vec::new(),
            guard: None,
        })
    }

    /// Install an access guard consulted for routes with `requires_auth`.
    pub fn with_guard(mut self, guard: impl AccessGuard + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current_path(&self) -> &str {
        &self.current
    }

    /// Route matching the current path, if any.
    pub fn resolve_current(&self) -> Option<ResolvedRoute<'_>> {
        self.table.resolve(&self.current)
    }

    /// Register a listener and immediately notify it of the current path.
    pub fn subscribe(&mut self, listener: impl PathListener + 'static) -> Result<(), RouterError> {
        let mut listener: Box<dyn PathListener> = Box::new(listener);
        let redirect = listener.on_path_change(&self.current);
        self.listeners.push(listener);
        self.follow(redirect.into_iter().collect())
    }

    /// Navigate to `path`, then follow any redirects listeners request.
    pub fn push(&mut self, path: &str) -> Result<NavigationOutcome, RouterError> {
        let (outcome, redirects) = self.commit(path)?;
        self.follow(redirects)?;
        Ok(outcome)
    }

    fn commit(&mut self, path: &str) -> Result<(NavigationOutcome, VecDeque<String>), RouterError> {
        validate_path(path)?;

        if path == self.current {
            return Ok((NavigationOutcome::Duplicate, VecDeque::new()));
        }

        if let (Some(guard), Some(resolved)) = (&self.guard, self.table.resolve(path)) {
            if resolved.entry.requires_auth && !guard.allows(resolved.entry) {
                warn!(path, route = %resolved.entry.name, "navigation blocked by access guard");
                return Ok((
                    NavigationOutcome::Blocked {
                        path: path.to_string(),
                    },
                    VecDeque::new(),
                ));
            }
        }

        debug!(from = %self.current, to = path, "navigating");
        self.current = path.to_string();

        let mut redirects = VecDeque::new();
        for listener in &mut self.listeners {
            if let Some(target) = listener.on_path_change(&self.current) {
                redirects.push_back(target);
            }
        }
        Ok((NavigationOutcome::Changed, redirects))
    }

    fn follow(&mut self, mut pending: VecDeque<String>) -> Result<(), RouterError> {
        let mut hops = 0;
        while let Some(target) = pending.pop_front() {
            hops += 1;
            if hops > MAX_REDIRECTS {
                return Err(RouterError::RedirectLoop {
                    path: target,
                    limit: MAX_REDIRECTS,
                });
            }
            debug!(to = %target, "following redirect");
            let (_, more) = self.commit(&target)?;
            pending.extend(more);
        }
        Ok(())
    }
}

fn validate_path(path: &str) -> Result<(), RouterError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(RouterError::InvalidPath {
            path: path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl PathListener + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = move |path: &str| {
            sink.lock().push(path.to_string());
            None::<String>
        };
        (seen, listener)
    }

    struct DenyAll;

    impl AccessGuard for DenyAll {
        fn allows(&self, _route: &RouteEntry) -> bool {
            false
        }
    }

    #[test]
    fn subscribe_fires_immediately_then_per_change() {
        let mut router = Router::new(RouteTable::builtin(), "/course").unwrap();
        let (seen, listener) = recorder();
        router.subscribe(listener).unwrap();
        router.push("/group").unwrap();
        router.push("/users").unwrap();
        assert_eq!(*seen.lock(), vec!["/course", "/group", "/users"]);
    }

    #[test]
    fn duplicate_push_does_not_notify() {
        let mut router = Router::new(RouteTable::builtin(), "/home").unwrap();
        let (seen, listener) = recorder();
        router.subscribe(listener).unwrap();
        assert_eq!(router.push("/home").unwrap(), NavigationOutcome::Duplicate);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn listeners_notified_in_registration_order() {
        let mut router = Router::new(RouteTable::builtin(), "/home").unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = Arc::clone(&order);
            router
                .subscribe(move |_: &str| {
                    order.lock().push(tag);
                    None::<String>
                })
                .unwrap();
        }
        order.lock().clear();
        router.push("/payme").unwrap();
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn redirect_is_followed_after_notification_round() {
        let mut router = Router::new(RouteTable::builtin(), "/").unwrap();
        router
            .subscribe(|path: &str| (path == "/").then(|| "/home".to_string()))
            .unwrap();
        assert_eq!(router.current_path(), "/home");
    }

    #[test]
    fn redirect_loop_is_reported() {
        let mut router = Router::new(RouteTable::builtin(), "/home").unwrap();
        router
            .subscribe(|path: &str| match path {
                "/a" => Some("/b".to_string()),
                "/b" => Some("/a".to_string()),
                _ => None,
            })
            .unwrap();
        let err = router.push("/a").unwrap_err();
        assert!(matches!(err, RouterError::RedirectLoop { limit: MAX_REDIRECTS, .. }));
    }

    #[test]
    fn relative_path_is_rejected() {
        let mut router = Router::new(RouteTable::builtin(), "/home").unwrap();
        assert_eq!(
            router.push("course"),
            Err(RouterError::InvalidPath {
                path: "course".to_string()
            })
        );
        assert!(Router::new(RouteTable::builtin(), "home").is_err());
    }

    #[test]
    fn guard_blocks_protected_routes_only() {
        let mut router = Router::new(RouteTable::builtin(), "/attendance")
            .unwrap()
            .with_guard(DenyAll);
        assert_eq!(
            router.push("/group/3").unwrap(),
            NavigationOutcome::Blocked {
                path: "/group/3".to_string()
            }
        );
        assert_eq!(router.current_path(), "/attendance");
        assert_eq!(router.push("/teacher").unwrap(), NavigationOutcome::Changed);
    }

    #[test]
    fn unknown_paths_are_accepted() {
        let mut router = Router::new(RouteTable::builtin(), "/home").unwrap();
        assert_eq!(router.push("/nowhere").unwrap(), NavigationOutcome::Changed);
        assert_eq!(router.current_path(), "/nowhere");
        assert!(router.resolve_current().is_none());
    }
}
