//! Wiring of router, navigation store and session store.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::navigation::NavigationStore;
use crate::router::{NavigationOutcome, Router, RouterError};
use crate::routes::RouteTable;
use crate::session::{SessionError, SessionStore};
use crate::storage::KeyValueStorage;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A running front-end core: the session is hydrated and the navigation
/// store is subscribed to the router.
pub struct App {
    router: Router,
    navigation: NavigationStore,
    session: SessionStore,
}

impl App {
    /// Hydrate the session and start the router on the configured path.
    ///
    /// The navigation store sees the initial path immediately, so starting
    /// on "/" ends on "/home".
    pub fn start(config: &Config, storage: Arc<dyn KeyValueStorage>) -> Result<Self, AppError> {
        let session = SessionStore::load(storage)?;
        let navigation = NavigationStore::new();

        let mut router = Router::new(RouteTable::builtin(), &config.navigation.initial_path)?;
        if config.navigation.enforce_auth {
            router = router.with_guard(session.clone());
        }
        router.subscribe(navigation.clone())?;

        debug!(
            path = router.current_path(),
            active = navigation.active(),
            "app started"
        );

        Ok(Self {
            router,
            navigation,
            session,
        })
    }

    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, AppError> {
        Ok(self.router.push(path)?)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn navigation(&self) -> &NavigationStore {
        &self.navigation
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
