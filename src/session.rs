//! Authenticated session store.
//!
//! Holds the signed-in user and bearer token and mirrors both into
//! durable storage on every change. A store built with [`SessionStore::load`]
//! picks up whatever a previous process left behind.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::router::AccessGuard;
use crate::routes::RouteEntry;
use crate::storage::{KeyValueStorage, StorageError};

/// Storage key for the JSON-encoded user record.
pub const USER_KEY: &str = "user";
/// Storage key for the raw token string.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Session storage failed ({write}) and the previous user could not be restored: {restore}")]
    RestoreFailed {
        write: StorageError,
        #[source]
        restore: StorageError,
    },
}

/// Signed-in user as persisted under [`USER_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub role: String,
}

impl User {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }
}

/// Opaque bearer token.
///
/// Never printed through `Debug` or `Display`; use `expose()` to read it.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(••••••••)")
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<Token>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Shared handle to the session. Clones see the same session and storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    session: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Build a store hydrated from `storage`.
    ///
    /// A malformed user record is discarded. If only one of user and token
    /// is stored, the session starts signed out; storage is left as found.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self, SessionError> {
        let session = hydrate(storage.as_ref())?;
        Ok(Self {
            storage,
            session: Arc::new(RwLock::new(session)),
        })
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user.clone()
    }

    pub fn token(&self) -> Option<Token> {
        self.session.read().token.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Sign in: persist both fields, then publish them in memory.
    ///
    /// If the token cannot be written the stored user entry is put back to
    /// its previous value and the in-memory session is left unchanged.
    pub fn set_user(&self, user: User, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        let encoded = serde_json::to_string(&user)?;

        let previous = self.storage.get(USER_KEY)?;
        self.storage.set(USER_KEY, &encoded)?;
        if let Err(write) = self.storage.set(TOKEN_KEY, &token) {
            let restored = match &previous {
                Some(raw) => self.storage.set(USER_KEY, raw),
                None => self.storage.remove(USER_KEY),
            };
            return Err(match restored {
                Ok(()) => write.into(),
                Err(restore) => SessionError::RestoreFailed { write, restore },
            });
        }

        info!(email = %user.email, role = %user.role, "session started");
        *self.session.write() = Session {
            user: Some(user),
            token: Some(Token::new(token)),
        };
        Ok(())
    }

    /// Sign out: remove the token, clear memory, then remove the user entry.
    ///
    /// The token goes first. If it cannot be removed nothing has changed
    /// and the session stays signed in. Once it is gone the stored pair is
    /// incomplete and hydrates as signed out, so memory is cleared even if
    /// removing the user entry then fails.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.storage.remove(TOKEN_KEY)?;
        *self.session.write() = Session::default();
        self.storage.remove(USER_KEY)?;
        info!("session cleared");
        Ok(())
    }
}

impl AccessGuard for SessionStore {
    fn allows(&self, route: &RouteEntry) -> bool {
        !route.requires_auth || self.is_authenticated()
    }
}

fn hydrate(storage: &dyn KeyValueStorage) -> Result<Session, SessionError> {
    let user = match storage.get(USER_KEY)? {
        Some(raw) => match serde_json::from_str::<Option<User>>(&raw) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "discarding malformed stored user");
                None
            }
        },
        None => None,
    };
    let token = storage
        .get(TOKEN_KEY)?
        .filter(|t| !t.is_empty())
        .map(Token::new);

    match (user, token) {
        (Some(user), Some(token)) => Ok(Session {
            user: Some(user),
            token: Some(token),
        }),
        (None, None) => Ok(Session::default()),
        (user, token) => {
            warn!(
                has_user = user.is_some(),
                has_token = token.is_some(),
                "incomplete stored session, starting signed out"
            );
            Ok(Session::default())
        }
    }
}
