//! Session state shared by the API client and controllers.

use std::sync::Arc;

use booky_domain::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, Session, User};
use tokio::sync::RwLock;

use crate::ports::{KeyValueStorage, StorageError};
use crate::{ApplicationError, ApplicationResult};

/// Shared, clonable handle to the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// Creates an empty handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a session.
    pub async fn set(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    /// Removes the session.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Returns a copy of the current session.
    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    /// Returns the bearer token, if signed in.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Returns the signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Returns true when a session is installed.
    pub async fn is_active(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Returns the signed-in user or fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::SessionMissing`] when signed out.
    pub async fn require_user(&self) -> ApplicationResult<User> {
        self.user().await.ok_or(ApplicationError::SessionMissing)
    }
}

/// Mirrors the session into key-value storage under two keys.
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionManager {
    /// Creates a manager over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Writes both keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be serialized or storage fails.
    pub async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(AUTH_TOKEN_KEY, &session.token).await?;
        self.storage.set_item(CURRENT_USER_KEY, &user).await
    }

    /// Reads the stored session.
    ///
    /// Returns `None` unless both keys are present and the user parses.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn load(&self) -> Result<Option<Session>, StorageError> {
        let token = self.storage.get_item(AUTH_TOKEN_KEY).await?;
        let user = self.storage.get_item(CURRENT_USER_KEY).await?;
        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&user) {
            Ok(user) => Ok(Some(Session::new(token, user))),
            Err(e) => {
                tracing::warn!(error = %e, "stored user is unreadable, ignoring session");
                Ok(None)
            }
        }
    }

    /// Removes both keys.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(AUTH_TOKEN_KEY).await?;
        self.storage.remove_item(CURRENT_USER_KEY).await
    }
}
