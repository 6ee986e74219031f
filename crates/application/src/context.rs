//! Shared application state.
//!
//! The browser client kept the session user, cached lists and the rendered
//! DOM in globals. Here they live in one [`AppContext`] shared by every
//! controller. Locks are only held between awaits, never across a call.

use std::sync::Arc;

use booky_domain::{Community, ScreenState, Toast, User, UserBook, UserPreview};
use tokio::sync::RwLock;
use tracing::warn;

use crate::api::BookyApi;
use crate::session::{SessionHandle, SessionManager};
use crate::ports::Notifier;
use crate::{ApplicationError, ApplicationResult};

#[derive(Debug, Default)]
struct Cache {
    library: Vec<UserBook>,
    following: Vec<UserPreview>,
    communities: Vec<Community>,
}

/// Everything controllers share.
pub struct AppContext {
    api: BookyApi,
    sessions: SessionManager,
    notifier: Arc<dyn Notifier>,
    cache: RwLock<Cache>,
    screen: RwLock<ScreenState>,
}

impl AppContext {
    /// Creates a context with empty caches and an idle screen.
    #[must_use]
    pub fn new(api: BookyApi, sessions: SessionManager, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            sessions,
            notifier,
            cache: RwLock::new(Cache::default()),
            screen: RwLock::new(ScreenState::default()),
        }
    }

    /// The API client.
    #[must_use]
    pub const fn api(&self) -> &BookyApi {
        &self.api
    }

    /// The persisted-session manager.
    #[must_use]
    pub const fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// The in-memory session.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::SessionMissing`] when signed out.
    pub async fn require_user(&self) -> ApplicationResult<User> {
        self.session().require_user().await
    }

    /// Shows a toast.
    pub fn notify(&self, toast: Toast) {
        self.notifier.notify(toast);
    }

    /// Reports a failed user action.
    ///
    /// Local rejections become a warning carrying the reason. Remote failures
    /// already raised a generic toast in the API client, so they only add
    /// `context` as an error toast.
    pub fn report(&self, context: &str, error: &ApplicationError) {
        if error.is_local() {
            self.notify(Toast::warning(error.to_string()));
        } else {
            warn!(error = %error, "{context}");
            self.notify(Toast::error(context));
        }
    }

    /// Rejects user input before any network call, with a warning toast.
    pub fn reject(&self, message: impl Into<String>) -> ApplicationError {
        let message = message.into();
        self.notify(Toast::warning(message.clone()));
        ApplicationError::Validation(message)
    }

    /// Snapshot of the rendered state.
    pub async fn screen(&self) -> ScreenState {
        self.screen.read().await.clone()
    }

    /// Applies `f` to the rendered state.
    pub async fn update_screen<R>(&self, f: impl FnOnce(&mut ScreenState) -> R) -> R {
        f(&mut *self.screen.write().await)
    }

    /// Last loaded library of the session user.
    pub async fn library(&self) -> Vec<UserBook> {
        self.cache.read().await.library.clone()
    }

    pub(crate) async fn set_library(&self, library: Vec<UserBook>) {
        self.cache.write().await.library = library;
    }

    /// Users the session user follows, as last loaded.
    pub async fn following(&self) -> Vec<UserPreview> {
        self.cache.read().await.following.clone()
    }

    /// Returns true if the session user follows `user_id`.
    pub async fn is_following(&self, user_id: &str) -> bool {
        self.cache
            .read()
            .await
            .following
            .iter()
            .any(|u| u.id == user_id)
    }

    pub(crate) async fn set_following(&self, following: Vec<UserPreview>) {
        self.cache.write().await.following = following;
    }

    /// Last loaded community list.
    pub async fn communities(&self) -> Vec<Community> {
        self.cache.read().await.communities.clone()
    }

    pub(crate) async fn set_communities(&self, communities: Vec<Community>) {
        self.cache.write().await.communities = communities;
    }

    /// Drops caches and rendered state.
    pub async fn reset(&self) {
        *self.cache.write().await = Cache::default();
        self.screen.write().await.reset();
    }
}
