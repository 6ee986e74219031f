//! Booky - terminal client wiring
//!
//! Builds the dashboard from settings and the infrastructure adapters, and
//! renders the screen state as text.

pub mod render;

use std::path::PathBuf;
use std::sync::Arc;

use booky_application::ports::{
    HttpClient, HttpClientError, KeyValueStorage, LoadingIndicator, Notifier,
};
use booky_application::{AppContext, BookyApi, Dashboard, SessionHandle, SessionManager};
use booky_domain::ClientSettings;
use booky_infrastructure::{
    FileKeyValueStorage, MemoryKeyValueStorage, ReqwestHttpClient, TracingLoadingIndicator,
    TracingNotifier, default_storage_dir,
};
use tracing::{info, warn};

/// Environment variable holding the login email.
pub const EMAIL_VAR: &str = "BOOKY_EMAIL";

/// Environment variable holding the login password.
pub const PASSWORD_VAR: &str = "BOOKY_PASSWORD";

/// Adapters the dashboard is built from.
pub struct Adapters {
    /// Backend transport
    pub http: Arc<dyn HttpClient>,
    /// Session storage
    pub storage: Arc<dyn KeyValueStorage>,
    /// Toast sink
    pub notifier: Arc<dyn Notifier>,
    /// Busy indicator
    pub loading: Arc<dyn LoadingIndicator>,
}

impl Adapters {
    /// Production adapters for `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, HttpClientError> {
        Ok(Self {
            http: Arc::new(ReqwestHttpClient::new(settings)?),
            storage: storage_for(settings),
            notifier: Arc::new(TracingNotifier),
            loading: Arc::new(TracingLoadingIndicator::new()),
        })
    }
}

/// Picks the session storage: the configured directory, else the platform
/// config directory, else memory.
#[must_use]
pub fn storage_for(settings: &ClientSettings) -> Arc<dyn KeyValueStorage> {
    let dir: Option<PathBuf> = settings.storage_dir.clone().or_else(default_storage_dir);
    if let Some(dir) = dir {
        let storage = FileKeyValueStorage::in_dir(dir);
        info!(path = %storage.path().display(), "session storage");
        Arc::new(storage)
    } else {
        warn!("no config directory, session will not persist");
        Arc::new(MemoryKeyValueStorage::new())
    }
}

/// Wires the API client, context and controllers.
#[must_use]
pub fn build_dashboard(adapters: Adapters) -> Dashboard {
    let session = SessionHandle::new();
    let api = BookyApi::new(
        adapters.http,
        session,
        adapters.notifier.clone(),
        adapters.loading,
    );
    let ctx = AppContext::new(api, SessionManager::new(adapters.storage), adapters.notifier);
    Dashboard::new(Arc::new(ctx))
}

/// Loads the panels outside the initial dashboard set.
///
/// Each failure is already shown in its panel.
pub async fn load_screens(dashboard: &Dashboard) {
    let c = dashboard.controllers();
    let (_, _, _, _, profile) = tokio::join!(
        c.communities.load(),
        c.clubs.load(),
        c.posts.load(None),
        c.exchanges.load(),
        c.profile.load()
    );
    if let Err(e) = profile {
        warn!(error = %e, "profile load failed");
    }
}
