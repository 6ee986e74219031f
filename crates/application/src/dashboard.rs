//! Login, logout, session restore and the background refresh.

use std::sync::Arc;

use booky_domain::{Session, Toast, User};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::controllers::Controllers;
use crate::ApplicationResult;

/// What [`Dashboard::restore`] found.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// No usable stored session; show the login form.
    LoginRequired,
    /// The stored session was installed and the dashboard loaded.
    Restored(User),
}

/// Top-level session flow over all controllers.
#[derive(Clone)]
pub struct Dashboard {
    ctx: Arc<AppContext>,
    controllers: Controllers,
}

impl Dashboard {
    /// Creates the dashboard.
    #[must_use]
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let controllers = Controllers::new(&ctx);
        Self { ctx, controllers }
    }

    /// The shared context.
    #[must_use]
    pub const fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// The per-domain controllers.
    #[must_use]
    pub const fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    /// Restores the stored session.
    ///
    /// When the initial loads fail, the stored session is treated as stale:
    /// storage is cleared and the login screen is requested.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Storage`] if storage cannot be read.
    pub async fn restore(&self) -> ApplicationResult<RestoreOutcome> {
        let Some(session) = self.ctx.sessions().load().await? else {
            info!("no stored session");
            return Ok(RestoreOutcome::LoginRequired);
        };
        let user = session.user.clone();
        self.ctx.session().set(session).await;

        if !self.initial_loads(&user).await {
            warn!(user_id = %user.id, "stored session rejected, signing out");
            self.sign_out().await?;
            return Ok(RestoreOutcome::LoginRequired);
        }
        self.load_users().await;
        info!(user_id = %user.id, "session restored");
        Ok(RestoreOutcome::Restored(user))
    }

    /// Signs in, persists the session and loads the dashboard.
    ///
    /// Load failures after a successful sign-in are logged only.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank credentials (no network call),
    /// the API error, or a storage error.
    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(self.ctx.reject("Enter your email and password"));
        }
        let response = match self.ctx.api().sign_in(email, password).await {
            Ok(response) => response,
            Err(e) => {
                self.ctx.report("Sign-in failed", &e);
                return Err(e);
            }
        };

        let session = Session::new(response.token, response.user);
        self.ctx.sessions().save(&session).await?;
        let user = session.user.clone();
        self.ctx.session().set(session).await;
        self.ctx
            .notify(Toast::success(format!("Welcome, {}", user.full_name())));
        info!(user_id = %user.id, "signed in");

        if !self.initial_loads(&user).await {
            warn!(user_id = %user.id, "initial dashboard loads failed");
        }
        self.load_users().await;
        Ok(user)
    }

    /// Signs out and forgets every cached list.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the stored session cannot be removed.
    pub async fn logout(&self) -> ApplicationResult<()> {
        self.sign_out().await?;
        self.ctx.notify(Toast::info("Signed out"));
        info!("signed out");
        Ok(())
    }

    /// Re-fetches the gamification panel when signed in.
    pub async fn refresh_tick(&self) {
        let Some(user) = self.ctx.session().user().await else {
            return;
        };
        if let Err(e) = self.controllers.gamification.refresh(&user.id).await {
            warn!(error = %e, "periodic gamification refresh failed");
        }
    }

    async fn sign_out(&self) -> ApplicationResult<()> {
        self.ctx.session().clear().await;
        self.ctx.reset().await;
        self.ctx.sessions().clear().await?;
        Ok(())
    }

    /// Gamification and library, joined. Returns false if either failed.
    async fn initial_loads(&self, user: &User) -> bool {
        let (gamification, books) = tokio::join!(
            self.controllers.gamification.refresh(&user.id),
            self.controllers.books.load()
        );
        gamification.is_ok() && !books.is_error()
    }

    async fn load_users(&self) {
        if let Err(e) = self.controllers.users.load().await {
            warn!(error = %e, "user lists load failed");
        }
    }
}
