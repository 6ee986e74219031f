use std::sync::Arc;

use booky_domain::{LibraryFilter, ProfileView};
use tracing::warn;

use crate::ApplicationResult;
use crate::context::AppContext;

/// The session user's own profile page.
#[derive(Clone)]
pub struct ProfileController {
    ctx: Arc<AppContext>,
}

impl ProfileController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads library, joined communities and exchanges to fill the header
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::SessionMissing`] when signed out,
    /// otherwise the first failed load.
    pub async fn load(&self) -> ApplicationResult<ProfileView> {
        let user = self.ctx.require_user().await?;
        let api = self.ctx.api();
        let all = LibraryFilter::default();
        let (library, communities, exchanges) = tokio::join!(
            api.user_library(&user.id, &all),
            api.user_communities(&user.id),
            api.user_exchanges(&user.id)
        );
        let view = match (library, communities, exchanges) {
            (Ok(library), Ok(communities), Ok(exchanges)) => {
                let view = ProfileView::new(&user, &library, &communities, &exchanges);
                self.ctx.set_library(library).await;
                view
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                warn!(error = %e, "profile load failed");
                self.ctx.update_screen(|s| s.profile = None).await;
                return Err(e);
            }
        };
        self.ctx
            .update_screen(|s| s.profile = Some(view.clone()))
            .await;
        Ok(view)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use booky_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_load_counts() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(
            HttpMethod::Get,
            "/books/library/u1",
            200,
            json!([
                {"id": 1, "status": "READ", "book": {"id": "b1"}},
                {"id": 2, "status": "READING", "book": {"id": "b2"}}
            ]),
        );
        harness
            .http
            .respond(HttpMethod::Get, "/communities/user/u1", 200, json!([{"id": 1}]));
        harness.http.respond(
            HttpMethod::Get,
            "/exchanges/users/u1",
            200,
            json!([{"id": "e1", "requesterId": "u1", "ownerId": "u2", "status": "PENDING"}]),
        );

        let view = ProfileController::new(harness.ctx.clone())
            .load()
            .await
            .unwrap();
        assert_eq!(view.name, "Name u1");
        assert_eq!(view.handle, "@user-u1");
        assert_eq!(view.total_books, 2);
        assert_eq!(view.books_read, 1);
        assert_eq!(view.communities_joined, 1);
        assert_eq!(view.exchanges, 1);
        assert_eq!(harness.ctx.screen().await.profile, Some(view));
    }

    #[tokio::test]
    async fn test_load_failure_clears_profile() {
        let harness = Harness::signed_in("u1").await;
        assert!(ProfileController::new(harness.ctx.clone()).load().await.is_err());
        assert_eq!(harness.ctx.screen().await.profile, None);
    }
}
