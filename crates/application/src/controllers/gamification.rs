use std::sync::Arc;

use booky_domain::{AchievementView, GamificationView, Panel};
use tracing::{debug, warn};

use crate::ApplicationResult;
use crate::context::AppContext;

/// Level, progress and achievements of the session user.
#[derive(Clone)]
pub struct GamificationController {
    ctx: Arc<AppContext>,
}

impl GamificationController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Reloads the panel for `user_id`.
    ///
    /// A failed achievements load only turns the achievements list into an
    /// error. A failed profile load puts the default panel (level 1, Novice)
    /// on screen and returns the error.
    ///
    /// # Errors
    ///
    /// Returns the profile load error.
    pub async fn refresh(&self, user_id: &str) -> ApplicationResult<GamificationView> {
        let api = self.ctx.api();
        let (profile, achievements) = tokio::join!(
            api.gamification_profile(user_id),
            api.user_achievements(user_id)
        );

        let achievements = match achievements {
            Ok(list) => Panel::from_items(
                list.iter().map(AchievementView::from).collect(),
                "No achievements yet. Keep reading!",
            ),
            Err(e) => {
                warn!(error = %e, "achievements load failed");
                Panel::error("Could not load achievements")
            }
        };

        match profile {
            Ok(profile) => {
                let view = GamificationView::new(&profile, achievements);
                debug!(level = view.level, progress = view.progress_percent, "gamification refreshed");
                self.ctx
                    .update_screen(|s| s.gamification = view.clone())
                    .await;
                Ok(view)
            }
            Err(e) => {
                warn!(error = %e, "gamification load failed, showing defaults");
                self.ctx
                    .update_screen(|s| s.gamification = GamificationView::default())
                    .await;
                Err(e)
            }
        }
    }

    /// Reloads the panel for the session user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::SessionMissing`] when signed out,
    /// otherwise the profile load error.
    pub async fn refresh_current(&self) -> ApplicationResult<GamificationView> {
        let user = self.ctx.require_user().await?;
        self.refresh(&user.id).await
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
    async fn test_refresh_builds_progress() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(
            HttpMethod::Get,
            "/gamification/profile/u1",
            200,
            json!({
                "userId": "u1",
                "totalPoints": 150,
                "currentLevel": 2,
                "userLevel": {"level": 2, "name": "Reader", "minPoints": 100, "maxPoints": 200},
                "pointsToNextLevel": 50
            }),
        );
        harness.http.respond(
            HttpMethod::Get,
            "/gamification/achievements/u1",
            200,
            json!([{"id": "a1", "achievement": {"name": "First book", "pointsReward": 10}}]),
        );

        let view = GamificationController::new(harness.ctx.clone())
            .refresh_current()
            .await
            .unwrap();
        assert_eq!(view.level, 2);
        assert_eq!(view.level_name, "Reader");
        assert!((view.progress_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(view.points_label, "150 / 200 points");
        assert_eq!(view.achievements.items()[0].name, "First book");
        assert_eq!(harness.ctx.screen().await.gamification, view);
    }

    #[tokio::test]
    async fn test_profile_failure_falls_back_to_defaults() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Get, "/gamification/achievements/u1", 200, json!([]));

        let result = GamificationController::new(harness.ctx.clone())
            .refresh("u1")
            .await;
        assert!(result.is_err());
        let screen = harness.ctx.screen().await;
        assert_eq!(screen.gamification, GamificationView::default());
        assert_eq!(screen.gamification.level_name, "Novice");
    }

    #[tokio::test]
    async fn test_achievements_failure_keeps_profile() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(
            HttpMethod::Get,
            "/gamification/profile/u1",
            200,
            json!({"totalPoints": 0, "currentLevel": 1}),
        );
        let view = GamificationController::new(harness.ctx.clone())
            .refresh("u1")
            .await
            .unwrap();
        assert_eq!(view.level, 1);
        assert!(view.achievements.is_error());
    }

    #[tokio::test]
    async fn test_refresh_current_requires_session() {
        let harness = Harness::new();
        let result = GamificationController::new(harness.ctx.clone())
            .refresh_current()
            .await;
        assert!(matches!(result, Err(crate::ApplicationError::SessionMissing)));
        assert!(harness.http.calls().is_empty());
    }
}
