use booky_domain::{ApiRequest, GamificationProfile, UserAchievement};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `GET /gamification/profile/{userId}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn gamification_profile(&self, user_id: &str) -> ApplicationResult<GamificationProfile> {
        self.send(ApiRequest::get(format!("/gamification/profile/{user_id}")))
            .await
    }

    /// `GET /gamification/achievements/{userId}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_achievements(&self, user_id: &str) -> ApplicationResult<Vec<UserAchievement>> {
        self.send_list(ApiRequest::get(format!("/gamification/achievements/{user_id}")))
            .await
    }
}
