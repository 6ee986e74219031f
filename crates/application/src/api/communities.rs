use booky_domain::{ApiRequest, Community, NewCommunity};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `GET /communities`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn communities(&self) -> ApplicationResult<Vec<Community>> {
        self.send_list(ApiRequest::get("/communities")).await
    }

    /// `GET /communities/user/{id}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_communities(&self, user_id: &str) -> ApplicationResult<Vec<Community>> {
        self.send_list(ApiRequest::get(format!("/communities/user/{user_id}")))
            .await
    }

    /// `POST /communities`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn create_community(&self, community: &NewCommunity) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post("/communities").with_json(community)?)
            .await
    }

    /// `POST /communities/{id}/join`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn join_community(&self, community_id: &str) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post(format!("/communities/{community_id}/join")))
            .await
    }

    /// `DELETE /communities/{id}/leave`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn leave_community(&self, community_id: &str) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::delete(format!("/communities/{community_id}/leave")))
            .await
    }
}
