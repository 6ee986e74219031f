use booky_domain::{ApiRequest, NewReadingClub, ReadingClub};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `GET /reading-clubs`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn reading_clubs(&self) -> ApplicationResult<Vec<ReadingClub>> {
        self.send_list(ApiRequest::get("/reading-clubs")).await
    }

    /// `GET /reading-clubs/user/{id}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_reading_clubs(&self, user_id: &str) -> ApplicationResult<Vec<ReadingClub>> {
        self.send_list(ApiRequest::get(format!("/reading-clubs/user/{user_id}")))
            .await
    }

    /// `POST /reading-clubs`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn create_reading_club(&self, club: &NewReadingClub) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post("/reading-clubs").with_json(club)?)
            .await
    }

    /// `POST /reading-clubs/{id}/join`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn join_reading_club(&self, club_id: &str) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post(format!("/reading-clubs/{club_id}/join")))
            .await
    }

    /// `POST /reading-clubs/{id}/leave`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn leave_reading_club(&self, club_id: &str) -> ApplicationResult<()> {
        self.send_unit(ApiRequest::post(format!("/reading-clubs/{club_id}/leave")))
            .await
    }
}
