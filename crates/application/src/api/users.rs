use booky_domain::{ApiRequest, FollowRequest, SearchUsersByBooksRequest, User, UserPreview};

use super::BookyApi;
use crate::{ApplicationError, ApplicationResult};

/// Shortest query accepted by `GET /users/search`.
pub const MIN_USER_QUERY_LEN: usize = 2;

impl BookyApi {
    /// `GET /users/{id}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_profile(&self, user_id: &str) -> ApplicationResult<User> {
        self.send(ApiRequest::get(format!("/users/{user_id}"))).await
    }

    /// `GET /users/search?q=`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for queries shorter than two characters,
    /// otherwise fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn search_users(&self, query: &str) -> ApplicationResult<Vec<UserPreview>> {
        let query = query.trim();
        if query.chars().count() < MIN_USER_QUERY_LEN {
            return Err(ApplicationError::validation(format!(
                "Search needs at least {MIN_USER_QUERY_LEN} characters"
            )));
        }
        self.send_list(ApiRequest::get("/users/search").with_query("q", query))
            .await
    }

    /// `POST /users/search-by-books`: users owning every listed book.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or blank id list, otherwise
    /// fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn search_users_by_books(
        &self,
        book_ids: &[String],
    ) -> ApplicationResult<Vec<UserPreview>> {
        if book_ids.is_empty() || book_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ApplicationError::validation(
                "Book ids are required and cannot be empty",
            ));
        }
        let request = ApiRequest::post("/users/search-by-books").with_json(
            &SearchUsersByBooksRequest {
                book_ids: book_ids.to_vec(),
            },
        )?;
        self.send_list(request).await
    }

    /// `POST /users/follow`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn follow(&self, user_id: &str) -> ApplicationResult<()> {
        let request = ApiRequest::post("/users/follow").with_json(&FollowRequest {
            target_user_id: user_id.to_string(),
        })?;
        self.send_unit(request).await
    }

    /// `POST /users/unfollow`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn unfollow(&self, user_id: &str) -> ApplicationResult<()> {
        let request = ApiRequest::post("/users/unfollow").with_json(&FollowRequest {
            target_user_id: user_id.to_string(),
        })?;
        self.send_unit(request).await
    }

    /// `GET /users/{id}/following`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn following(&self, user_id: &str) -> ApplicationResult<Vec<UserPreview>> {
        self.send_list(ApiRequest::get(format!("/users/{user_id}/following")))
            .await
    }

    /// `GET /users/{id}/followers`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn followers(&self, user_id: &str) -> ApplicationResult<Vec<UserPreview>> {
        self.send_list(ApiRequest::get(format!("/users/{user_id}/followers")))
            .await
    }
}
