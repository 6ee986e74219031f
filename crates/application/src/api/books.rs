use booky_domain::{
    AddBookRequest, ApiRequest, Book, LibraryFilter, ReadingStatus, UpdateBookStatusRequest,
    UpdateExchangePreferenceRequest, UserBook,
};

use super::BookyApi;
use crate::{ApplicationError, ApplicationResult};

impl BookyApi {
    /// `GET /books/library/{userId}` with optional filters.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_library(
        &self,
        user_id: &str,
        filter: &LibraryFilter,
    ) -> ApplicationResult<Vec<UserBook>> {
        let mut request = ApiRequest::get(format!("/books/library/{user_id}"));
        request.query = filter.to_query();
        self.send_list(request).await
    }

    /// `POST /books/library`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn add_book_by_isbn(&self, isbn: &str, status: ReadingStatus) -> ApplicationResult<()> {
        let request = ApiRequest::post("/books/library").with_json(&AddBookRequest {
            isbn: isbn.to_string(),
            status,
        })?;
        self.send_unit(request).await
    }

    /// `GET /books/isbn/{isbn}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn book_by_isbn(&self, isbn: &str) -> ApplicationResult<Book> {
        self.send(ApiRequest::get(format!("/books/isbn/{isbn}"))).await
    }

    /// `GET /books/{bookId}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn book_by_id(&self, book_id: &str) -> ApplicationResult<Book> {
        self.send(ApiRequest::get(format!("/books/{book_id}"))).await
    }

    /// `PUT /books/{bookId}/status`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn update_book_status(
        &self,
        book_id: &str,
        status: ReadingStatus,
    ) -> ApplicationResult<()> {
        let request = ApiRequest::put(format!("/books/{book_id}/status"))
            .with_json(&UpdateBookStatusRequest { status })?;
        self.send_unit(request).await
    }

    /// `PUT /books/{bookId}/exchange`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn update_exchange_preference(
        &self,
        book_id: &str,
        wants_to_exchange: bool,
    ) -> ApplicationResult<()> {
        let request = ApiRequest::put(format!("/books/{book_id}/exchange"))
            .with_json(&UpdateExchangePreferenceRequest { wants_to_exchange })?;
        self.send_unit(request).await
    }

    /// `GET /books/search?q=`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank query, otherwise fails on
    /// transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn search_books(&self, query: &str) -> ApplicationResult<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApplicationError::validation("Enter a search term"));
        }
        self.send_list(ApiRequest::get("/books/search").with_query("q", query))
            .await
    }
}
