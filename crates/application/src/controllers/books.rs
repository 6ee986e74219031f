use std::sync::Arc;

use booky_domain::{
    BookCardView, CatalogBookView, LibraryFilter, Panel, ReadingStatus, Toast,
};
use tracing::{debug, warn};

use super::GamificationController;
use crate::context::AppContext;
use crate::ApplicationResult;

const EMPTY_LIBRARY: &str = "Your library is empty. Add your first book!";

/// The session user's library.
#[derive(Clone)]
pub struct BooksController {
    ctx: Arc<AppContext>,
}

impl BooksController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads the library and caches it for local filtering.
    pub async fn load(&self) -> Panel<BookCardView> {
        let panel = match self.fetch().await {
            Ok(panel) => panel,
            Err(e) => {
                warn!(error = %e, "library load failed");
                Panel::error("Could not load your library")
            }
        };
        self.ctx.update_screen(|s| s.books = panel.clone()).await;
        panel
    }

    async fn fetch(&self) -> ApplicationResult<Panel<BookCardView>> {
        let user = self.ctx.require_user().await?;
        let library = self
            .ctx
            .api()
            .user_library(&user.id, &LibraryFilter::default())
            .await?;
        let cards = library.iter().map(BookCardView::from).collect();
        self.ctx.set_library(library).await;
        Ok(Panel::from_items(cards, EMPTY_LIBRARY))
    }

    /// Filters the cached library without a network call.
    pub async fn filter(
        &self,
        status: Option<ReadingStatus>,
        exchangeable_only: bool,
    ) -> Panel<BookCardView> {
        let filter = LibraryFilter {
            favorites: None,
            status,
            wants_to_exchange: exchangeable_only.then_some(true),
        };
        let library = self.ctx.library().await;
        let panel = if library.is_empty() {
            Panel::Empty(EMPTY_LIBRARY.to_string())
        } else {
            Panel::from_items(
                library
                    .iter()
                    .filter(|entry| filter.matches(entry))
                    .map(BookCardView::from)
                    .collect(),
                "No books match the selected filters",
            )
        };
        self.ctx.update_screen(|s| s.books = panel.clone()).await;
        panel
    }

    /// Changes the reading status of a book, then reloads the library and
    /// the gamification panel.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn update_status(&self, book_id: &str, status: ReadingStatus) -> ApplicationResult<()> {
        if let Err(e) = self.ctx.api().update_book_status(book_id, status).await {
            self.ctx.report("Could not update the reading status", &e);
            return Err(e);
        }
        self.ctx
            .notify(Toast::success(format!("Status changed to {}", status.label())));
        self.load().await;
        self.refresh_gamification().await;
        Ok(())
    }

    /// Flags or unflags a book as available for exchange, then reloads.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn toggle_exchange(&self, book_id: &str, wants_to_exchange: bool) -> ApplicationResult<()> {
        if let Err(e) = self
            .ctx
            .api()
            .update_exchange_preference(book_id, wants_to_exchange)
            .await
        {
            self.ctx.report("Could not update the exchange preference", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success(if wants_to_exchange {
            "Book marked for exchange"
        } else {
            "Book removed from exchange"
        }));
        self.load().await;
        Ok(())
    }

    /// Adds a book by ISBN, then reloads the library and gamification.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank ISBN (no network call),
    /// otherwise the API error.
    pub async fn add_by_isbn(&self, isbn: &str, status: ReadingStatus) -> ApplicationResult<()> {
        let isbn = self.require_isbn(isbn)?;
        if let Err(e) = self.ctx.api().add_book_by_isbn(isbn, status).await {
            self.ctx.report("Could not add the book", &e);
            return Err(e);
        }
        self.ctx
            .notify(Toast::success("Book added to your library"));
        self.ctx.update_screen(|s| s.isbn_preview = None).await;
        self.load().await;
        self.refresh_gamification().await;
        Ok(())
    }

    /// Looks up a catalog book by ISBN for preview.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank ISBN (no network call),
    /// otherwise the API error.
    pub async fn preview_isbn(&self, isbn: &str) -> ApplicationResult<CatalogBookView> {
        let isbn = self.require_isbn(isbn)?;
        match self.ctx.api().book_by_isbn(isbn).await {
            Ok(book) => {
                let view = CatalogBookView::new(&book, false);
                self.ctx
                    .update_screen(|s| s.isbn_preview = Some(view.clone()))
                    .await;
                Ok(view)
            }
            Err(e) => {
                self.ctx.report("No book found for that ISBN", &e);
                Err(e)
            }
        }
    }

    fn require_isbn<'a>(&self, isbn: &'a str) -> ApplicationResult<&'a str> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(self.ctx.reject("Enter an ISBN"));
        }
        Ok(isbn)
    }

    async fn refresh_gamification(&self) {
        if let Err(e) = GamificationController::new(self.ctx.clone())
            .refresh_current()
            .await
        {
            debug!(error = %e, "gamification refresh after change failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::test_support::Harness;
    use booky_domain::{HttpMethod, ToastKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn library() -> serde_json::Value {
        json!([
            {"id": 1, "bookId": "b1", "status": "READ", "wantsToExchange": true,
             "book": {"id": "b1", "title": "Dune", "author": "Herbert"}},
            {"id": 2, "bookId": "b2", "status": "READING", "favorite": true,
             "book": {"id": "b2", "title": "Emma"}}
        ])
    }

    #[tokio::test]
    async fn test_load_maps_cards_and_caches() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Get, "/books/library/u1", 200, library());

        let panel = BooksController::new(harness.ctx.clone()).load().await;
        let cards = panel.items();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].entry_id, "1");
        assert_eq!(cards[0].title, "Dune");
        assert_eq!(cards[1].author, "Unknown author");
        assert_eq!(harness.ctx.library().await.len(), 2);
        assert_eq!(harness.ctx.screen().await.books, panel);
    }

    #[tokio::test]
    async fn test_load_empty_and_error() {
        let harness = Harness::signed_in("u1").await;
        let controller = BooksController::new(harness.ctx.clone());
        assert!(controller.load().await.is_error());

        harness
            .http
            .respond(HttpMethod::Get, "/books/library/u1", 200, json!([]));
        assert_eq!(controller.load().await, Panel::Empty(EMPTY_LIBRARY.into()));
    }

    #[tokio::test]
    async fn test_filter_is_local() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Get, "/books/library/u1", 200, library());
        let controller = BooksController::new(harness.ctx.clone());
        controller.load().await;
        let calls = harness.http.calls().len();

        let read = controller.filter(Some(ReadingStatus::Read), false).await;
        assert_eq!(read.items().len(), 1);
        assert_eq!(read.items()[0].title, "Dune");

        let exchangeable = controller.filter(None, true).await;
        assert_eq!(exchangeable.items().len(), 1);

        let none = controller.filter(Some(ReadingStatus::ToRead), true).await;
        assert!(none.is_empty());
        assert_eq!(harness.http.calls().len(), calls);
    }

    #[tokio::test]
    async fn test_add_blank_isbn_is_rejected_locally() {
        let harness = Harness::signed_in("u1").await;
        let controller = BooksController::new(harness.ctx.clone());
        let result = controller.add_by_isbn("   ", ReadingStatus::ToRead).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
        assert!(controller.preview_isbn("").await.is_err());
        assert!(harness.http.calls().is_empty());
        assert_eq!(
            harness.notifier.messages(ToastKind::Warning),
            vec!["Enter an ISBN", "Enter an ISBN"]
        );
    }

    #[tokio::test]
    async fn test_add_by_isbn_reloads() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Post, "/books/library", 201, json!({}));
        harness
            .http
            .respond(HttpMethod::Get, "/books/library/u1", 200, library());

        BooksController::new(harness.ctx.clone())
            .add_by_isbn(" 978-1 ", ReadingStatus::Reading)
            .await
            .unwrap();

        let post = &harness.http.calls_to(HttpMethod::Post, "/books/library")[0];
        assert_eq!(post.json(), json!({"isbn": "978-1", "status": "READING"}));
        assert_eq!(
            harness.http.calls_to(HttpMethod::Get, "/books/library/u1").len(),
            1
        );
        assert_eq!(
            harness
                .http
                .calls_to(HttpMethod::Get, "/gamification/profile/u1")
                .len(),
            1
        );
        assert!(
            harness
                .notifier
                .messages(ToastKind::Success)
                .contains(&"Book added to your library".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_status_failure_toasts() {
        let harness = Harness::signed_in("u1").await;
        let result = BooksController::new(harness.ctx.clone())
            .update_status("b1", ReadingStatus::Read)
            .await;
        assert_eq!(result.unwrap_err().status(), Some(404));
        let errors = harness.notifier.messages(ToastKind::Error);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1], "Could not update the reading status");
    }

    #[tokio::test]
    async fn test_toggle_exchange_payload() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Put, "/books/b1/exchange", 200, json!(null));
        BooksController::new(harness.ctx.clone())
            .toggle_exchange("b1", true)
            .await
            .unwrap();
        let call = &harness.http.calls_to(HttpMethod::Put, "/books/b1/exchange")[0];
        assert_eq!(call.json(), json!({"wants_to_exchange": true}));
    }
}
