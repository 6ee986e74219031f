use std::sync::Arc;

use booky_domain::{ClubCardView, NewReadingClub, Panel, Toast};
use tracing::warn;

use crate::ApplicationResult;
use crate::context::AppContext;

/// Reading club listing and membership.
#[derive(Clone)]
pub struct ClubsController {
    ctx: Arc<AppContext>,
}

impl ClubsController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads every reading club.
    pub async fn load(&self) -> Panel<ClubCardView> {
        let result = self.ctx.api().reading_clubs().await;
        self.show(result.map(|clubs| {
            Panel::from_items(
                clubs.iter().map(ClubCardView::from).collect(),
                "No reading clubs yet",
            )
        }))
        .await
    }

    /// Loads the clubs the session user belongs to.
    pub async fn load_mine(&self) -> Panel<ClubCardView> {
        let result = match self.ctx.require_user().await {
            Ok(user) => self.ctx.api().user_reading_clubs(&user.id).await,
            Err(e) => Err(e),
        };
        self.show(result.map(|clubs| {
            Panel::from_items(
                clubs.iter().map(ClubCardView::from).collect(),
                "You are not in any reading club yet",
            )
        }))
        .await
    }

    async fn show(&self, result: ApplicationResult<Panel<ClubCardView>>) -> Panel<ClubCardView> {
        let panel = result.unwrap_or_else(|e| {
            warn!(error = %e, "reading clubs load failed");
            Panel::error("Could not load reading clubs")
        });
        self.ctx.update_screen(|s| s.clubs = panel.clone()).await;
        panel
    }

    /// Creates a club, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns a domain error when name, community or book is missing (no
    /// network call), otherwise the API error.
    pub async fn create(&self, club: &NewReadingClub) -> ApplicationResult<()> {
        let result = match club.validate() {
            Ok(()) => self.ctx.api().create_reading_club(club).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            self.ctx.report("Could not create the reading club", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("Reading club created"));
        self.load().await;
        Ok(())
    }

    /// Joins a club, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn join(&self, club_id: &str) -> ApplicationResult<()> {
        if let Err(e) = self.ctx.api().join_reading_club(club_id).await {
            self.ctx.report("Could not join the reading club", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("You joined the reading club"));
        self.load().await;
        Ok(())
    }

    /// Leaves a club, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn leave(&self, club_id: &str) -> ApplicationResult<()> {
        if let Err(e) = self.ctx.api().leave_reading_club(club_id).await {
            self.ctx.report("Could not leave the reading club", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::info("You left the reading club"));
        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use booky_domain::{HttpMethod, ToastKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn club(name: &str) -> NewReadingClub {
        NewReadingClub {
            name: name.to_string(),
            description: String::new(),
            community_id: "c1".to_string(),
            book_id: "b1".to_string(),
            next_meeting: None,
        }
    }

    #[tokio::test]
    async fn test_load_maps_cards() {
        let harness = Harness::signed_in("u1").await;
        harness.http.respond(
            HttpMethod::Get,
            "/reading-clubs",
            200,
            json!([{
                "id": 1,
                "name": "Dune club",
                "book": {"id": "b1", "title": "Dune"},
                "community": {"id": "c1", "name": "Sci-fi"},
                "memberCount": 4
            }]),
        );
        let panel = ClubsController::new(harness.ctx.clone()).load().await;
        let card = &panel.items()[0];
        assert_eq!(card.book_title, "Dune");
        assert_eq!(card.community_name, "Sci-fi");
        assert_eq!(card.moderator_name, "Moderator");
        assert_eq!(card.member_count, 4);
    }

    #[tokio::test]
    async fn test_load_mine_error_panel() {
        let harness = Harness::signed_in("u1").await;
        let panel = ClubsController::new(harness.ctx.clone()).load_mine().await;
        assert!(panel.is_error());
        assert!(harness.ctx.screen().await.clubs.is_error());
    }

    #[tokio::test]
    async fn test_create_requires_book() {
        let harness = Harness::signed_in("u1").await;
        let mut invalid = club("Dune club");
        invalid.book_id = String::new();
        assert!(
            ClubsController::new(harness.ctx.clone())
                .create(&invalid)
                .await
                .is_err()
        );
        assert!(harness.http.calls().is_empty());
        assert_eq!(
            harness.notifier.messages(ToastKind::Warning),
            vec!["book is required"]
        );
    }

    #[tokio::test]
    async fn test_create_payload() {
        let harness = Harness::signed_in("u1").await;
        harness
            .http
            .respond(HttpMethod::Post, "/reading-clubs", 201, json!({}));
        ClubsController::new(harness.ctx.clone())
            .create(&club("Dune club"))
            .await
            .unwrap();
        let call = &harness.http.calls_to(HttpMethod::Post, "/reading-clubs")[0];
        assert_eq!(
            call.json(),
            json!({"name": "Dune club", "description": "", "communityId": "c1", "bookId": "b1"})
        );
    }
}
