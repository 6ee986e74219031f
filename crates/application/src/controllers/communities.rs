use std::sync::Arc;

use booky_domain::{CommunityCardView, NewCommunity, Panel, Toast};
use tracing::warn;

use crate::ApplicationResult;
use crate::context::AppContext;

/// Community listing and membership.
#[derive(Clone)]
pub struct CommunitiesController {
    ctx: Arc<AppContext>,
}

impl CommunitiesController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads every community and caches the list.
    pub async fn load(&self) -> Panel<CommunityCardView> {
        let panel = match self.ctx.api().communities().await {
            Ok(communities) => {
                let cards = communities.iter().map(CommunityCardView::from).collect();
                self.ctx.set_communities(communities).await;
                Panel::from_items(cards, "No communities yet. Create the first one!")
            }
            Err(e) => {
                warn!(error = %e, "communities load failed");
                Panel::error("Could not load communities")
            }
        };
        self.ctx
            .update_screen(|s| s.communities = panel.clone())
            .await;
        panel
    }

    /// Loads the communities the session user joined.
    pub async fn load_mine(&self) -> Panel<CommunityCardView> {
        let result = match self.ctx.require_user().await {
            Ok(user) => self.ctx.api().user_communities(&user.id).await,
            Err(e) => Err(e),
        };
        let panel = match result {
            Ok(communities) => Panel::from_items(
                communities.iter().map(CommunityCardView::from).collect(),
                "You have not joined any community yet",
            ),
            Err(e) => {
                warn!(error = %e, "own communities load failed");
                Panel::error("Could not load your communities")
            }
        };
        self.ctx
            .update_screen(|s| s.communities = panel.clone())
            .await;
        panel
    }

    /// Creates a community, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a blank name or description (no network
    /// call), otherwise the API error.
    pub async fn create(&self, name: &str, description: &str) -> ApplicationResult<()> {
        let community = NewCommunity {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        };
        let result = match community.validate() {
            Ok(()) => self.ctx.api().create_community(&community).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            self.ctx.report("Could not create the community", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("Community created"));
        self.load().await;
        Ok(())
    }

    /// Joins a community, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn join(&self, community_id: &str) -> ApplicationResult<()> {
        if let Err(e) = self.ctx.api().join_community(community_id).await {
            self.ctx.report("Could not join the community", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("You joined the community"));
        self.load().await;
        Ok(())
    }

    /// Leaves a community, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn leave(&self, community_id: &str) -> ApplicationResult<()> {
        if let Err(e) = self.ctx.api().leave_community(community_id).await {
            self.ctx.report("Could not leave the community", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::info("You left the community"));
        self.load().await;
        Ok(())
    }
}
