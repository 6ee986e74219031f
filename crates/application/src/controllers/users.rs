use std::collections::HashSet;
use std::sync::Arc;

use booky_domain::{
    LibraryFilter, Panel, Toast, UserCardView, UserPreview, UserProfileView, UserStatsView,
};
use tracing::warn;

use crate::ApplicationResult;
use crate::context::AppContext;

/// Maximum number of suggested users shown.
pub const SUGGESTION_LIMIT: usize = 6;

/// Following, followers, suggestions, search and other users' profiles.
#[derive(Clone)]
pub struct UsersController {
    ctx: Arc<AppContext>,
}

/// Suggestions: following ∪ followers by id, minus self and users already
/// followed, capped at [`SUGGESTION_LIMIT`].
fn suggestions(
    following: &[UserPreview],
    followers: &[UserPreview],
    self_id: &str,
) -> Vec<UserPreview> {
    let followed: HashSet<&str> = following.iter().map(|u| u.id.as_str()).collect();
    let mut seen = HashSet::new();
    following
        .iter()
        .chain(followers)
        .filter(|u| u.id != self_id && !followed.contains(u.id.as_str()))
        .filter(|u| seen.insert(u.id.clone()))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

impl UsersController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads following, followers and suggestions.
    ///
    /// # Errors
    ///
    /// Returns the first load error; all three panels show it.
    pub async fn load(&self) -> ApplicationResult<()> {
        let user = self.ctx.require_user().await?;
        let api = self.ctx.api();
        let (following, followers) = tokio::join!(api.following(&user.id), api.followers(&user.id));
        let (following, followers) = match (following, followers) {
            (Ok(following), Ok(followers)) => (following, followers),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "social lists load failed");
                self.ctx
                    .update_screen(|s| {
                        s.following = Panel::error("Could not load users");
                        s.followers = Panel::error("Could not load users");
                        s.suggested = Panel::error("Could not load suggestions");
                    })
                    .await;
                return Err(e);
            }
        };

        let followed: HashSet<&str> = following.iter().map(|u| u.id.as_str()).collect();
        let following_panel = Panel::from_items(
            following.iter().map(|u| UserCardView::new(u, true)).collect(),
            "You are not following anyone yet",
        );
        let followers_panel = Panel::from_items(
            followers
                .iter()
                .map(|u| UserCardView::new(u, followed.contains(u.id.as_str())))
                .collect(),
            "Nobody follows you yet",
        );
        let suggested_panel = Panel::from_items(
            suggestions(&following, &followers, &user.id)
                .iter()
                .map(|u| UserCardView::new(u, false))
                .collect(),
            "No suggestions right now",
        );
        let stats = UserStatsView {
            followers: followers.len(),
            following: following.len(),
        };

        self.ctx.set_following(following).await;
        self.ctx
            .update_screen(|s| {
                s.following = following_panel;
                s.followers = followers_panel;
                s.suggested = suggested_panel;
                s.user_stats = stats;
            })
            .await;
        Ok(())
    }

    /// Searches users by name or username.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank query (no network call),
    /// otherwise the API error.
    pub async fn search(&self, query: &str) -> ApplicationResult<Panel<UserCardView>> {
        if query.trim().is_empty() {
            return Err(self.ctx.reject("Enter a name to search"));
        }
        let users = match self.ctx.api().search_users(query).await {
            Ok(users) => users,
            Err(e) => {
                self.ctx.report("User search failed", &e);
                return Err(e);
            }
        };
        let self_id = self.ctx.session().user().await.map(|u| u.id);
        let mut cards = Vec::with_capacity(users.len());
        for user in users.iter().filter(|u| Some(&u.id) != self_id.as_ref()) {
            cards.push(UserCardView::new(user, self.ctx.is_following(&user.id).await));
        }
        Ok(Panel::from_items(cards, "No users found"))
    }

    /// Follows or unfollows `user_id` depending on the cached following
    /// list, then reloads. Returns the new following state.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn toggle_follow(&self, user_id: &str) -> ApplicationResult<bool> {
        let following = self.ctx.is_following(user_id).await;
        let api = self.ctx.api();
        let result = if following {
            api.unfollow(user_id).await
        } else {
            api.follow(user_id).await
        };
        if let Err(e) = result {
            self.ctx.report("Could not update follow status", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success(if following {
            "You unfollowed this user"
        } else {
            "You are now following this user"
        }));
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after follow toggle failed");
        }
        Ok(!following)
    }

    /// Loads another user's profile with a preview of their library.
    ///
    /// # Errors
    ///
    /// Returns the API error of either load.
    pub async fn profile(&self, user_id: &str) -> ApplicationResult<UserProfileView> {
        let viewer_id = self
            .ctx
            .session()
            .user()
            .await
            .map(|u| u.id)
            .unwrap_or_default();
        let api = self.ctx.api();
        let all = LibraryFilter::default();
        let (user, library) = tokio::join!(
            api.user_profile(user_id),
            api.user_library(user_id, &all)
        );
        let view = match user.and_then(|user| library.map(|library| (user, library))) {
            Ok((user, library)) => UserProfileView::new(&user, &library, &viewer_id),
            Err(e) => {
                self.ctx.report("Could not load the profile", &e);
                return Err(e);
            }
        };
        self.ctx
            .update_screen(|s| s.user_profile = Some(view.clone()))
            .await;
        Ok(view)
    }

    /// Follower and following counts of `user_id`; a failed count is zero.
    pub async fn stats(&self, user_id: &str) -> UserStatsView {
        let api = self.ctx.api();
        let (followers, following) = tokio::join!(api.followers(user_id), api.following(user_id));
        let stats = UserStatsView {
            followers: followers.map_or(0, |l| l.len()),
            following: following.map_or(0, |l| l.len()),
        };
        self.ctx.update_screen(|s| s.user_stats = stats).await;
        stats
    }
}
