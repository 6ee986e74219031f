//! Everything currently displayed on the dashboard.

use serde::Serialize;

use crate::state::Panel;
use crate::view::{
    BookCardView, CatalogBookView, ClubCardView, CommentView, CommunityCardView,
    ExchangeCardView, GamificationView, PostCardView, ProfileView, UserCardView, UserProfileView,
    UserStatsView,
};

/// Comments of the post currently opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetails {
    /// Post id
    pub post_id: String,
    /// Comments
    pub comments: Panel<CommentView>,
}

/// The dashboard's display state, one field per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScreenState {
    /// Gamification side panel and header badge
    pub gamification: GamificationView,
    /// Library list
    pub books: Panel<BookCardView>,
    /// Catalog lookup shown in the add-by-ISBN form
    pub isbn_preview: Option<CatalogBookView>,
    /// Suggested users, or user search results
    pub suggested: Panel<UserCardView>,
    /// Followed users
    pub following: Panel<UserCardView>,
    /// Followers
    pub followers: Panel<UserCardView>,
    /// Follower and following counts
    pub user_stats: UserStatsView,
    /// Another user's profile, when opened
    pub user_profile: Option<UserProfileView>,
    /// Communities list
    pub communities: Panel<CommunityCardView>,
    /// Reading clubs list
    pub clubs: Panel<ClubCardView>,
    /// Posts list
    pub posts: Panel<PostCardView>,
    /// Opened post comments
    pub post_details: Option<PostDetails>,
    /// Exchanges list
    pub exchanges: Panel<ExchangeCardView>,
    /// Opened exchange
    pub exchange_details: Option<ExchangeCardView>,
    /// Own profile tab
    pub profile: Option<ProfileView>,
}

impl ScreenState {
    /// Clears every region, as on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
