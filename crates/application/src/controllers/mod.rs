//! Per-domain screen controllers.
//!
//! Each controller loads through [`crate::api::BookyApi`], maps records into
//! view models and stores the resulting [`booky_domain::Panel`] in the shared
//! [`AppContext`] screen. Background loads only log failures. User actions
//! add a contextual toast on top of the API client's generic one.

mod books;
mod clubs;
mod communities;
mod exchanges;
mod gamification;
mod posts;
mod profile;
mod users;

use std::sync::Arc;

pub use books::BooksController;
pub use clubs::ClubsController;
pub use communities::CommunitiesController;
pub use exchanges::ExchangesController;
pub use gamification::GamificationController;
pub use posts::PostsController;
pub use profile::ProfileController;
pub use users::{SUGGESTION_LIMIT, UsersController};

use crate::context::AppContext;

/// All controllers over one context.
#[derive(Clone)]
pub struct Controllers {
    /// Library screen
    pub books: BooksController,
    /// Social screen
    pub users: UsersController,
    /// Communities screen
    pub communities: CommunitiesController,
    /// Reading clubs screen
    pub clubs: ClubsController,
    /// Feed screen
    pub posts: PostsController,
    /// Exchanges screen
    pub exchanges: ExchangesController,
    /// Own profile screen
    pub profile: ProfileController,
    /// Gamification side panel
    pub gamification: GamificationController,
}

impl Controllers {
    /// Builds every controller over `ctx`.
    #[must_use]
    pub fn new(ctx: &Arc<AppContext>) -> Self {
        Self {
            books: BooksController::new(ctx.clone()),
            users: UsersController::new(ctx.clone()),
            communities: CommunitiesController::new(ctx.clone()),
            clubs: ClubsController::new(ctx.clone()),
            posts: PostsController::new(ctx.clone()),
            exchanges: ExchangesController::new(ctx.clone()),
            profile: ProfileController::new(ctx.clone()),
            gamification: GamificationController::new(ctx.clone()),
        }
    }
}
