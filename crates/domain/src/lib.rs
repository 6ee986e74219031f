//! Booky Domain - Core business types
//!
//! This crate defines the domain model of the Booky book-sharing client:
//! backend records, request payloads, view models and the exchange wizard.
//! All types here are pure Rust with no I/O dependencies.

pub mod book;
pub mod community;
pub mod error;
pub mod exchange;
pub mod gamification;
pub mod post;
pub mod request;
pub mod response;
pub mod screen;
pub mod session;
pub mod settings;
pub mod state;
pub mod user;
pub mod view;
pub mod wire;
pub mod wizard;

pub use book::{
    AddBookRequest, Book, LibraryFilter, ReadingStatus, UpdateBookStatusRequest,
    UpdateExchangePreferenceRequest, UserBook,
};
pub use community::{Community, NewCommunity, NewReadingClub, ReadingClub};
pub use error::{DomainError, DomainResult};
pub use exchange::{
    CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeStatus,
    UpdateExchangeStatusRequest,
};
pub use gamification::{Achievement, GamificationProfile, UserAchievement, UserLevel};
pub use post::{Comment, NewComment, NewPost, Post, PostImage};
pub use request::{ApiRequest, HttpMethod, MultipartPart, PartKind, RequestBody};
pub use response::{ApiResponse, StatusCode};
pub use screen::{PostDetails, ScreenState};
pub use session::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, Session};
pub use settings::ClientSettings;
pub use state::{Panel, Toast, ToastKind};
pub use user::{
    Address, FollowRequest, SearchUsersByBooksRequest, SignInRequest, SignInResponse, User,
    UserPreview,
};
pub use view::{
    AchievementView, BookCardView, CatalogBookView, ClubCardView, CommentView, CommunityCardView,
    ExchangeBookView, ExchangeCardView, GamificationView, PostCardView, ProfileBookView,
    ProfileView, UserCardView, UserProfileView, UserStatsView,
};
pub use wizard::{
    ExchangeWizardState, OfferedBook, ProposalFailure, ProposalPlan, WantedBook, WizardStep,
};
