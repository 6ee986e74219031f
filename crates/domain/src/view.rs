//! View models built from backend records.
//!
//! Each view carries the display fallbacks for missing fields, so renderers
//! only format what they are given.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::book::{Book, ReadingStatus, UserBook};
use crate::community::{Community, ReadingClub};
use crate::exchange::{Exchange, ExchangeStatus};
use crate::gamification::{GamificationProfile, UserAchievement, UserLevel};
use crate::post::{Comment, Post};
use crate::state::Panel;
use crate::user::{User, UserPreview};

/// Formats an optional timestamp as `dd/mm/yyyy`, or `-` when absent.
#[must_use]
pub fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%d/%m/%Y").to_string())
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// A library entry card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCardView {
    /// Library entry id
    pub entry_id: String,
    /// Catalog id, used by status and exchange-flag updates
    pub book_id: Option<String>,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// ISBN, when known
    pub isbn: Option<String>,
    /// Reading status, `TO_READ` when missing
    pub status: ReadingStatus,
    /// Status label
    pub status_label: &'static str,
    /// Favorite badge
    pub favorite: bool,
    /// Exchangeable badge
    pub exchangeable: bool,
}

impl From<&UserBook> for BookCardView {
    fn from(entry: &UserBook) -> Self {
        let status = entry.status.unwrap_or(ReadingStatus::ToRead);
        Self {
            entry_id: entry.id.clone(),
            book_id: entry.catalog_id().map(str::to_string),
            title: entry.book.title_or_default().to_string(),
            author: entry.book.author_or_default().to_string(),
            isbn: entry.book.isbn.clone(),
            status,
            status_label: status.label(),
            favorite: entry.favorite,
            exchangeable: entry.wants_to_exchange,
        }
    }
}

/// A catalog search result or ISBN preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogBookView {
    /// Catalog id
    pub id: String,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// ISBN
    pub isbn: Option<String>,
    /// Publisher
    pub publisher: Option<String>,
    /// Page count
    pub pages: Option<u32>,
    /// Whether the book is in the current selection
    pub selected: bool,
}

impl CatalogBookView {
    /// Builds the view, marking it selected when `selected` is true.
    #[must_use]
    pub fn new(book: &Book, selected: bool) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title_or_default().to_string(),
            author: book.author_or_default().to_string(),
            isbn: book.isbn.clone(),
            publisher: book.publisher.clone(),
            pages: book.pages,
            selected,
        }
    }
}

/// A book listed on an exchange card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeBookView {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
}

impl From<&UserBook> for ExchangeBookView {
    fn from(entry: &UserBook) -> Self {
        Self {
            title: entry.book.title_or_default().to_string(),
            author: entry.book.author_or_default().to_string(),
        }
    }
}

/// An exchange card, seen from one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeCardView {
    /// Exchange id
    pub id: String,
    /// Status
    pub status: ExchangeStatus,
    /// Status label
    pub status_label: &'static str,
    /// Creation date
    pub date: String,
    /// Requester label, `You (requester)` for the viewer
    pub requester_label: String,
    /// Owner label, `You (owner)` for the viewer
    pub owner_label: String,
    /// True when the viewer owns the requested books
    pub as_owner: bool,
    /// Books the requester wants
    pub wanted: Vec<ExchangeBookView>,
    /// Books the requester offers
    pub offered: Vec<ExchangeBookView>,
    /// Viewer may accept or reject
    pub can_respond: bool,
    /// Viewer may cancel
    pub can_cancel: bool,
}

fn participant_name(preview: Option<&UserPreview>, fallback: &str) -> String {
    preview
        .and_then(|p| {
            p.name
                .as_deref()
                .or(p.username.as_deref())
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or(fallback)
        .to_string()
}

impl ExchangeCardView {
    /// Builds the card as seen by `viewer_id`.
    #[must_use]
    pub fn new(exchange: &Exchange, viewer_id: &str) -> Self {
        let owner_id = exchange
            .owner
            .as_ref()
            .map_or(exchange.owner_id.as_str(), |o| o.id.as_str());
        let requester_id = exchange
            .requester
            .as_ref()
            .map_or(exchange.requester_id.as_str(), |r| r.id.as_str());
        let as_owner = owner_id == viewer_id;
        let as_requester = requester_id == viewer_id;
        let pending = exchange.status == ExchangeStatus::Pending;

        let requester_label = if as_requester {
            "You (requester)".to_string()
        } else {
            format!(
                "{} (requester)",
                participant_name(exchange.requester.as_ref(), "Requester")
            )
        };
        let owner_label = if as_owner {
            "You (owner)".to_string()
        } else {
            format!(
                "{} (owner)",
                participant_name(exchange.owner.as_ref(), "Owner")
            )
        };

        Self {
            id: exchange.id.clone(),
            status: exchange.status,
            status_label: exchange.status.label(),
            date: format_date(exchange.date_created),
            requester_label,
            owner_label,
            as_owner,
            wanted: exchange.owner_books.iter().map(Into::into).collect(),
            offered: exchange.requester_books.iter().map(Into::into).collect(),
            can_respond: pending && as_owner,
            can_cancel: pending && as_requester,
        }
    }
}

/// A user card in following, followers, suggested or search lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCardView {
    /// User id
    pub id: String,
    /// Full name
    pub full_name: String,
    /// `@username`
    pub handle: String,
    /// Avatar initials
    pub initials: String,
    /// The viewer already follows this user
    pub is_following: bool,
}

impl UserCardView {
    /// Builds the card; `is_following` drives the follow button label.
    #[must_use]
    pub fn new(user: &UserPreview, is_following: bool) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name(),
            handle: format!("@{}", or_default(user.username.as_deref(), "user")),
            initials: user.initials(),
            is_following,
        }
    }
}

/// Follower and following counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStatsView {
    /// Number of followers
    pub followers: usize,
    /// Number of followed users
    pub following: usize,
}

/// A library entry shown on another user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileBookView {
    /// Catalog id
    pub book_id: Option<String>,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Status label
    pub status_label: &'static str,
    /// Offered for exchange
    pub exchangeable: bool,
    /// The viewer may propose an exchange for this book
    pub can_propose_exchange: bool,
}

/// Another user's profile with a preview of their library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileView {
    /// User id
    pub id: String,
    /// Full name
    pub full_name: String,
    /// Email, or a placeholder
    pub email: String,
    /// `@username`
    pub handle: String,
    /// Location, or a placeholder
    pub location: String,
    /// Biography
    pub description: Option<String>,
    /// Registration date
    pub member_since: String,
    /// Library size
    pub total_books: usize,
    /// Books read
    pub books_read: usize,
    /// Books offered for exchange
    pub exchangeable_books: usize,
    /// First entries of the library
    pub books: Vec<ProfileBookView>,
}

/// Number of library entries previewed on a profile.
pub const PROFILE_BOOK_PREVIEW: usize = 6;

impl UserProfileView {
    /// Builds the profile as seen by `viewer_id`.
    #[must_use]
    pub fn new(user: &User, library: &[UserBook], viewer_id: &str) -> Self {
        let is_self = user.id == viewer_id;
        let books = library
            .iter()
            .take(PROFILE_BOOK_PREVIEW)
            .map(|entry| ProfileBookView {
                book_id: entry.catalog_id().map(str::to_string),
                title: entry.book.title_or_default().to_string(),
                author: entry.book.author_or_default().to_string(),
                status_label: entry.status.unwrap_or(ReadingStatus::ToRead).label(),
                exchangeable: entry.wants_to_exchange,
                can_propose_exchange: entry.wants_to_exchange && !is_self,
            })
            .collect();

        Self {
            id: user.id.clone(),
            full_name: user.full_name(),
            email: or_default(user.email.as_deref(), "Email not available"),
            handle: format!("@{}", or_default(user.username.as_deref(), "username")),
            location: or_default(
                user.address.as_ref().and_then(|a| a.state.as_deref()),
                "Location not specified",
            ),
            description: user.description.clone().filter(|d| !d.trim().is_empty()),
            member_since: format_date(user.date_created),
            total_books: library.len(),
            books_read: library
                .iter()
                .filter(|b| b.status == Some(ReadingStatus::Read))
                .count(),
            exchangeable_books: library.iter().filter(|b| b.wants_to_exchange).count(),
            books,
        }
    }
}

/// A community card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityCardView {
    /// Community id
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Administrator name
    pub admin_name: String,
    /// Member count
    pub member_count: u64,
    /// Creation date
    pub created: String,
}

impl From<&Community> for CommunityCardView {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id.clone(),
            name: or_default(community.name.as_deref(), "Unnamed community"),
            description: or_default(community.description.as_deref(), ""),
            admin_name: or_default(
                community
                    .admin
                    .as_ref()
                    .and_then(|a| a.name.as_deref().or(a.username.as_deref())),
                "Administrator",
            ),
            member_count: community.member_count,
            created: format_date(community.date_created),
        }
    }
}

/// A reading club card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubCardView {
    /// Club id
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Current book title
    pub book_title: String,
    /// Current book author
    pub book_author: String,
    /// Moderator name
    pub moderator_name: String,
    /// Owning community name
    pub community_name: String,
    /// Member count
    pub member_count: u64,
    /// Next meeting date
    pub next_meeting: String,
    /// A meeting is open right now
    pub join_available: bool,
}

impl From<&ReadingClub> for ClubCardView {
    fn from(club: &ReadingClub) -> Self {
        Self {
            id: club.id.clone(),
            name: or_default(club.name.as_deref(), "Unnamed club"),
            description: or_default(club.description.as_deref(), ""),
            book_title: or_default(
                club.book.as_ref().and_then(|b| b.title.as_deref()),
                "Not specified",
            ),
            book_author: or_default(
                club.book.as_ref().and_then(|b| b.author.as_deref()),
                "Unknown author",
            ),
            moderator_name: club
                .moderator
                .as_ref()
                .map_or_else(|| "Moderator".to_string(), UserPreview::full_name),
            community_name: or_default(
                club.community.as_ref().and_then(|c| c.name.as_deref()),
                "Not specified",
            ),
            member_count: club.member_count,
            next_meeting: format_date(club.next_meeting),
            join_available: club.is_join_available,
        }
    }
}

/// A post card; the first body line is the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCardView {
    /// Post id
    pub id: String,
    /// First line of the body
    pub title: String,
    /// Remaining lines, or the whole body for single-line posts
    pub content: String,
    /// Author name
    pub author: String,
    /// Community name, `General` for general posts
    pub community: String,
    /// Creation date
    pub date: String,
    /// Image URL
    pub image: Option<String>,
    /// Number of comments
    pub comments_count: u32,
}

impl From<&Post> for PostCardView {
    fn from(post: &Post) -> Self {
        let body = or_default(post.body.as_deref(), "No content");
        let (first, rest) = body.split_once('\n').unwrap_or((body.as_str(), ""));
        let title = if first.trim().is_empty() {
            "Untitled post".to_string()
        } else {
            first.to_string()
        };
        let content = if rest.is_empty() {
            body.clone()
        } else {
            rest.to_string()
        };
        Self {
            id: post.id.clone(),
            title,
            content,
            author: or_default(
                post.user
                    .as_ref()
                    .and_then(|u| u.name.as_deref().or(u.username.as_deref())),
                "User",
            ),
            community: or_default(
                post.community.as_ref().and_then(|c| c.name.as_deref()),
                "General",
            ),
            date: format_date(post.date_created),
            image: post.image.clone(),
            comments_count: post.comments_count,
        }
    }
}

/// A comment under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Author name
    pub author: String,
    /// Text
    pub body: String,
    /// Creation date
    pub date: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            author: or_default(
                comment
                    .user
                    .as_ref()
                    .and_then(|u| u.name.as_deref().or(u.username.as_deref())),
                "User",
            ),
            body: or_default(comment.body.as_deref(), ""),
            date: format_date(comment.date_created),
        }
    }
}

/// The signed-in user's own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// `@username`
    pub handle: String,
    /// Biography
    pub description: Option<String>,
    /// Registration date
    pub member_since: String,
    /// Library size
    pub total_books: usize,
    /// Books read
    pub books_read: usize,
    /// Communities joined
    pub communities_joined: usize,
    /// Exchanges, in any status
    pub exchanges: usize,
}

impl ProfileView {
    /// Builds the profile from the session user and loaded lists.
    #[must_use]
    pub fn new(
        user: &User,
        library: &[UserBook],
        communities: &[Community],
        exchanges: &[Exchange],
    ) -> Self {
        Self {
            name: or_default(user.name.as_deref(), "User"),
            email: or_default(user.email.as_deref(), "-"),
            handle: format!("@{}", or_default(user.username.as_deref(), "user")),
            description: user.description.clone().filter(|d| !d.trim().is_empty()),
            member_since: format_date(user.date_created),
            total_books: library.len(),
            books_read: library
                .iter()
                .filter(|b| b.status == Some(ReadingStatus::Read))
                .count(),
            communities_joined: communities.len(),
            exchanges: exchanges.len(),
        }
    }
}

/// An earned achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementView {
    /// Icon glyph
    pub icon: String,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// `+N pts`
    pub points_label: String,
    /// Date earned
    pub earned_on: String,
}

impl From<&UserAchievement> for AchievementView {
    fn from(earned: &UserAchievement) -> Self {
        let a = &earned.achievement;
        Self {
            icon: or_default(a.icon.as_deref(), "*"),
            name: or_default(a.name.as_deref(), "Achievement"),
            description: or_default(a.description.as_deref(), ""),
            points_label: format!("+{} pts", a.points_reward),
            earned_on: format_date(earned.date_earned),
        }
    }
}

/// The gamification side panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamificationView {
    /// Level number
    pub level: u32,
    /// Level name
    pub level_name: String,
    /// Level description
    pub level_description: String,
    /// Progress through the current band, in `[0, 100]`
    pub progress_percent: f64,
    /// `points / max points`
    pub points_label: String,
    /// Header badge, `Level N · P pts`
    pub badge_label: String,
    /// Points missing to the next level
    pub points_to_next_level: i64,
    /// Earned achievements
    pub achievements: Panel<AchievementView>,
}

impl Default for GamificationView {
    fn default() -> Self {
        let level = UserLevel::default();
        Self {
            level: level.level,
            level_name: level.name,
            level_description: "Just getting started".to_string(),
            progress_percent: 0.0,
            points_label: format!("0 / {} points", level.max_points),
            badge_label: "Level 1 · 0 pts".to_string(),
            points_to_next_level: level.max_points,
            achievements: Panel::Empty("Load your information to see achievements".to_string()),
        }
    }
}

impl GamificationView {
    /// Builds the panel from a profile and its achievements.
    #[must_use]
    pub fn new(profile: &GamificationProfile, achievements: Panel<AchievementView>) -> Self {
        let level_number = profile.current_level.max(1);
        let band = profile.user_level.clone().unwrap_or(UserLevel {
            level: level_number,
            name: format!("Level {level_number}"),
            ..UserLevel::default()
        });
        let points = profile.total_points;
        let to_next = if profile.points_to_next_level > 0 {
            profile.points_to_next_level
        } else {
            (band.max_points - points).max(0)
        };
        Self {
            level: level_number,
            level_name: band.name.clone(),
            level_description: band
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "Keep progressing".to_string()),
            progress_percent: band.progress_percent(points),
            points_label: format!("{points} / {} points", band.max_points),
            badge_label: format!("Level {level_number} · {points} pts"),
            points_to_next_level: to_next,
            achievements,
        }
    }
}
