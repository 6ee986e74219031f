//! Plain-text rendering of the screen state.

use std::fmt::Write;

use booky_domain::{
    BookCardView, ClubCardView, CommunityCardView, ExchangeCardView, GamificationView, Panel,
    PostCardView, ProfileView, ScreenState, UserCardView,
};

/// Renders every region of the dashboard.
#[must_use]
pub fn screen(state: &ScreenState) -> String {
    let mut out = String::new();
    if let Some(profile) = &state.profile {
        out.push_str(&profile_header(profile));
    }
    out.push_str(&gamification(&state.gamification));
    out.push_str(&section("Library", &state.books, book_line));
    out.push_str(&section("Following", &state.following, user_line));
    out.push_str(&section("Suggested readers", &state.suggested, user_line));
    out.push_str(&section("Communities", &state.communities, community_line));
    out.push_str(&section("Reading clubs", &state.clubs, club_line));
    out.push_str(&section("Feed", &state.posts, post_line));
    out.push_str(&section("Exchanges", &state.exchanges, exchange_line));
    out
}

/// Renders one panel under a heading.
#[must_use]
pub fn section<T>(title: &str, panel: &Panel<T>, line: impl Fn(&T) -> String) -> String {
    let mut out = format!("== {title} ==\n");
    match panel {
        Panel::Idle => out.push_str("  ...\n"),
        Panel::Items(items) => {
            for item in items {
                let _ = writeln!(out, "  {}", line(item));
            }
        }
        Panel::Empty(message) => {
            let _ = writeln!(out, "  {message}");
        }
        Panel::Error(message) => {
            let _ = writeln!(out, "  ! {message}");
        }
    }
    out
}

fn profile_header(profile: &ProfileView) -> String {
    format!(
        "{} ({}) - {} books, {} read, {} communities, {} exchanges\n",
        profile.name,
        profile.handle,
        profile.total_books,
        profile.books_read,
        profile.communities_joined,
        profile.exchanges
    )
}

/// One-line gamification summary.
#[must_use]
pub fn gamification(view: &GamificationView) -> String {
    format!(
        "Level {} {} | {} | {:.0}% to next level\n",
        view.level, view.level_name, view.points_label, view.progress_percent
    )
}

fn book_line(book: &BookCardView) -> String {
    let swap = if book.exchangeable { " [exchange]" } else { "" };
    let star = if book.favorite { "* " } else { "" };
    format!(
        "{star}{} - {} ({}){swap}",
        book.title, book.author, book.status_label
    )
}

fn user_line(user: &UserCardView) -> String {
    format!("{} {}", user.full_name, user.handle)
}

fn community_line(community: &CommunityCardView) -> String {
    format!(
        "{} ({} members, admin {})",
        community.name, community.member_count, community.admin_name
    )
}

fn club_line(club: &ClubCardView) -> String {
    format!(
        "{} reading {} by {} (next: {})",
        club.name, club.book_title, club.book_author, club.next_meeting
    )
}

fn post_line(post: &PostCardView) -> String {
    format!(
        "{} in {}: {} ({} comments)",
        post.author, post.community, post.content, post.comments_count
    )
}

fn exchange_line(exchange: &ExchangeCardView) -> String {
    format!(
        "{} {} <-> {} [{}]",
        exchange.date, exchange.requester_label, exchange.owner_label, exchange.status_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_states() {
        let idle: Panel<String> = Panel::Idle;
        assert_eq!(section("Feed", &idle, String::clone), "== Feed ==\n  ...\n");

        let empty: Panel<String> = Panel::Empty("Nothing here".into());
        assert_eq!(
            section("Feed", &empty, String::clone),
            "== Feed ==\n  Nothing here\n"
        );

        let failed: Panel<String> = Panel::error("Could not load posts");
        assert_eq!(
            section("Feed", &failed, String::clone),
            "== Feed ==\n  ! Could not load posts\n"
        );

        let items = Panel::Items(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(section("Feed", &items, String::clone), "== Feed ==\n  a\n  b\n");
    }

    #[test]
    fn test_default_screen_lists_every_region() {
        let text = screen(&ScreenState::default());
        for heading in [
            "Library",
            "Following",
            "Suggested readers",
            "Communities",
            "Reading clubs",
            "Feed",
            "Exchanges",
        ] {
            assert!(text.contains(&format!("== {heading} ==")), "{heading}");
        }
    }
}
