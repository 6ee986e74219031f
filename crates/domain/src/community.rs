//! Communities and reading clubs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::error::{DomainError, DomainResult};
use crate::user::UserPreview;
use crate::wire;

/// A community of readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Community id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Administrator id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub admin_id: Option<String>,
    /// Administrator preview
    #[serde(default)]
    pub admin: Option<UserPreview>,
    /// Number of members
    #[serde(default)]
    pub member_count: u64,
    /// Creation timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_created: Option<NaiveDateTime>,
}

/// A reading club attached to a community and a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingClub {
    /// Club id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Catalog id of the current book
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub book_id: Option<String>,
    /// Owning community id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub community_id: Option<String>,
    /// Moderator id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub moderator_id: Option<String>,
    /// Next scheduled meeting
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub next_meeting: Option<NaiveDateTime>,
    /// Chapter the next meeting starts from
    #[serde(default)]
    pub current_chapter: Option<u32>,
    /// Current book
    #[serde(default)]
    pub book: Option<Book>,
    /// Owning community
    #[serde(default)]
    pub community: Option<Community>,
    /// Moderator preview
    #[serde(default)]
    pub moderator: Option<UserPreview>,
    /// Number of members
    #[serde(default)]
    pub member_count: u64,
    /// Whether a meeting is open to join right now
    #[serde(default)]
    pub is_join_available: bool,
}

/// Payload of `POST /communities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommunity {
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
}

impl NewCommunity {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for a blank name or description.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::MissingField("description"));
        }
        Ok(())
    }
}

/// Payload of `POST /reading-clubs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReadingClub {
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Owning community
    pub community_id: String,
    /// Catalog id of the book to read
    pub book_id: String,
    /// First meeting, if already scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_meeting: Option<NaiveDateTime>,
}

impl NewReadingClub {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for a blank name, community or book.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }
        if self.community_id.trim().is_empty() {
            return Err(DomainError::MissingField("community"));
        }
        if self.book_id.trim().is_empty() {
            return Err(DomainError::MissingField("book"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_club_from_backend_json() {
        let club: ReadingClub = serde_json::from_value(json!({
            "id": "c1",
            "name": "Sci-fi nights",
            "memberCount": 12,
            "isJoinAvailable": true,
            "book": {"id": "b1", "title": "Dune"},
            "community": {"id": "k1", "name": "Readers"},
            "nextMeeting": "2024-06-01T19:00:00"
        }))
        .unwrap();
        assert_eq!(club.member_count, 12);
        assert!(club.is_join_available);
        assert_eq!(club.community.unwrap().name.as_deref(), Some("Readers"));
        assert!(club.next_meeting.is_some());
    }

    #[test]
    fn test_new_community_validation() {
        let ok = NewCommunity {
            name: "Readers".into(),
            description: "All genres".into(),
        };
        assert_eq!(ok.validate(), Ok(()));
        let blank = NewCommunity {
            description: "  ".into(),
            ..ok
        };
        assert_eq!(blank.validate(), Err(DomainError::MissingField("description")));
    }

    #[test]
    fn test_new_club_payload() {
        let club = NewReadingClub {
            name: "Club".into(),
            description: String::new(),
            community_id: "k1".into(),
            book_id: "b1".into(),
            next_meeting: None,
        };
        assert_eq!(club.validate(), Ok(()));
        assert_eq!(
            serde_json::to_value(&club).unwrap(),
            json!({"name": "Club", "description": "", "communityId": "k1", "bookId": "b1"})
        );
        let no_book = NewReadingClub {
            book_id: String::new(),
            ..club
        };
        assert_eq!(no_book.validate(), Err(DomainError::MissingField("book")));
    }
}
