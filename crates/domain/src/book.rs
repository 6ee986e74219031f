//! Catalog books, library entries and book-related payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::{QueryParam, QueryParams};
use crate::wire;

/// A catalog book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Catalog id
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    /// ISBN
    #[serde(default)]
    pub isbn: Option<String>,
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Short overview
    #[serde(default)]
    pub overview: Option<String>,
    /// Longer synopsis
    #[serde(default)]
    pub synopsis: Option<String>,
    /// Page count
    #[serde(default)]
    pub pages: Option<u32>,
    /// Edition label
    #[serde(default)]
    pub edition: Option<String>,
    /// Publisher
    #[serde(default)]
    pub publisher: Option<String>,
    /// Author
    #[serde(default)]
    pub author: Option<String>,
    /// Cover image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Average rating
    #[serde(default)]
    pub rate: Option<u32>,
    /// Category names
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Book {
    /// Returns the title or `"Untitled"`.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// Returns the author or `"Unknown author"`.
    #[must_use]
    pub fn author_or_default(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or("Unknown author")
    }
}

/// Reading progress of a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    /// Not started yet
    #[serde(rename = "TO_READ", alias = "to_read", alias = "to-read", alias = "WISHLIST")]
    ToRead,
    /// Currently reading
    #[serde(rename = "READING", alias = "reading")]
    Reading,
    /// Finished
    #[serde(rename = "READ", alias = "read")]
    Read,
}

impl ReadingStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 3] = [Self::ToRead, Self::Reading, Self::Read];

    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToRead => "TO_READ",
            Self::Reading => "READING",
            Self::Read => "READ",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToRead => "To read",
            Self::Reading => "Reading",
            Self::Read => "Read",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "TO_READ" | "WISHLIST" => Ok(Self::ToRead),
            "READING" => Ok(Self::Reading),
            "READ" => Ok(Self::Read),
            _ => Err(DomainError::InvalidReadingStatus(s.to_string())),
        }
    }
}

/// A user's library entry referencing a catalog book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBook {
    /// Library entry id, normalized to a string
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Owner of the entry
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub user_id: Option<String>,
    /// Explicit catalog id, sent by some endpoints alongside `book`
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub book_id: Option<String>,
    /// Reading progress
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    /// Marked as favorite
    #[serde(default)]
    pub favorite: bool,
    /// Offered for exchange
    #[serde(default)]
    pub wants_to_exchange: bool,
    /// The referenced catalog book
    #[serde(default)]
    pub book: Book,
}

impl UserBook {
    /// Returns the catalog id this entry refers to.
    ///
    /// Prefers the explicit `bookId` and falls back to the embedded book.
    #[must_use]
    pub fn catalog_id(&self) -> Option<&str> {
        self.book_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| Some(self.book.id.as_str()).filter(|id| !id.is_empty()))
    }
}

/// Query filters for `GET /books/library/{userId}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryFilter {
    /// Only favorites (or only non-favorites)
    pub favorites: Option<bool>,
    /// Only entries in this status
    pub status: Option<ReadingStatus>,
    /// Only entries offered (or not offered) for exchange
    pub wants_to_exchange: Option<bool>,
}

impl LibraryFilter {
    /// Filter for entries offered for exchange.
    #[must_use]
    pub const fn exchangeable() -> Self {
        Self {
            favorites: None,
            status: None,
            wants_to_exchange: Some(true),
        }
    }

    /// Converts the filter into query parameters, skipping unset fields.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(favorites) = self.favorites {
            params.add(QueryParam::new("favorites", favorites.to_string()));
        }
        if let Some(status) = self.status {
            params.add(QueryParam::new("status", status.as_str()));
        }
        if let Some(wants) = self.wants_to_exchange {
            params.add(QueryParam::new("wantsToExchange", wants.to_string()));
        }
        params
    }

    /// Applies the filter locally to already-loaded entries.
    #[must_use]
    pub fn matches(&self, entry: &UserBook) -> bool {
        self.favorites.is_none_or(|f| entry.favorite == f)
            && self.status.is_none_or(|s| entry.status == Some(s))
            && self
                .wants_to_exchange
                .is_none_or(|w| entry.wants_to_exchange == w)
    }
}

/// Payload of `POST /books/library`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddBookRequest {
    /// ISBN to add
    pub isbn: String,
    /// Initial reading status
    pub status: ReadingStatus,
}

/// Payload of `PUT /books/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateBookStatusRequest {
    /// New reading status
    pub status: ReadingStatus,
}

/// Payload of `PUT /books/{id}/exchange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateExchangePreferenceRequest {
    /// Whether the book is offered for exchange
    pub wants_to_exchange: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_book_numeric_id() {
        let entry: UserBook = serde_json::from_value(json!({
            "id": 15,
            "userId": "u2",
            "status": "READING",
            "wantsToExchange": true,
            "book": {"id": "b1", "title": "Dune"}
        }))
        .unwrap();
        assert_eq!(entry.id, "15");
        assert_eq!(entry.status, Some(ReadingStatus::Reading));
        assert_eq!(entry.catalog_id(), Some("b1"));
        assert!(!entry.favorite);
    }

    #[test]
    fn test_catalog_id_prefers_book_id() {
        let entry: UserBook =
            serde_json::from_value(json!({"id": "ob1", "bookId": "bk1", "book": {"id": "zz"}}))
                .unwrap();
        assert_eq!(entry.catalog_id(), Some("bk1"));
        let bare: UserBook = serde_json::from_value(json!({"id": "ob2"})).unwrap();
        assert_eq!(bare.catalog_id(), None);
        assert_eq!(bare.book.title_or_default(), "Untitled");
    }

    #[test]
    fn test_reading_status_parsing() {
        assert_eq!("to-read".parse::<ReadingStatus>().unwrap(), ReadingStatus::ToRead);
        assert_eq!("read".parse::<ReadingStatus>().unwrap(), ReadingStatus::Read);
        assert!("finished".parse::<ReadingStatus>().is_err());
        let lowercase: ReadingStatus = serde_json::from_value(json!("reading")).unwrap();
        assert_eq!(lowercase, ReadingStatus::Reading);
    }

    #[test]
    fn test_library_filter_query() {
        let filter = LibraryFilter {
            favorites: Some(true),
            status: Some(ReadingStatus::Read),
            wants_to_exchange: None,
        };
        assert_eq!(filter.to_query().encode(), "favorites=true&status=READ");
        assert!(LibraryFilter::default().to_query().is_empty());
        assert_eq!(
            LibraryFilter::exchangeable().to_query().encode(),
            "wantsToExchange=true"
        );
    }

    #[test]
    fn test_library_filter_matches() {
        let entry = UserBook {
            id: "1".into(),
            status: Some(ReadingStatus::Read),
            wants_to_exchange: true,
            ..UserBook::default()
        };
        assert!(LibraryFilter::exchangeable().matches(&entry));
        assert!(
            !LibraryFilter {
                status: Some(ReadingStatus::Reading),
                ..LibraryFilter::default()
            }
            .matches(&entry)
        );
    }

    #[test]
    fn test_payloads() {
        let add = serde_json::to_value(AddBookRequest {
            isbn: "978".into(),
            status: ReadingStatus::ToRead,
        })
        .unwrap();
        assert_eq!(add, json!({"isbn": "978", "status": "TO_READ"}));
        let flag = serde_json::to_value(UpdateExchangePreferenceRequest {
            wants_to_exchange: false,
        })
        .unwrap();
        assert_eq!(flag, json!({"wants_to_exchange": false}));
    }
}
