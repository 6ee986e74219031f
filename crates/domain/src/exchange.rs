//! Book exchanges and exchange payloads.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::book::UserBook;
use crate::error::{DomainError, DomainResult};
use crate::user::UserPreview;
use crate::wire;

/// Lifecycle status of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    /// Waiting for the owner's answer
    Pending,
    /// Accepted by the owner
    Accepted,
    /// Rejected by the owner
    Rejected,
    /// The owner answered with a counter-offer
    Countered,
    /// Both books changed hands
    Completed,
    /// Withdrawn
    Cancelled,
    /// Any status this client does not know
    #[serde(other)]
    Unknown,
}

impl ExchangeStatus {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Countered => "COUNTERED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Countered => "Countered",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true while the exchange still awaits an answer.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Countered)
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "COUNTERED" => Ok(Self::Countered),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidExchangeStatus(s.to_string())),
        }
    }
}

/// A proposed trade between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    /// Exchange id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// User who proposed the exchange
    #[serde(default, deserialize_with = "wire::id")]
    pub requester_id: String,
    /// User whose books are requested
    #[serde(default, deserialize_with = "wire::id")]
    pub owner_id: String,
    /// Current status
    #[serde(default = "unknown_status")]
    pub status: ExchangeStatus,
    /// Creation timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_created: Option<NaiveDateTime>,
    /// Last update timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_updated: Option<NaiveDateTime>,
    /// Requested catalog ids
    #[serde(default, deserialize_with = "wire::id_list")]
    pub owner_book_ids: Vec<String>,
    /// Offered catalog ids
    #[serde(default, deserialize_with = "wire::id_list")]
    pub requester_book_ids: Vec<String>,
    /// Requested books, when the backend embeds them
    #[serde(default, alias = "owner_books")]
    pub owner_books: Vec<UserBook>,
    /// Offered books, when the backend embeds them
    #[serde(default, alias = "requester_books")]
    pub requester_books: Vec<UserBook>,
    /// Requester preview
    #[serde(default)]
    pub requester: Option<UserPreview>,
    /// Owner preview
    #[serde(default)]
    pub owner: Option<UserPreview>,
}

const fn unknown_status() -> ExchangeStatus {
    ExchangeStatus::Unknown
}

impl Exchange {
    /// Returns true if `user_id` owns the requested books.
    #[must_use]
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Returns true if `user_id` proposed the exchange.
    #[must_use]
    pub fn is_requester(&self, user_id: &str) -> bool {
        self.requester_id == user_id
    }

    /// Returns the other participant's preview, seen from `user_id`.
    #[must_use]
    pub fn counterpart(&self, user_id: &str) -> Option<&UserPreview> {
        if self.is_owner(user_id) {
            self.requester.as_ref()
        } else {
            self.owner.as_ref()
        }
    }
}

/// Payload of `POST /exchanges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateExchangeRequest {
    /// Owner of the requested books
    pub owner_id: String,
    /// User proposing the exchange
    pub requester_id: String,
    /// Requested catalog ids
    pub owner_book_ids: Vec<String>,
    /// Offered catalog ids
    pub requester_book_ids: Vec<String>,
}

impl CreateExchangeRequest {
    /// Checks the payload before it is sent.
    ///
    /// # Errors
    ///
    /// Returns an error for blank participants, a self-exchange, or an empty
    /// book list on either side.
    pub fn validate(&self) -> DomainResult<()> {
        if self.owner_id.trim().is_empty() {
            return Err(DomainError::MissingField("owner_id"));
        }
        if self.requester_id.trim().is_empty() {
            return Err(DomainError::MissingField("requester_id"));
        }
        if self.owner_id == self.requester_id {
            return Err(DomainError::SelfExchange);
        }
        if self.owner_book_ids.is_empty() {
            return Err(DomainError::MissingField("owner_book_ids"));
        }
        if self.requester_book_ids.is_empty() {
            return Err(DomainError::MissingField("requester_book_ids"));
        }
        Ok(())
    }
}

/// Payload of `PUT /exchanges/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateExchangeStatusRequest {
    /// New status
    pub status: ExchangeStatus,
}

/// Payload of `PUT /exchanges/{id}/counter-offer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOfferRequest {
    /// Catalog ids the owner now gives
    pub owner_book_ids: Vec<String>,
    /// Catalog ids the owner now asks for
    pub requester_book_ids: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request() -> CreateExchangeRequest {
        CreateExchangeRequest {
            owner_id: "u2".into(),
            requester_id: "u1".into(),
            owner_book_ids: vec!["b1".into()],
            requester_book_ids: vec!["bk1".into()],
        }
    }

    #[test]
    fn test_exchange_from_backend_json() {
        let exchange: Exchange = serde_json::from_value(json!({
            "id": "e1",
            "requesterId": "u1",
            "ownerId": "u2",
            "status": "COUNTERED",
            "ownerBookIds": ["b1"],
            "requesterBookIds": [9],
            "owner_books": [{"id": 3, "book": {"id": "b1", "title": "Dune"}}],
            "owner": {"id": "u2", "username": "bob"}
        }))
        .unwrap();
        assert_eq!(exchange.status, ExchangeStatus::Countered);
        assert_eq!(exchange.requester_book_ids, vec!["9"]);
        assert_eq!(exchange.owner_books[0].book.title.as_deref(), Some("Dune"));
        assert_eq!(exchange.counterpart("u1").unwrap().username.as_deref(), Some("bob"));
        assert!(exchange.counterpart("u2").is_none());
    }

    #[test]
    fn test_unknown_status() {
        let exchange: Exchange =
            serde_json::from_value(json!({"id": "e2", "status": "EXPIRED"})).unwrap();
        assert_eq!(exchange.status, ExchangeStatus::Unknown);
        let missing: Exchange = serde_json::from_value(json!({"id": "e3"})).unwrap();
        assert_eq!(missing.status, ExchangeStatus::Unknown);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("accepted".parse::<ExchangeStatus>().unwrap(), ExchangeStatus::Accepted);
        assert!("UNKNOWN".parse::<ExchangeStatus>().is_err());
        assert!(ExchangeStatus::Pending.is_open());
        assert!(!ExchangeStatus::Completed.is_open());
    }

    #[test]
    fn test_create_payload_is_snake_case() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "owner_id": "u2",
                "requester_id": "u1",
                "owner_book_ids": ["b1"],
                "requester_book_ids": ["bk1"]
            })
        );
    }

    #[test]
    fn test_create_validation() {
        assert_eq!(request().validate(), Ok(()));
        let own = CreateExchangeRequest {
            owner_id: "u1".into(),
            ..request()
        };
        assert_eq!(own.validate(), Err(DomainError::SelfExchange));
        let empty = CreateExchangeRequest {
            owner_book_ids: Vec::new(),
            ..request()
        };
        assert_eq!(empty.validate(), Err(DomainError::MissingField("owner_book_ids")));
    }

    #[test]
    fn test_counter_offer_is_camel_case() {
        let value = serde_json::to_value(CounterOfferRequest {
            owner_book_ids: vec!["a".into()],
            requester_book_ids: vec!["b".into()],
        })
        .unwrap();
        assert_eq!(value, json!({"ownerBookIds": ["a"], "requesterBookIds": ["b"]}));
    }
}
