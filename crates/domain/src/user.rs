//! User records and user-related payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::wire;

/// A postal address attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Address id
    #[serde(deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Longitude
    pub longitude: Option<f64>,
    /// Latitude
    pub latitude: Option<f64>,
}

/// A full user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Unique handle
    #[serde(default)]
    pub username: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// First name
    #[serde(default)]
    pub name: Option<String>,
    /// Last name
    #[serde(default)]
    pub lastname: Option<String>,
    /// Free-text biography
    #[serde(default)]
    pub description: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<Address>,
    /// Registration timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_created: Option<NaiveDateTime>,
}

/// A compact user record, as embedded in lists and other records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreview {
    /// User id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Unique handle
    #[serde(default)]
    pub username: Option<String>,
    /// First name
    #[serde(default)]
    pub name: Option<String>,
    /// Last name
    #[serde(default)]
    pub lastname: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn full_name_of(name: Option<&str>, lastname: Option<&str>) -> Option<String> {
    match (non_blank(name), non_blank(lastname)) {
        (Some(n), Some(l)) => Some(format!("{n} {l}")),
        (Some(n), None) => Some(n.to_string()),
        (None, Some(l)) => Some(l.to_string()),
        (None, None) => None,
    }
}

fn initial_of(value: Option<&str>) -> Option<char> {
    non_blank(value)
        .and_then(|s| s.chars().next())
        .map(|c| c.to_ascii_uppercase())
}

macro_rules! person_helpers {
    ($ty:ty) => {
        impl $ty {
            /// Returns the username, falling back to `"User"`.
            #[must_use]
            pub fn display_name(&self) -> &str {
                non_blank(self.username.as_deref()).unwrap_or("User")
            }

            /// Returns `name lastname`, falling back to the username.
            #[must_use]
            pub fn full_name(&self) -> String {
                full_name_of(self.name.as_deref(), self.lastname.as_deref())
                    .unwrap_or_else(|| self.display_name().to_string())
            }

            /// Returns up to two uppercase initials for an avatar placeholder.
            #[must_use]
            pub fn initials(&self) -> String {
                let first = initial_of(self.name.as_deref())
                    .or_else(|| initial_of(self.username.as_deref()))
                    .unwrap_or('U');
                initial_of(self.lastname.as_deref())
                    .map_or_else(|| first.to_string(), |last| format!("{first}{last}"))
            }
        }
    };
}

person_helpers!(User);
person_helpers!(UserPreview);

impl From<&User> for UserPreview {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            lastname: user.lastname.clone(),
            image: user.image.clone(),
        }
    }
}

/// Credentials for `POST /sign-in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Response of `POST /sign-in`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignInResponse {
    /// Bearer token
    pub token: String,
    /// The signed-in user
    pub user: User,
}

/// Payload of follow and unfollow calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowRequest {
    /// User to follow or unfollow
    pub target_user_id: String,
}

/// Payload of `POST /users/search-by-books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchUsersByBooksRequest {
    /// Catalog ids the returned users must all own
    pub book_ids: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "username": "ana",
            "name": "Ana",
            "lastname": "Lopez",
            "address": {"state": "CABA", "country": "AR"},
            "dateCreated": "2024-03-01T12:00:00"
        }))
        .unwrap();
        assert_eq!(user.full_name(), "Ana Lopez");
        assert_eq!(user.initials(), "AL");
        assert_eq!(user.address.unwrap().country.as_deref(), Some("AR"));
        assert!(user.date_created.is_some());
    }

    #[test]
    fn test_preview_fallbacks() {
        let user: UserPreview = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.display_name(), "User");
        assert_eq!(user.full_name(), "User");
        assert_eq!(user.initials(), "U");
    }

    #[test]
    fn test_initials_from_username() {
        let user = UserPreview {
            id: "u2".into(),
            username: Some("bob".into()),
            ..UserPreview::default()
        };
        assert_eq!(user.initials(), "B");
        assert_eq!(user.full_name(), "bob");
    }

    #[test]
    fn test_payload_field_names() {
        let follow = serde_json::to_value(FollowRequest {
            target_user_id: "u2".into(),
        })
        .unwrap();
        assert_eq!(follow, json!({"target_user_id": "u2"}));
        let search = serde_json::to_value(SearchUsersByBooksRequest {
            book_ids: vec!["b1".into()],
        })
        .unwrap();
        assert_eq!(search, json!({"book_ids": ["b1"]}));
    }
}
