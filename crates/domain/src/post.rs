//! Posts and comments.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::community::Community;
use crate::user::UserPreview;
use crate::wire;

/// A post, optionally scoped to a community.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Text body; the first line doubles as the title
    #[serde(default)]
    pub body: Option<String>,
    /// Creation timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_created: Option<NaiveDateTime>,
    /// Attached image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Author id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub user_id: Option<String>,
    /// Community id, absent for general posts
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub community_id: Option<String>,
    /// Author preview
    #[serde(default)]
    pub user: Option<UserPreview>,
    /// Community, when embedded
    #[serde(default)]
    pub community: Option<Community>,
    /// Number of comments
    #[serde(default)]
    pub comments_count: u32,
    /// Number of likes
    #[serde(default)]
    pub likes_count: u32,
}

/// A comment on a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    /// Text body
    #[serde(default)]
    pub body: Option<String>,
    /// Creation timestamp
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub date_created: Option<NaiveDateTime>,
    /// Author id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub user_id: Option<String>,
    /// Post id
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub post_id: Option<String>,
    /// Author preview
    #[serde(default)]
    pub user: Option<UserPreview>,
}

/// JSON part of the multipart `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Text body
    pub body: String,
    /// Target community; `null` makes a general post
    pub community_id: Option<String>,
}

/// Image attached to a new post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImage {
    /// File name, used to guess the content type
    pub file_name: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

/// Payload of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Target post
    pub post_id: String,
    /// Text body
    pub body: String,
}
