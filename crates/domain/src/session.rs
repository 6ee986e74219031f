//! Authenticated session types.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Storage key holding the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key holding the JSON-serialized current user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// The signed-in user and their bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every request
    pub token: String,
    /// The signed-in user
    pub user: User,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub const fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// Returns the signed-in user's id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}
