//! HTTP Request body types

use serde::Serialize;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// HTTP request body sent to the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON body, sent as `application/json`
    Json(Value),
    /// Multipart form data
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Json(_) => false,
            Self::Multipart(parts) => parts.is_empty(),
        }
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
            Self::Multipart(_) => Some("multipart/form-data"),
        }
    }
}

/// One named part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    /// Form field name
    pub name: String,
    /// Part content
    pub kind: PartKind,
}

/// Content of a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartKind {
    /// JSON document sent with an `application/json` content type
    Json(Value),
    /// File upload
    File {
        /// File name reported to the server
        file_name: String,
        /// Explicit content type; guessed from the file name when absent
        content_type: Option<String>,
        /// Raw file bytes
        bytes: Vec<u8>,
    },
}

impl MultipartPart {
    /// Creates a JSON part.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(name: impl Into<String>, value: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(value).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self {
            name: name.into(),
            kind: PartKind::Json(value),
        })
    }

    /// Creates a file part.
    #[must_use]
    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind: PartKind::File {
                file_name: file_name.into(),
                content_type: None,
                bytes,
            },
        }
    }
}
