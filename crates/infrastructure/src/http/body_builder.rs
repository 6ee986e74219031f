//! HTTP request body builder.
//!
//! Turns the domain [`RequestBody`] into what reqwest sends: raw JSON bytes
//! or a multipart form.

use reqwest::multipart::{Form, Part};
use booky_domain::{MultipartPart, PartKind, RequestBody};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// Invalid body configuration.
    #[error("Invalid body configuration: {message}")]
    InvalidConfig {
        /// What was wrong
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Encoder message
        message: String,
    },
}

/// Result of building a body.
pub enum BuiltBody {
    /// No body.
    None,
    /// Encoded JSON document.
    Json(Vec<u8>),
    /// Multipart form data.
    Multipart(Form),
}

impl BuiltBody {
    /// Get the Content-Type header value.
    ///
    /// Multipart forms return `None`: reqwest sets the header with the
    /// boundary itself.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

/// Guesses a file part's content type from its name.
#[must_use]
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Build an HTTP body from a domain body.
///
/// # Errors
///
/// Returns an error if JSON cannot be encoded or a part's content type is
/// not a valid MIME type.
pub fn build_body(body: &RequestBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        RequestBody::None => Ok(BuiltBody::None),
        RequestBody::Json(value) => serde_json::to_vec(value)
            .map(BuiltBody::Json)
            .map_err(|e| BodyBuildError::SerializationError {
                message: e.to_string(),
            }),
        RequestBody::Multipart(parts) => build_multipart_form(parts).map(BuiltBody::Multipart),
    }
}

/// Build a multipart form from its parts.
fn build_multipart_form(parts: &[MultipartPart]) -> Result<Form, BodyBuildError> {
    let mut form = Form::new();

    for part in parts {
        let built = match &part.kind {
            PartKind::Json(value) => {
                let content =
                    serde_json::to_vec(value).map_err(|e| BodyBuildError::SerializationError {
                        message: e.to_string(),
                    })?;
                Part::bytes(content).mime_str(mime::APPLICATION_JSON.as_ref())
            }
            PartKind::File {
                file_name,
                content_type,
                bytes,
            } => {
                let mime_type = content_type
                    .clone()
                    .unwrap_or_else(|| guess_content_type(file_name));
                Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(&mime_type)
            }
        }
        .map_err(|e| BodyBuildError::InvalidConfig {
            message: format!("Invalid MIME type: {e}"),
        })?;

        form = form.part(part.name.clone(), built);
    }

    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&json!({"isbn": "978"})).unwrap();
        let built = build_body(&body).unwrap();
        assert_eq!(built.content_type(), Some("application/json"));
        let BuiltBody::Json(bytes) = built else {
            unreachable!("json body expected");
        };
        assert_eq!(bytes, br#"{"isbn":"978"}"#.to_vec());
    }

    #[test]
    fn test_no_body() {
        let built = build_body(&RequestBody::None).unwrap();
        assert!(matches!(built, BuiltBody::None));
    }

    #[test]
    fn test_multipart_body() {
        let parts = vec![
            MultipartPart::json("post", &json!({"body": "hi", "communityId": null})).unwrap(),
            MultipartPart::file("image", "cover.png", vec![1, 2, 3]),
        ];
        let built = build_body(&RequestBody::Multipart(parts)).unwrap();
        assert!(built.content_type().is_none());
        assert!(matches!(built, BuiltBody::Multipart(_)));
    }

    #[test]
    fn test_invalid_explicit_mime_type() {
        let parts = vec![MultipartPart {
            name: "image".into(),
            kind: PartKind::File {
                file_name: "x".into(),
                content_type: Some("not a mime".into()),
                bytes: vec![],
            },
        }];
        let result = build_body(&RequestBody::Multipart(parts));
        assert!(matches!(result, Err(BodyBuildError::InvalidConfig { .. })));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("cover.png"), "image/png");
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("blob"), "application/octet-stream");
    }
}
