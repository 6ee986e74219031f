//! Request specification type

use serde::Serialize;
use uuid::Uuid;

use super::{HttpMethod, MultipartPart, QueryParam, QueryParams, RequestBody};
use crate::error::DomainResult;

/// A request against the backend, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Correlation id used in logs
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Path starting with `/`, without query string
    pub path: String,
    /// Query parameters
    pub query: QueryParams,
    /// Request body
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> DomainResult<Self> {
        self.body = RequestBody::json(value)?;
        Ok(self)
    }

    /// Sets a multipart body.
    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Returns the path with the encoded query string appended.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_path_without_query() {
        let request = ApiRequest::get("/communities");
        assert_eq!(request.path_and_query(), "/communities");
        assert_eq!(request.method, HttpMethod::Get);
    }

    #[test]
    fn test_path_with_query() {
        let request = ApiRequest::put("/exchanges/7/status").with_query("userId", "u1");
        assert_eq!(request.path_and_query(), "/exchanges/7/status?userId=u1");
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::post("/sign-in")
            .with_json(&json!({"email": "a@b.c"}))
            .unwrap();
        assert_eq!(request.body, RequestBody::Json(json!({"email": "a@b.c"})));
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        assert_ne!(ApiRequest::get("/a").id, ApiRequest::get("/a").id);
    }
}
