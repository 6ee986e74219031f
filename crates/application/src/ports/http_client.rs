//! HTTP Client port

use async_trait::async_trait;
use booky_domain::{ApiRequest, ApiResponse};

/// Errors raised before a response is received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The request timed out.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("could not resolve {host}: {message}")]
    DnsError {
        /// Host name
        host: String,
        /// Resolver message
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Host name
        host: String,
        /// Port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The base URL and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing requests against the backend.
///
/// Implementations resolve [`ApiRequest::path_and_query`] against their base
/// URL and return the raw response whatever its status.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a request, attaching `Authorization: Bearer <token>` when
    /// `bearer` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    async fn execute(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, HttpClientError>;
}
