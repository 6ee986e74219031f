//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It resolves request paths against the configured backend base URL.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use booky_application::ports::{HttpClient, HttpClientError};
use booky_domain::{ApiRequest, ApiResponse, ClientSettings, HttpMethod};
use reqwest::{Client, Method};
use tracing::trace;
use url::Url;

use crate::http::{BuiltBody, build_body};

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl ReqwestHttpClient {
    /// Creates a client for the backend described by `settings`.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "Booky/0.1.0"
    /// - Timeout: `request_timeout_secs`, or none
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &ClientSettings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent("Booky/0.1.0")
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, settings.base_url()).with_timeout(settings.request_timeout()))
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Joins the base URL with the request path and query.
    fn url_for(&self, request: &ApiRequest) -> Result<Url, HttpClientError> {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))
    }

    fn host_of(error: &reqwest::Error) -> String {
        error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string()
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: Self::host_of(error),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: Self::host_of(error),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, HttpClientError> {
        let url = self.url_for(request)?;
        let timeout_ms = self
            .timeout
            .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let body =
            build_body(&request.body).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;
        if let Some(content_type) = body.content_type() {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        builder = match body {
            BuiltBody::None => builder,
            BuiltBody::Json(bytes) => builder.body(bytes),
            BuiltBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        let duration = start.elapsed();
        trace!(status, bytes = body_bytes.len(), ?duration, "response received");

        Ok(ApiResponse {
            duration,
            ..ApiResponse::new(status, body_bytes)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base: &str) -> ReqwestHttpClient {
        ReqwestHttpClient::with_client(Client::new(), base)
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Put),
            Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let settings = ClientSettings {
            api_base_url: "http://localhost:8080/".into(),
            request_timeout_secs: Some(5),
            ..ClientSettings::default()
        };
        let client = ReqwestHttpClient::new(&settings).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_url_for_joins_path_and_query() {
        let request = ApiRequest::get("/books/search").with_query("q", "el quijote");
        let url = client("http://api.booky.test/v1/").url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.booky.test/v1/books/search?q=el+quijote"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = client("not a url").url_for(&ApiRequest::get("/posts"));
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let result = client("http://127.0.0.1:1")
            .execute(&ApiRequest::get("/communities"), Some("tok"))
            .await;
        assert!(matches!(
            result,
            Err(HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_))
        ));
    }
}
