//! Typed client for the Booky backend.
//!
//! Every call goes through [`BookyApi::send`]: the loading indicator is shown
//! for the duration of the call, the session token is attached, non-2xx
//! responses become [`ApplicationError::Http`] and every failure raises a
//! generic error toast. Callers add their own contextual toast on top.

mod auth;
mod books;
mod clubs;
mod communities;
mod exchanges;
mod gamification;
mod posts;
mod users;

pub use users::MIN_USER_QUERY_LEN;

use std::sync::Arc;

use booky_domain::{ApiRequest, Toast};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, error};

use crate::ports::{HttpClient, LoadingIndicator, Notifier};
use crate::session::SessionHandle;
use crate::{ApplicationError, ApplicationResult};

/// Shows the loading indicator until dropped.
struct LoadingGuard<'a> {
    indicator: &'a dyn LoadingIndicator,
}

impl<'a> LoadingGuard<'a> {
    fn new(indicator: &'a dyn LoadingIndicator) -> Self {
        indicator.set_loading(true);
        Self { indicator }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.indicator.set_loading(false);
    }
}

/// API client wrapper over an [`HttpClient`] port.
#[derive(Clone)]
pub struct BookyApi {
    http: Arc<dyn HttpClient>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
    loading: Arc<dyn LoadingIndicator>,
}

impl BookyApi {
    /// Creates the client.
    #[must_use]
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: SessionHandle,
        notifier: Arc<dyn Notifier>,
        loading: Arc<dyn LoadingIndicator>,
    ) -> Self {
        Self {
            http,
            session,
            notifier,
            loading,
        }
    }

    /// Returns the session handle shared with this client.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Transport`] when no response arrives,
    /// [`ApplicationError::Http`] for non-2xx statuses and
    /// [`ApplicationError::Decode`] when the body does not match `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApplicationResult<T> {
        let _loading = LoadingGuard::new(self.loading.as_ref());
        let token = self.session.token().await;

        debug!(
            request_id = %request.id,
            method = %request.method,
            path = %request.path_and_query(),
            has_auth = token.is_some(),
            "api request"
        );

        let result = self.dispatch(&request, token.as_deref()).await;
        if let Err(e) = &result {
            error!(request_id = %request.id, path = %request.path, error = %e, "api request failed");
            self.notifier.notify(Toast::error(format!("Error: {e}")));
        }
        result
    }

    /// Sends a request whose response body is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`BookyApi::send`], minus body decoding.
    pub async fn send_unit(&self, request: ApiRequest) -> ApplicationResult<()> {
        self.send::<IgnoredAny>(request).await.map(|_| ())
    }

    /// Sends a request expecting a JSON array; `null` decodes as empty.
    ///
    /// # Errors
    ///
    /// Same as [`BookyApi::send`].
    pub async fn send_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApplicationResult<Vec<T>> {
        Ok(self
            .send::<Option<Vec<T>>>(request)
            .await?
            .unwrap_or_default())
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> ApplicationResult<T> {
        let response = self.http.execute(request, token).await?;
        debug!(
            request_id = %request.id,
            status = %response.status,
            elapsed_ms = response.duration.as_millis(),
            "api response"
        );

        if !response.is_success() {
            return Err(ApplicationError::Http {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }

        response
            .json()
            .map_err(|e| ApplicationError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{Harness, user};
    use booky_domain::{HttpMethod, Session, ToastKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let harness = Harness::new();
        harness.http.respond(HttpMethod::Get, "/communities", 200, json!([]));
        harness.api.send_unit(ApiRequest::get("/communities")).await.unwrap();
        assert_eq!(harness.http.calls()[0].bearer, None);

        harness
            .session
            .set(Session::new("tok".into(), user("u1")))
            .await;
        harness.api.send_unit(ApiRequest::get("/communities")).await.unwrap();
        assert_eq!(harness.http.calls()[1].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_non_success_becomes_http_error_with_toast() {
        let harness = Harness::new();
        harness
            .http
            .respond_text(HttpMethod::Get, "/books/1", 404, "missing");
        let error = harness
            .api
            .send::<serde_json::Value>(ApiRequest::get("/books/1"))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "HTTP 404: missing");
        let toasts = harness.notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "Error: HTTP 404: missing");
    }

    #[tokio::test]
    async fn test_loading_indicator_wraps_every_call() {
        let harness = Harness::new();
        harness.http.respond(HttpMethod::Get, "/posts", 200, json!(null));
        let posts: Vec<serde_json::Value> =
            harness.api.send_list(ApiRequest::get("/posts")).await.unwrap();
        assert!(posts.is_empty());
        let _ = harness
            .api
            .send_unit(ApiRequest::get("/unrouted"))
            .await;
        assert_eq!(harness.loading.transitions(), vec![true, false, true, false]);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let harness = Harness::new();
        harness
            .http
            .respond(HttpMethod::Get, "/users/u1", 200, json!({"no_id": true}));
        let error = harness
            .api
            .send::<booky_domain::User>(ApiRequest::get("/users/u1"))
            .await
            .unwrap_err();
        assert!(matches!(error, ApplicationError::Decode(_)));
    }
}
