//! In-crate fakes for the ports.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use booky_domain::{
    ApiRequest, ApiResponse, HttpMethod, RequestBody, Session, Toast, ToastKind, User,
};
use serde_json::Value;

use crate::api::BookyApi;
use crate::context::AppContext;
use crate::ports::{
    HttpClient, HttpClientError, KeyValueStorage, LoadingIndicator, Notifier, StorageError,
};
use crate::session::{SessionHandle, SessionManager};

/// A user with predictable display fields.
pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: Some(format!("user-{id}")),
        name: Some(format!("Name {id}")),
        email: Some(format!("{id}@booky.test")),
        ..User::default()
    }
}

/// One request seen by [`FakeHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub query: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl RecordedCall {
    /// JSON body, or `Null` for other bodies.
    pub fn json(&self) -> Value {
        match &self.body {
            RequestBody::Json(value) => value.clone(),
            _ => Value::Null,
        }
    }
}

/// Routes by method and path (query ignored); unrouted calls get a 404.
#[derive(Default)]
pub struct FakeHttpClient {
    routes: Mutex<HashMap<(HttpMethod, String), (u16, String)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeHttpClient {
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.respond_text(method, path, status, &body.to_string());
    }

    pub fn respond_text(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: HttpMethod, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn execute(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, HttpClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method,
            path: request.path.clone(),
            query: request.query.encode(),
            bearer: bearer.map(str::to_string),
            body: request.body.clone(),
        });
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method, request.path.clone()))
            .cloned();
        Ok(match route {
            Some((status, body)) => ApiResponse::new(status, body),
            None => ApiResponse::new(404, "no route"),
        })
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    /// Messages of the toasts of `kind`, in order.
    pub fn messages(&self, kind: ToastKind) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
pub struct RecordingLoading {
    transitions: Mutex<Vec<bool>>,
}

impl RecordingLoading {
    pub fn transitions(&self) -> Vec<bool> {
        self.transitions.lock().unwrap().clone()
    }
}

impl LoadingIndicator for RecordingLoading {
    fn set_loading(&self, loading: bool) {
        self.transitions.lock().unwrap().push(loading);
    }
}

/// Fully wired application over fakes.
pub struct Harness {
    pub http: Arc<FakeHttpClient>,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub loading: Arc<RecordingLoading>,
    pub session: SessionHandle,
    pub api: BookyApi,
    pub ctx: Arc<AppContext>,
}

impl Harness {
    pub fn new() -> Self {
        let http = Arc::new(FakeHttpClient::default());
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let loading = Arc::new(RecordingLoading::default());
        let session = SessionHandle::new();
        let api = BookyApi::new(
            http.clone(),
            session.clone(),
            notifier.clone(),
            loading.clone(),
        );
        let ctx = Arc::new(AppContext::new(
            api.clone(),
            SessionManager::new(storage.clone()),
            notifier.clone(),
        ));
        Self {
            http,
            storage,
            notifier,
            loading,
            session,
            api,
            ctx,
        }
    }

    /// A harness with `user(id)` signed in under token `tok`.
    pub async fn signed_in(id: &str) -> Self {
        let harness = Self::new();
        harness
            .session
            .set(Session::new("tok".to_string(), user(id)))
            .await;
        harness
    }
}
