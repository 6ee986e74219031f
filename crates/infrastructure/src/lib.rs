//! Booky Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest HTTP client, file-backed
//! session storage, settings loading and tracing-based feedback.

pub mod adapters;
pub mod config;
pub mod http;
pub mod notify;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use config::SettingsLoader;
pub use http::{BodyBuildError, BuiltBody, build_body};
pub use notify::{TracingLoadingIndicator, TracingNotifier};
pub use persistence::{FileKeyValueStorage, MemoryKeyValueStorage, default_storage_dir};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
