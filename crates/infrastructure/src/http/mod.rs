//! HTTP utilities for building requests.

mod body_builder;

pub use body_builder::{BodyBuildError, BuiltBody, build_body, guess_content_type};
