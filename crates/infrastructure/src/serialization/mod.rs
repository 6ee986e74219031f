//! Deterministic JSON serialization for the on-disk session store.

mod json;

pub use json::*;
