//! Response types received from the Booky backend.

mod spec;

pub use spec::{ApiResponse, StatusCode};
