//! Request types sent to the Booky backend.

mod body;
mod method;
mod query;
mod spec;

pub use body::{MultipartPart, PartKind, RequestBody};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::ApiRequest;
