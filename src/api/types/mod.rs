//! API types: response envelope, errors and extractors

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::ApiResponse;
pub use error::{codes, ApiError};
pub use json::Json;
