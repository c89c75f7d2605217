//! Business logic behind the HTTP handlers.
//!
//! Services are plain functions generic over the repository traits so they
//! can be exercised against the in-memory test repository.

pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod errors;
