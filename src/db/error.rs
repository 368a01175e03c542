//! Storage-specific error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`SerializeError`**: Failures encoding or decoding stored JSON values
//! - **`Unavailable`**: The backing store cannot be reached at all
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Stored value could not be encoded or decoded
    #[error("Error during serialization: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Storage backend cannot be used
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
