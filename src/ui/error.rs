//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal could not be set up or restored
    #[error("Terminal error: {0}")]
    TerminalError(String),

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// External link could not be opened
    #[error("Failed to open {url}: {reason}")]
    OpenLinkError { url: String, reason: String },
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
