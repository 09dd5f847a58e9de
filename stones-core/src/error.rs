//! Error types for the stones core library.
//!
//! Event handling and validation never fail; errors only come from the
//! edges (configuration and the persistence collaborator).

use thiserror::Error;

/// Top-level error type for all fallible stones operations.
#[derive(Error, Debug)]
pub enum StonesError {
    /// Configuration could not be parsed or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The persistence collaborator failed to store a snapshot.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, StonesError>;
