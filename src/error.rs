//! Error types for the Lexnet library.
//!
//! Every fallible operation returns [`Result`], whose error side is
//! [`LexnetError`]. The variants follow three broad classes:
//!
//! - configuration failures ([`LexnetError::Config`], [`LexnetError::Io`]) abort
//!   construction of a [`VocabularyGraph`](crate::vocabulary::VocabularyGraph);
//! - argument failures ([`LexnetError::InvalidArgument`]) reject a single call;
//! - boundary conditions ([`LexnetError::Boundary`]) report a documented edge
//!   case such as asking for the outcast of a single term.
//!
//! # Examples
//!
//! ```
//! use lexnet::error::{LexnetError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexnetError::invalid_argument("unknown term: zebra"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexnet operations.
#[derive(Error, Debug)]
pub enum LexnetError {
    /// I/O errors while reading an input relation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or structurally invalid input relations.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller contract violations.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Documented edge cases with no meaningful answer.
    #[error("Boundary condition: {0}")]
    Boundary(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Broken internal invariants
    #[error("Error: {0}")]
    Other(String),

    /// Failures carrying extra context, such as the path of an unreadable input
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexnetError.
pub type Result<T> = std::result::Result<T, LexnetError>;

impl LexnetError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LexnetError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexnetError::InvalidArgument(msg.into())
    }

    /// Create a new boundary condition error.
    pub fn boundary<S: Into<String>>(msg: S) -> Self {
        LexnetError::Boundary(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        LexnetError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Whether this error aborted construction of a graph.
    pub fn is_config(&self) -> bool {
        matches!(self, LexnetError::Config(_) | LexnetError::Io(_))
    }

    /// Whether this error rejected a caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LexnetError::InvalidArgument(_))
    }
}
