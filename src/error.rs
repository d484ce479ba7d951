//! Error types for the Pokedex CLI
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these errors come from the API client and command handling.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the command handlers and API client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Requested resource does not exist upstream (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status other than 404
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected JSON shape
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command invoked with missing or malformed arguments
    #[error("{0}")]
    Usage(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex CLI.
pub type Result<T> = std::result::Result<T, PokedexError>;
