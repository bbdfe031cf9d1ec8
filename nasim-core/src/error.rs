//! Error types for NASim core

use thiserror::Error;

use crate::Address;

/// Result type alias using HostError
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors that can occur in NASim core operations
#[derive(Error, Debug)]
pub enum HostError {
    /// Service name is not part of the host's service map
    #[error("Unknown service '{name}' on host {address}")]
    UnknownService { address: Address, name: String },

    /// OS name is not part of the host's OS map
    #[error("Unknown OS '{name}' on host {address}")]
    UnknownOs { address: Address, name: String },

    /// Vector handed to the decoder has the wrong width
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLength { expected: usize, actual: usize },

    /// Host value is NaN or infinite
    #[error("Invalid {field}: {value} (must be finite)")]
    InvalidValue { field: &'static str, value: f64 },

    /// Two hosts in a scenario share an address
    #[error("Duplicate host address: {0}")]
    DuplicateAddress(Address),

    /// No host with the given address
    #[error("Host not found: {0}")]
    HostNotFound(Address),

    /// Scenario file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid JSON
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
