//! Error types for the Idlescape data core.

use thiserror::Error;

/// Top-level error type for strict construction and configuration.
///
/// The lenient read paths (`get`, `get_by_name`, derived views) never return
/// this type; they log through `tracing` and hand back `None` instead.
#[derive(Error, Debug)]
pub enum DataError {
    /// The raw document was expected to be a JSON object keyed by id.
    #[error("Expected a JSON object of records, found {found}")]
    NotAnObject {
        /// JSON type name of what was found instead.
        found: &'static str,
    },

    /// A record key is not a canonical base-10 integer.
    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),

    /// A record value could not be converted into its typed form.
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Key of the offending record, as it appeared in the source.
        id: String,
        /// Deserializer message.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, DataError>;
