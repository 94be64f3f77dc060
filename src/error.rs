//! Error types for configuration and header line handling.
//!
//! Header value parsing never fails; malformed values degrade into
//! best-effort parts and [diagnostics](crate::diagnostics).

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors outside of the tolerant parsing path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A header line has no `:` between name and value.
    #[error("Missing ':' separator in header line: {0:?}")]
    MissingColon(String),

    /// A parser configuration value is out of range.
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    /// A severity name could not be recognized.
    #[error("Unknown severity: {0:?}")]
    UnknownSeverity(String),
}
