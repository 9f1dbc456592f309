//! Error types for the renal_core library.

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Validation errors reported before any formula executes.
///
/// Every variant is terminal for the invocation that produced it: the
/// engine never returns a partially computed result alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input was not supplied
    #[error("Missing required input: {0}")]
    MissingField(&'static str),

    /// A supplied input is not a usable number (NaN)
    #[error("Input is not a valid number: {0}")]
    NotNumeric(&'static str),

    /// A numeric input violates a domain invariant
    #[error("Input out of range: {0}")]
    OutOfRange(String),
}
