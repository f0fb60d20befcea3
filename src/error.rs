//! Error types for the palindrome scanner.
//!
//! The scan itself cannot fail; only configuration is validated.

use thiserror::Error;

/// Invalid scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Length bounds must satisfy `1 <= min_length <= max_length`
    #[error("invalid length range: min_length={min_length}, max_length={max_length} (need 1 <= min_length <= max_length)")]
    InvalidRange { min_length: usize, max_length: usize },
    /// The raw span cutoff is a multiple of `max_length` and must be at least 1
    #[error("raw span factor must be at least 1")]
    InvalidSpanFactor,
}
