//! Error types for bit-level dictionary coding.

use thiserror::Error;

/// Error variants for encode and decode operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A value falls outside the inclusive bounds of a range codec.
    ///
    /// On encode this means the caller passed a value the range cannot
    /// represent; on decode it means the bit stream carried an offset
    /// larger than the range span.
    #[error("value {value} outside range [{lo}, {hi}]")]
    OutOfRange {
        /// The offending value, widened for display.
        value: i128,
        /// Inclusive lower bound of the range.
        lo: i128,
        /// Inclusive upper bound of the range.
        hi: i128,
    },

    /// An I/O error surfaced by the underlying bit stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
