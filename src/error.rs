//! UVMAC error types

use thiserror::Error;

/// Errors surfaced by key scheduling and tag generation.
///
/// Every variant is a caller precondition violation; the library recovers
/// nothing locally and leaves the context untouched on failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// User key exhausted while filling the hash key tables
    #[error("hash key exhausted after {consumed} words ({needed} words required, plus any l3 rejections)")]
    InsufficientKeyMaterial {
        /// Whole 64-bit words available in the provided key
        consumed: usize,
        /// Minimum words the schedule draws without rejections
        needed: usize,
    },

    /// Pad-key cursor would run past the declared stream length
    #[error("pad key exhausted: need {needed} words at position {position} of {length}")]
    PadKeyExhausted {
        /// Current cursor position in 64-bit words
        position: u64,
        /// Declared stream length in 64-bit words
        length: u64,
        /// Words the operation would consume
        needed: u64,
    },

    /// `update` called with a length that is zero or not a multiple of the block size
    #[error("update length {length} is not a positive multiple of {block} bytes")]
    InvalidUpdateLength {
        /// Offending message length in bytes
        length: usize,
        /// Required block granularity in bytes
        block: usize,
    },

    /// Build parameters outside the documented ranges
    #[error("invalid build configuration: {reason}")]
    InvalidConfiguration {
        /// Which documented range was violated
        reason: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
