//! Error types for the editing engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for engine operations.
///
/// All variants are local and synchronous. Nothing is retried internally;
/// re-issuing a rejected mutation is the caller's decision.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Offset or length outside `[0, text_len]`.
    #[error("range {pos}+{len} out of bounds for text of length {text_len}")]
    InvalidRange {
        pos: usize,
        len: usize,
        text_len: usize,
    },
    /// A local mutation was attempted while an earlier one awaits acknowledgment.
    #[error("model is paused awaiting acknowledgment of a local edit")]
    Busy,
    /// Internal invariant violated (a programming error in the engine or its caller).
    #[error("invariant violated: {0}")]
    Assertion(String),
}

impl Error {
    /// Build an [`Error::InvalidRange`].
    #[must_use]
    pub fn invalid_range(pos: usize, len: usize, text_len: usize) -> Self {
        Self::InvalidRange { pos, len, text_len }
    }

    /// Whether retrying the same call later could succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Assertion(_))
    }
}
