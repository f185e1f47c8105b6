//! Errors surfaced by transcripts and transcript-bound RNGs.
//!
//! Two classes are kept apart: usage violations, which mean the caller is
//! driving the protocol incorrectly and the transcript must not be used
//! further, and entropy failures, which come from the external source and
//! may be retried by the caller with a fresh builder.

use strobe_lite::StrobeError;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    /// The duplex rejected the operation.
    #[error("transcript usage violation: {0}")]
    Usage(#[from] StrobeError),
    /// The external RNG could not produce entropy.
    #[error("entropy source failed: {0}")]
    Entropy(#[source] rand::Error),
    /// The external reader failed or ended before 32 bytes were read.
    #[error("could not read 32 bytes of entropy: {0}")]
    EntropyIo(#[source] std::io::Error),
}

impl TranscriptError {
    /// Whether this error is a caller bug rather than an external failure.
    pub fn is_usage_violation(&self) -> bool {
        matches!(self, TranscriptError::Usage(_))
    }
}
