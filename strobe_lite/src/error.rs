use crate::strobe::OpFlags;

/// A misuse of the duplex by its caller.
///
/// These indicate a programming error rather than an environmental failure:
/// the operation is rejected before any state is touched, and the caller
/// should treat the instance as unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrobeError {
    /// A continuation (`more = true`) was requested with flags that differ
    /// from the currently open operation.
    #[error("cannot continue operation {open:?} as {requested:?}")]
    FlagMismatch {
        open: OpFlags,
        requested: OpFlags,
    },
    /// A single message or output buffer does not fit in a 32-bit length
    /// prefix.
    #[error("buffer length {len} exceeds the maximum of 2^32 - 1 bytes")]
    MessageTooLong { len: usize },
}
