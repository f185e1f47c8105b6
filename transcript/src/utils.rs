use strobe_lite::StrobeError;

/// Encodes a buffer length as the 4-byte little-endian prefix used in every
/// framed operation.
pub(crate) fn encode_len(len: usize) -> Result<[u8; 4], StrobeError> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| StrobeError::MessageTooLong { len })
}

/// Emits a trace event for a completed transcript operation. Raw bytes are
/// only included with the `debug-transcript` feature.
pub(crate) fn trace_op(op: &'static str, label: &[u8], bytes: &[u8]) {
    #[cfg(feature = "debug-transcript")]
    tracing::trace!(
        target: "transcript",
        op,
        label = %String::from_utf8_lossy(label),
        bytes = ?bytes,
        "transcript op"
    );
    #[cfg(not(feature = "debug-transcript"))]
    tracing::trace!(
        target: "transcript",
        op,
        label = %String::from_utf8_lossy(label),
        len = bytes.len(),
        "transcript op"
    );
}
