use std::fmt::Debug;

use crate::errors::TranscriptError;

/// A `TranscriptSponge` is the byte-oriented interface a public-coin protocol
/// uses to become non-interactive via Fiat-Shamir: prover messages are
/// appended, verifier challenges are squeezed out.
///
/// Prover and verifier must make the same calls with the same labels in the
/// same order, otherwise their challenges diverge.
pub trait TranscriptSponge: Clone + Send + Sync + Debug {
    /// Absorb a prover message under `label`.
    fn append_message(
        &mut self,
        label: &'static [u8],
        message: &[u8],
    ) -> Result<(), TranscriptError>;

    /// Absorb a 64-bit integer under `label`, encoded little-endian.
    fn append_u64(&mut self, label: &'static [u8], value: u64) -> Result<(), TranscriptError> {
        self.append_message(label, &value.to_le_bytes())
    }

    /// Fill `dest` with challenge bytes bound to everything absorbed so far,
    /// to `label`, and to `dest.len()`. Internal state is modified.
    fn challenge_bytes(
        &mut self,
        label: &'static [u8],
        dest: &mut [u8],
    ) -> Result<(), TranscriptError>;

    /// Like [`TranscriptSponge::challenge_bytes`] but allocates the output.
    fn challenge_vec(
        &mut self,
        label: &'static [u8],
        len: usize,
    ) -> Result<Vec<u8>, TranscriptError> {
        let mut out = vec![0u8; len];
        self.challenge_bytes(label, &mut out)?;
        Ok(out)
    }
}
