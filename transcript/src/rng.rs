//! Prover randomness bound to the transcript.
//!
//! A [`TranscriptRngBuilder`] forks the transcript's duplex, optionally keys
//! it with secret witnesses, and is finalized with 32 bytes of external
//! entropy into a [`TranscriptRng`]. The output is a PRF of the whole public
//! transcript, the witnesses and the entropy, so a weak external RNG alone
//! cannot cause nonce reuse across different statements or witnesses.

use std::io::Read;

use rand::{CryptoRng, RngCore};
use strobe_lite::Strobe128;

use crate::errors::TranscriptError;
use crate::utils::{encode_len, trace_op};
use crate::{ENTROPY_BYTES, RNG_LABEL};

#[derive(Debug)]
pub struct TranscriptRngBuilder {
    strobe: Strobe128,
}

impl TranscriptRngBuilder {
    pub(crate) fn new(strobe: Strobe128) -> Self {
        Self { strobe }
    }

    /// Keys the forked state with a secret `witness`, framed as
    /// `meta-AD(label || LE32(len))` then `KEY(witness)`.
    pub fn rekey_with_witness_bytes(
        mut self,
        label: &'static [u8],
        witness: &[u8],
    ) -> Result<Self, TranscriptError> {
        let len = encode_len(witness.len())?;
        self.strobe.meta_ad(label, false)?;
        self.strobe.meta_ad(&len, true)?;
        self.strobe.key(witness, false)?;
        trace_op("rekey", label, &[]);
        Ok(self)
    }

    /// Draws 32 bytes from `rng` and finalizes. A failing RNG is reported,
    /// never replaced by zeros.
    pub fn finalize<R>(self, rng: &mut R) -> Result<TranscriptRng, TranscriptError>
    where
        R: RngCore + CryptoRng,
    {
        let mut entropy = [0u8; ENTROPY_BYTES];
        rng.try_fill_bytes(&mut entropy).map_err(TranscriptError::Entropy)?;
        tracing::debug!(target: "transcript", source = "rng", "finalizing transcript rng");
        self.finalize_with_entropy(entropy)
    }

    /// Reads exactly 32 bytes from `reader` and finalizes. A short read is
    /// an error.
    pub fn finalize_from_reader<R: Read>(
        self,
        mut reader: R,
    ) -> Result<TranscriptRng, TranscriptError> {
        let mut entropy = [0u8; ENTROPY_BYTES];
        reader.read_exact(&mut entropy).map_err(TranscriptError::EntropyIo)?;
        tracing::debug!(target: "transcript", source = "reader", "finalizing transcript rng");
        self.finalize_with_entropy(entropy)
    }

    fn finalize_with_entropy(
        mut self,
        entropy: [u8; ENTROPY_BYTES],
    ) -> Result<TranscriptRng, TranscriptError> {
        self.strobe.meta_ad(RNG_LABEL, false)?;
        self.strobe.key(&entropy, false)?;
        Ok(TranscriptRng {
            strobe: self.strobe,
        })
    }
}

/// A finalized transcript-bound RNG. Every read frames its length and
/// advances the state, so output never repeats.
#[derive(Debug)]
pub struct TranscriptRng {
    strobe: Strobe128,
}

impl TranscriptRng {
    /// Fills `dest`, framed as `meta-AD(LE32(len))` then `PRF(dest)`.
    pub fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), TranscriptError> {
        let len = encode_len(dest.len())?;
        self.strobe.meta_ad(&len, false)?;
        self.strobe.prf(dest, false)?;
        Ok(())
    }
}

impl RngCore for TranscriptRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    /// # Panics
    ///
    /// If `dest` is longer than `u32::MAX` bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill(dest) {
            panic!("transcript rng misuse: {err}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.try_fill(dest).map_err(rand::Error::new)
    }
}

impl CryptoRng for TranscriptRng {}
