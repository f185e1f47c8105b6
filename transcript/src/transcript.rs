use strobe_lite::Strobe128;

use crate::errors::TranscriptError;
use crate::rng::TranscriptRngBuilder;
use crate::sponge::TranscriptSponge;
use crate::utils::{encode_len, trace_op};
use crate::{DOMAIN_SEPARATOR, MERLIN_PROTOCOL_LABEL};

/// A Merlin transcript: a Strobe-128 duplex with canonical
/// label / length / data framing on every operation.
///
/// Framing per call (`LE32` is a 4-byte little-endian length):
/// * `new(label)`: `meta-AD("dom-sep" || LE32(len))`, then `AD(label)`.
/// * `append_message(label, m)`: `meta-AD(label || LE32(len))`, then `AD(m)`.
/// * `challenge_bytes(label, d)`: `meta-AD(label || LE32(len))`, then `PRF(d)`.
#[derive(Clone, Debug)]
pub struct Transcript {
    strobe: Strobe128,
}

impl Transcript {
    /// Creates a transcript bound to the application domain separator
    /// `label`.
    ///
    /// # Panics
    ///
    /// If `label` is longer than `u32::MAX` bytes.
    pub fn new(label: &'static [u8]) -> Self {
        let mut transcript = Transcript {
            strobe: Strobe128::new(MERLIN_PROTOCOL_LABEL),
        };
        if let Err(err) = transcript.append_domain_separator(label) {
            panic!("cannot create transcript: {err}");
        }
        transcript
    }

    fn append_domain_separator(&mut self, label: &'static [u8]) -> Result<(), TranscriptError> {
        let len = encode_len(label.len())?;
        self.strobe.meta_ad(DOMAIN_SEPARATOR, false)?;
        self.strobe.meta_ad(&len, true)?;
        self.strobe.ad(label, false)?;
        trace_op("init", DOMAIN_SEPARATOR, label);
        Ok(())
    }

    pub fn append_message(
        &mut self,
        label: &'static [u8],
        message: &[u8],
    ) -> Result<(), TranscriptError> {
        self.frame(label, message.len())?;
        self.strobe.ad(message, false)?;
        trace_op("append", label, message);
        Ok(())
    }

    pub fn append_u64(&mut self, label: &'static [u8], value: u64) -> Result<(), TranscriptError> {
        self.append_message(label, &value.to_le_bytes())
    }

    pub fn challenge_bytes(
        &mut self,
        label: &'static [u8],
        dest: &mut [u8],
    ) -> Result<(), TranscriptError> {
        self.frame(label, dest.len())?;
        self.strobe.prf(dest, false)?;
        trace_op("challenge", label, dest);
        Ok(())
    }

    /// Forks the current state into a builder for prover randomness. The
    /// transcript itself is left untouched.
    pub fn build_rng(&self) -> TranscriptRngBuilder {
        TranscriptRngBuilder::new(self.strobe.clone())
    }

    /// Absorbs `label || LE32(len)` as a single metadata operation. The
    /// length is checked before the duplex is touched.
    fn frame(&mut self, label: &'static [u8], len: usize) -> Result<(), TranscriptError> {
        let len = encode_len(len)?;
        self.strobe.meta_ad(label, false)?;
        self.strobe.meta_ad(&len, true)?;
        Ok(())
    }
}

impl TranscriptSponge for Transcript {
    fn append_message(
        &mut self,
        label: &'static [u8],
        message: &[u8],
    ) -> Result<(), TranscriptError> {
        Transcript::append_message(self, label, message)
    }

    fn challenge_bytes(
        &mut self,
        label: &'static [u8],
        dest: &mut [u8],
    ) -> Result<(), TranscriptError> {
        Transcript::challenge_bytes(self, label, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use itertools::Itertools;

    const LOREM_FILL: u8 = 239;

    fn test_protocol_transcript() -> anyhow::Result<Transcript> {
        let mut transcript = Transcript::new(b"test protocol");
        transcript.append_message(b"test label", b"test data")?;
        Ok(transcript)
    }

    #[test]
    fn test_simple_vector() -> anyhow::Result<()> {
        let mut transcript = Transcript::new(b"test protocol");
        transcript.append_message(b"some label", b"some data")?;

        let mut challenge = [0u8; 32];
        transcript.challenge_bytes(b"challenge", &mut challenge)?;
        assert_eq!(
            challenge,
            hex!("d5a21972d0d5fe320c0d263fac7fffb8145aa640af6e9bca177c03c7efcf0615")
        );
        Ok(())
    }

    #[test]
    fn test_complex_vector() -> anyhow::Result<()> {
        let mut transcript = Transcript::new(b"test protocol");
        transcript.append_message(b"step1", b"some data")?;

        let data = [99u8; 1024];
        let mut challenge = [0u8; 32];
        for _ in 0..32 {
            transcript.challenge_bytes(b"challenge", &mut challenge)?;
            transcript.append_message(b"bigdata", &data)?;
            transcript.append_message(b"challengedata", &challenge)?;
        }
        assert_eq!(
            challenge,
            hex!("a8c933f54fae76e3f9bea93648c1308e7dfa2152dd51674ff3ca438351cf003c")
        );
        Ok(())
    }

    #[test]
    fn test_deterministic_challenges() -> anyhow::Result<()> {
        let mut first = test_protocol_transcript()?;
        let mut second = test_protocol_transcript()?;

        let (mut c1, mut c2) = ([0u8; 32], [0u8; 32]);
        first.challenge_bytes(b"challenge", &mut c1)?;
        second.challenge_bytes(b"challenge", &mut c2)?;
        assert_eq!(c1, c2);
        assert_ne!(c1, [0u8; 32]);
        Ok(())
    }

    #[test]
    fn test_framing_matches_raw_duplex() -> anyhow::Result<()> {
        let mut transcript = test_protocol_transcript()?;

        let mut raw = Strobe128::new(b"Merlin v1.0");
        raw.meta_ad(b"dom-sep", false)?;
        raw.meta_ad(&(b"test protocol".len() as u32).to_le_bytes(), true)?;
        raw.ad(b"test protocol", false)?;
        raw.meta_ad(b"test label", false)?;
        raw.meta_ad(&[9, 0, 0, 0], true)?;
        raw.ad(b"test data", false)?;
        raw.meta_ad(b"challenge", false)?;
        raw.meta_ad(&[32, 0, 0, 0], true)?;

        let (mut expected, mut actual) = ([0u8; 32], [0u8; 32]);
        raw.prf(&mut expected, false)?;
        transcript.challenge_bytes(b"challenge", &mut actual)?;
        assert_eq!(actual, expected);
        Ok(())
    }

    #[test]
    fn test_wrong_length_prefix_diverges() -> anyhow::Result<()> {
        let mut transcript = test_protocol_transcript()?;

        let mut raw = Strobe128::new(b"Merlin v1.0");
        raw.meta_ad(b"dom-sep", false)?;
        raw.meta_ad(&13u32.to_le_bytes(), true)?;
        raw.ad(b"test protocol", false)?;
        raw.meta_ad(b"test label", false)?;
        raw.meta_ad(&[8, 0, 0, 0], true)?;
        raw.ad(b"test data", false)?;
        raw.meta_ad(b"challenge", false)?;
        raw.meta_ad(&[32, 0, 0, 0], true)?;

        let (mut expected, mut actual) = ([0u8; 32], [0u8; 32]);
        raw.prf(&mut expected, false)?;
        transcript.challenge_bytes(b"challenge", &mut actual)?;
        assert_ne!(actual, expected);
        Ok(())
    }

    #[test]
    fn test_challenges_never_repeat_under_interaction() -> anyhow::Result<()> {
        let mut transcript = test_protocol_transcript()?;
        let mut silent = test_protocol_transcript()?;
        let lorem = [LOREM_FILL; 1024];

        let mut challenges = Vec::with_capacity(32);
        for _ in 0..32 {
            let mut challenge = [0u8; 32];
            let mut silent_challenge = [0u8; 32];
            transcript.challenge_bytes(b"challenge", &mut challenge)?;
            silent.challenge_bytes(b"challenge", &mut silent_challenge)?;
            if !challenges.is_empty() {
                assert_ne!(challenge, silent_challenge);
            }
            challenges.push(challenge);

            transcript.append_message(b"lorem ipsum", &lorem)?;
            transcript.append_message(b"challenge data", &lorem)?;
        }
        assert!(challenges.iter().all_unique());
        Ok(())
    }

    #[test]
    fn test_append_u64_is_little_endian_message() -> anyhow::Result<()> {
        let mut with_u64 = Transcript::new(b"u64");
        let mut with_bytes = Transcript::new(b"u64");
        with_u64.append_u64(b"n", 0x0102_0304_0506_0708)?;
        with_bytes.append_message(b"n", &[8, 7, 6, 5, 4, 3, 2, 1])?;

        let (mut c1, mut c2) = ([0u8; 16], [0u8; 16]);
        with_u64.challenge_bytes(b"c", &mut c1)?;
        with_bytes.challenge_bytes(b"c", &mut c2)?;
        assert_eq!(c1, c2);
        Ok(())
    }

    #[test]
    fn test_trait_append_u64_matches_inherent() -> anyhow::Result<()> {
        let mut inherent = Transcript::new(b"u64");
        let mut through_trait = Transcript::new(b"u64");
        inherent.append_u64(b"n", 42)?;
        TranscriptSponge::append_u64(&mut through_trait, b"n", 42)?;

        let c1 = inherent.challenge_vec(b"c", 16)?;
        let c2 = through_trait.challenge_vec(b"c", 16)?;
        assert_eq!(c1, c2);
        Ok(())
    }

    #[test]
    fn test_challenge_bound_to_label_and_length() -> anyhow::Result<()> {
        let base = test_protocol_transcript()?;

        let mut short = base.clone();
        let mut long = base.clone();
        let mut relabeled = base.clone();

        let mut c_short = [0u8; 32];
        let mut c_long = [0u8; 64];
        let mut c_relabeled = [0u8; 32];
        short.challenge_bytes(b"challenge", &mut c_short)?;
        long.challenge_bytes(b"challenge", &mut c_long)?;
        relabeled.challenge_bytes(b"other", &mut c_relabeled)?;

        assert_ne!(c_short[..], c_long[..32]);
        assert_ne!(c_short, c_relabeled);
        Ok(())
    }

    #[test]
    fn test_domain_separator_changes_challenges() -> anyhow::Result<()> {
        let mut a = Transcript::new(b"protocol a");
        let mut b = Transcript::new(b"protocol b");
        let (mut c1, mut c2) = ([0u8; 32], [0u8; 32]);
        a.challenge_bytes(b"challenge", &mut c1)?;
        b.challenge_bytes(b"challenge", &mut c2)?;
        assert_ne!(c1, c2);
        Ok(())
    }

    #[test]
    fn test_clone_is_independent() -> anyhow::Result<()> {
        let mut original = test_protocol_transcript()?;
        let mut same = original.clone();
        let mut diverged = original.clone();

        original.append_message(b"next", b"shared")?;
        same.append_message(b"next", b"shared")?;
        diverged.append_message(b"next", b"different")?;

        let c1 = original.challenge_vec(b"challenge", 32)?;
        let c2 = same.challenge_vec(b"challenge", 32)?;
        let c3 = diverged.challenge_vec(b"challenge", 32)?;
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
        Ok(())
    }

    /// A toy public-coin exchange written only against the trait, the way
    /// proof code consumes transcripts.
    fn run_rounds(transcript: &mut impl TranscriptSponge, commitments: &[[u8; 8]]) -> Vec<u64> {
        commitments
            .iter()
            .map(|commitment| {
                transcript.append_message(b"commitment", commitment).unwrap();
                let bytes = transcript.challenge_vec(b"round challenge", 8).unwrap();
                u64::from_le_bytes(bytes.try_into().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_prover_and_verifier_agree_through_trait() {
        let commitments = [[1u8; 8], [2u8; 8], [3u8; 8]];

        let mut prover = Transcript::new(b"toy protocol");
        prover.append_u64(b"rounds", commitments.len() as u64).unwrap();
        let mut verifier = Transcript::new(b"toy protocol");
        verifier.append_u64(b"rounds", commitments.len() as u64).unwrap();

        let prover_challenges = run_rounds(&mut prover, &commitments);
        let verifier_challenges = run_rounds(&mut verifier, &commitments);
        assert_eq!(prover_challenges, verifier_challenges);
        assert!(prover_challenges.iter().all_unique());
    }
}
