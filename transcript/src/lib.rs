//! Merlin transcripts for Fiat-Shamir, built on the Strobe-128 duplex from
//! [`strobe_lite`].
//!
//! A [`Transcript`] records prover messages and derives verifier challenges
//! from the full history. [`Transcript::build_rng`] forks it into a
//! [`TranscriptRngBuilder`] that yields prover randomness bound to the
//! transcript, secret witnesses and external entropy.
//!
//! Outputs are byte-for-byte compatible with other Merlin v1.0
//! implementations given the same sequence of calls.

mod errors;
pub mod rng;
mod sponge;
mod transcript;
mod utils;

pub use crate::errors::TranscriptError;
pub use crate::rng::{TranscriptRng, TranscriptRngBuilder};
pub use crate::sponge::TranscriptSponge;
pub use crate::transcript::Transcript;

/// Protocol label passed to the Strobe initialization.
pub const MERLIN_PROTOCOL_LABEL: &[u8] = b"Merlin v1.0";

/// Metadata label framing the application domain separator.
pub const DOMAIN_SEPARATOR: &[u8] = b"dom-sep";

/// Metadata label absorbed before the external entropy.
pub const RNG_LABEL: &[u8] = b"rng";

/// Bytes of external entropy drawn when finalizing an RNG.
pub const ENTROPY_BYTES: usize = 32;
