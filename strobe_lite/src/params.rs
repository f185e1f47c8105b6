//! Fixed Strobe-128 parameters. These are part of the wire format: changing
//! any of them changes every output byte.

/// Number of 64-bit lanes in the Keccak-f\[1600\] state.
pub const KECCAK_LANES: usize = 25;

/// Size in bytes of the duplex state buffer.
pub const STATE_BYTES: usize = KECCAK_LANES * 8;

/// Target security level in bits.
pub const SECURITY_BITS: usize = 128;

/// The Strobe block size `R = b/8 - sec/4 - 2`, in bytes.
pub const STROBE_R: u8 = (STATE_BYTES - SECURITY_BITS / 4 - 2) as u8;

/// Protocol name and version written into the initial state.
pub const STROBE_VERSION: &[u8] = b"STROBEv1.0.2";

/// Domain byte written at `R + 1` by every forced permutation.
pub(crate) const PAD_SUFFIX: u8 = 0x80;

/// Padding byte written just after the final data byte.
pub(crate) const PAD_BYTE: u8 = 0x04;

/// The first six bytes of the initial state: `[1, R + 2, 1, 0, 1, 96]`.
pub(crate) const INIT_PREFIX: [u8; 6] = [1, STROBE_R + 2, 1, 0, 1, 12 * 8];
