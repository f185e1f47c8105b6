//! A minimal Strobe-128 duplex supporting only `meta-AD`, `AD`, `PRF` and
//! `KEY`, which is all a Fiat-Shamir transcript needs.

use std::fmt;
use std::ops::BitOr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::StrobeError;
use crate::keccak::keccak_f1600;
use crate::params::{
    INIT_PREFIX, KECCAK_LANES, PAD_BYTE, PAD_SUFFIX, STATE_BYTES, STROBE_R, STROBE_VERSION,
};

/// The flag byte describing a Strobe operation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Zeroize)]
pub struct OpFlags(u8);

impl OpFlags {
    /// Inbound.
    pub const I: OpFlags = OpFlags(1);
    /// Application data.
    pub const A: OpFlags = OpFlags(1 << 1);
    /// Cipher: output depends on the state, forces a fresh block.
    pub const C: OpFlags = OpFlags(1 << 2);
    /// Transport. Not produced by any supported operation.
    pub const T: OpFlags = OpFlags(1 << 3);
    /// Metadata.
    pub const M: OpFlags = OpFlags(1 << 4);
    /// Keytree. Not produced by any supported operation.
    pub const K: OpFlags = OpFlags(1 << 5);

    pub const AD: OpFlags = OpFlags(Self::A.0);
    pub const META_AD: OpFlags = OpFlags(Self::A.0 | Self::M.0);
    pub const KEY: OpFlags = OpFlags(Self::A.0 | Self::C.0);
    pub const PRF: OpFlags = OpFlags(Self::I.0 | Self::A.0 | Self::C.0);

    pub const fn empty() -> Self {
        OpFlags(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: OpFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OpFlags {
    type Output = OpFlags;

    fn bitor(self, rhs: OpFlags) -> OpFlags {
        OpFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for OpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(OpFlags, &str); 6] = [
            (OpFlags::I, "I"),
            (OpFlags::A, "A"),
            (OpFlags::C, "C"),
            (OpFlags::T, "T"),
            (OpFlags::M, "M"),
            (OpFlags::K, "K"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "OpFlags(empty)")
        } else {
            write!(f, "OpFlags({})", set.join("|"))
        }
    }
}

/// Strobe-128 over Keccak-f\[1600\].
///
/// `state` is the authoritative copy of the sponge between permutations; it
/// is packed into lanes only inside [`Strobe128::run_f`]. Cloning copies the
/// whole buffer, so a clone shares nothing with its source.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Strobe128 {
    state: [u8; STATE_BYTES],
    pos: u8,
    pos_begin: u8,
    cur_flags: OpFlags,
}

impl fmt::Debug for Strobe128 {
    // Never print the state: after KEY it holds secret material.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strobe128")
            .field("pos", &self.pos)
            .field("pos_begin", &self.pos_begin)
            .field("cur_flags", &self.cur_flags)
            .finish_non_exhaustive()
    }
}

impl Strobe128 {
    /// Initializes the duplex and absorbs `protocol_label` as metadata.
    pub fn new(protocol_label: &[u8]) -> Self {
        let mut state = [0u8; STATE_BYTES];
        state[..INIT_PREFIX.len()].copy_from_slice(&INIT_PREFIX);
        state[INIT_PREFIX.len()..INIT_PREFIX.len() + STROBE_VERSION.len()]
            .copy_from_slice(STROBE_VERSION);
        permute(&mut state);

        let mut strobe = Strobe128 {
            state,
            pos: 0,
            pos_begin: 0,
            cur_flags: OpFlags::empty(),
        };
        strobe.start_op(OpFlags::META_AD);
        strobe.absorb(protocol_label);
        strobe
    }

    pub fn meta_ad(&mut self, data: &[u8], more: bool) -> Result<(), StrobeError> {
        self.begin_op(OpFlags::META_AD, more)?;
        self.absorb(data);
        Ok(())
    }

    pub fn ad(&mut self, data: &[u8], more: bool) -> Result<(), StrobeError> {
        self.begin_op(OpFlags::AD, more)?;
        self.absorb(data);
        Ok(())
    }

    /// Fills `dest` with pseudorandom output. Every byte handed out is zeroed
    /// in the state.
    pub fn prf(&mut self, dest: &mut [u8], more: bool) -> Result<(), StrobeError> {
        self.begin_op(OpFlags::PRF, more)?;
        self.squeeze(dest);
        Ok(())
    }

    /// Overwrites state bytes with `data`, replacing rather than mixing them.
    pub fn key(&mut self, data: &[u8], more: bool) -> Result<(), StrobeError> {
        self.begin_op(OpFlags::KEY, more)?;
        self.overwrite(data);
        Ok(())
    }

    /// Current cursor into the rate, always below [`STROBE_R`].
    pub fn position(&self) -> usize {
        self.pos as usize
    }

    /// Flags of the currently open operation.
    pub fn flags(&self) -> OpFlags {
        self.cur_flags
    }

    fn begin_op(&mut self, flags: OpFlags, more: bool) -> Result<(), StrobeError> {
        if more {
            if flags != self.cur_flags {
                tracing::warn!(
                    open = ?self.cur_flags,
                    requested = ?flags,
                    "strobe continuation with mismatched flags"
                );
                return Err(StrobeError::FlagMismatch {
                    open: self.cur_flags,
                    requested: flags,
                });
            }
            return Ok(());
        }
        self.start_op(flags);
        Ok(())
    }

    fn start_op(&mut self, flags: OpFlags) {
        let old_begin = self.pos_begin;
        self.pos_begin = self.pos + 1;
        self.cur_flags = flags;

        self.absorb(&[old_begin, flags.bits()]);

        if flags.contains(OpFlags::C) && self.pos != 0 {
            self.run_f();
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        for byte in data {
            self.state[self.pos as usize] ^= byte;
            self.advance();
        }
    }

    fn squeeze(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.state[self.pos as usize];
            self.state[self.pos as usize] = 0;
            self.advance();
        }
    }

    fn overwrite(&mut self, data: &[u8]) {
        for byte in data {
            self.state[self.pos as usize] = *byte;
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
        if self.pos == STROBE_R {
            self.run_f();
        }
    }

    /// Pads the current block and applies the permutation.
    fn run_f(&mut self) {
        self.state[self.pos as usize] ^= self.pos_begin;
        self.state[self.pos as usize + 1] ^= PAD_BYTE;
        self.state[STROBE_R as usize + 1] ^= PAD_SUFFIX;
        permute(&mut self.state);
        self.pos = 0;
        self.pos_begin = 0;
    }
}

fn permute(state: &mut [u8; STATE_BYTES]) {
    let mut lanes = [0u64; KECCAK_LANES];
    for (lane, chunk) in lanes.iter_mut().zip(state.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = u64::from_le_bytes(word);
    }
    keccak_f1600(&mut lanes);
    for (chunk, lane) in state.chunks_exact_mut(8).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
    lanes.zeroize();
}
