//! The Keccak-f\[1600\] permutation.
//!
//! The state is 25 little-endian 64-bit lanes, indexed `x + 5 * y`. Each of
//! the 24 rounds applies theta, rho, pi, chi and iota in that order.

use crate::params::KECCAK_LANES;

/// Number of rounds for the 1600-bit width.
pub const KECCAK_F_ROUNDS: usize = 24;

/// Iota round constants.
const ROUND_CONSTANTS: [u64; KECCAK_F_ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Rho rotation offsets, in the order lanes are visited by [`PI_LANES`].
const RHO_OFFSETS: [u32; KECCAK_LANES - 1] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Pi lane walk starting from lane 1.
const PI_LANES: [usize; KECCAK_LANES - 1] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Applies the full 24-round Keccak-f\[1600\] permutation to `state` in place.
pub fn keccak_f1600(state: &mut [u64; KECCAK_LANES]) {
    let mut columns = [0u64; 5];
    for round_constant in ROUND_CONSTANTS {
        // Theta
        for x in 0..5 {
            columns[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = columns[(x + 4) % 5] ^ columns[(x + 1) % 5].rotate_left(1);
            for y in (0..KECCAK_LANES).step_by(5) {
                state[y + x] ^= d;
            }
        }

        // Rho and pi
        let mut carried = state[1];
        for (&lane, &offset) in PI_LANES.iter().zip(RHO_OFFSETS.iter()) {
            let next = state[lane];
            state[lane] = carried.rotate_left(offset);
            carried = next;
        }

        // Chi
        for y in (0..KECCAK_LANES).step_by(5) {
            let row = [
                state[y],
                state[y + 1],
                state[y + 2],
                state[y + 3],
                state[y + 4],
            ];
            for x in 0..5 {
                state[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // Iota
        state[0] ^= round_constant;
    }
}
