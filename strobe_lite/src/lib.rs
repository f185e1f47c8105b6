//! A lightweight Strobe-128 duplex over Keccak-f\[1600\].
//!
//! Only the operations a Fiat-Shamir transcript needs are provided:
//! `meta-AD`, `AD`, `PRF` and `KEY`. The byte layout, padding and flag
//! framing follow Strobe v1.0.2 exactly, so output streams agree with other
//! conforming implementations.

mod error;
pub mod keccak;
pub mod params;
mod strobe;

pub use crate::error::StrobeError;
pub use crate::strobe::{OpFlags, Strobe128};
