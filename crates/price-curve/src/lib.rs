//! Tribunal's auction price curves.
//!
//! A curve is a list of packed `U256` words, each holding a block duration and
//! a scaling factor in 18-decimal fixed point. The factor interpolates linearly
//! across every segment, and zero-duration elements mark instant jumps.
//! Factors above [`NEUTRAL`] describe exact-in auctions where the filler's
//! amounts scale up, factors below it exact-out auctions where the sponsor's
//! claim scales down.

pub mod amounts;
pub mod element;
mod error;
pub mod evaluate;
pub mod supplemental;

use alloy::primitives::U256;
pub use {
    amounts::{Auction, DerivedAmounts, FillComponent, derive_amount, derive_amounts},
    element::{CurveElement, pack, shares_direction, unpack},
    error::Error,
    evaluate::evaluate,
    supplemental::apply_supplemental,
};

/// A scaling factor of exactly 1.0.
pub const NEUTRAL: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Largest scaling factor that fits the 240 low bits of a curve element.
pub const MAX_SCALING_FACTOR: U256 =
    U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0x0000_ffff_ffff_ffff]);

/// Largest block duration that fits the 16 high bits of a curve element.
pub const MAX_BLOCK_DURATION: u64 = 0xffff;
