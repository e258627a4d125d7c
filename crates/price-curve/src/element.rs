//! Packing of single curve elements.

use {
    crate::{Error, MAX_BLOCK_DURATION, MAX_SCALING_FACTOR, NEUTRAL},
    alloy::primitives::U256,
};

const DURATION_SHIFT: usize = 240;

/// One unpacked curve element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveElement {
    pub block_duration: u64,
    pub scaling_factor: U256,
}

impl CurveElement {
    /// Zero-duration elements mark an instant jump rather than a segment.
    pub fn is_jump(&self) -> bool {
        self.block_duration == 0
    }

    pub fn pack(&self) -> Result<U256, Error> {
        pack(self.block_duration, self.scaling_factor)
    }
}

/// Packs a duration and a scaling factor into `(duration << 240) | factor`.
pub fn pack(block_duration: u64, scaling_factor: U256) -> Result<U256, Error> {
    if block_duration > MAX_BLOCK_DURATION {
        return Err(Error::InvalidBlockDuration(block_duration));
    }
    if scaling_factor > MAX_SCALING_FACTOR {
        return Err(Error::InvalidScalingFactor(scaling_factor));
    }
    Ok((U256::from(block_duration) << DURATION_SHIFT) | scaling_factor)
}

pub fn unpack(word: U256) -> CurveElement {
    CurveElement {
        block_duration: (word >> DURATION_SHIFT).to::<u64>(),
        scaling_factor: word & MAX_SCALING_FACTOR,
    }
}

/// Whether two scaling factors describe the same kind of auction. Neutral is
/// compatible with everything.
pub fn shares_direction(a: U256, b: U256) -> bool {
    a == NEUTRAL || b == NEUTRAL || (a > NEUTRAL) == (b > NEUTRAL)
}
