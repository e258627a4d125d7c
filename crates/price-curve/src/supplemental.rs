//! Adjuster overlays on top of a sponsor's price curve.

use {
    crate::{
        Error,
        MAX_SCALING_FACTOR,
        NEUTRAL,
        element::{pack, shares_direction, unpack},
    },
    alloy::primitives::U256,
};

/// Combines `base` with a supplemental curve of raw scaling factors.
///
/// Each shared index becomes `base + supplemental - neutral` and keeps the
/// base element's duration. Base elements past the end of `supplemental` are
/// copied unchanged, surplus supplemental factors are ignored.
pub fn apply_supplemental(base: &[U256], supplemental: &[U256]) -> Result<Vec<U256>, Error> {
    base.iter()
        .enumerate()
        .map(|(i, word)| {
            let Some(&adjustment) = supplemental.get(i) else {
                return Ok(*word);
            };
            let element = unpack(*word);
            if !shares_direction(element.scaling_factor, adjustment) {
                return Err(Error::InvalidDirection(element.scaling_factor, adjustment));
            }
            let combined = element
                .scaling_factor
                .checked_add(adjustment)
                .and_then(|sum| sum.checked_sub(NEUTRAL))
                .filter(|combined| *combined <= MAX_SCALING_FACTOR)
                .ok_or(Error::Overflow)?;
            pack(element.block_duration, combined)
        })
        .collect()
}
