use {
    crate::{
        Error,
        NEUTRAL,
        element::{CurveElement, shares_direction, unpack},
    },
    alloy::primitives::U256,
    number::math::div_ceil,
};

/// The scaling factor `blocks_passed` blocks into the auction.
///
/// Each segment interpolates from its own factor to the factor of the element
/// after it, or to neutral for the last segment. A segment directly after a
/// jump marker instead starts at the marker's factor and ends at its own.
/// Exact-in segments round up, exact-out segments round down.
pub fn evaluate(curve: &[U256], blocks_passed: u64) -> Result<U256, Error> {
    if curve.is_empty() {
        return Ok(NEUTRAL);
    }

    let elements = curve.iter().copied().map(unpack).collect::<Vec<_>>();
    let mut blocks_counted = 0u64;
    for (i, element) in elements.iter().enumerate() {
        if element.is_jump() {
            continue;
        }

        let segment_end = blocks_counted + element.block_duration;
        if blocks_passed < segment_end {
            let (start, end) = match i.checked_sub(1).map(|previous| elements[previous]) {
                Some(marker) if marker.is_jump() => (marker.scaling_factor, element.scaling_factor),
                _ => (
                    element.scaling_factor,
                    elements
                        .get(i + 1)
                        .map_or(NEUTRAL, |next| next.scaling_factor),
                ),
            };
            let elapsed = blocks_passed.saturating_sub(blocks_counted);
            let factor = interpolate(start, end, element, elapsed)?;
            tracing::trace!(
                segment = i,
                blocks_passed,
                %start,
                %end,
                %factor,
                "evaluated price curve"
            );
            return Ok(factor);
        }
        blocks_counted = segment_end;
    }

    Err(Error::BlocksExceeded(blocks_counted))
}

fn interpolate(
    start: U256,
    end: U256,
    segment: &CurveElement,
    elapsed: u64,
) -> Result<U256, Error> {
    if !shares_direction(start, end) {
        return Err(Error::InvalidDirection(start, end));
    }
    if start == end {
        return Ok(start);
    }

    // Factors stay below 2^240 and durations below 2^16, so the weighted sum
    // fits in 256 bits.
    let duration = U256::from(segment.block_duration);
    let remaining = U256::from(segment.block_duration - elapsed);
    let weighted = start * remaining + end * U256::from(elapsed);

    if start > NEUTRAL {
        div_ceil(weighted, duration).ok_or(Error::ArithmeticOverflow)
    } else {
        Ok(weighted / duration)
    }
}
