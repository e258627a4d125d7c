use alloy::primitives::{U256, U512};

/// Computes `x * q / d` rounding down.
///
/// Returns `None` if `d` is `0` or if the result overflows a 256-bit integer.
pub fn mul_ratio(x: U256, q: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }

    // fast path when math in U256 doesn't overflow
    if let Some(res) = x.checked_mul(q) {
        return Some(res / d);
    }

    let div = (U512::from(x) * U512::from(q)) / U512::from(d);
    narrow(div)
}

/// Computes `x * q / d` rounding up.
///
/// Returns `None` if `d` is `0` or if the result overflows a 256-bit integer.
pub fn mul_ratio_ceil(x: U256, q: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }

    // fast path when math in U256 doesn't overflow
    if let Some(p) = x.checked_mul(q) {
        let (div, rem) = (p / d, p % d);
        return div.checked_add(U256::from(!rem.is_zero()));
    }

    let p = U512::from(x) * U512::from(q);
    let d = U512::from(d);
    let (div, rem) = (p / d, p % d);

    narrow(div)?.checked_add(U256::from(!rem.is_zero()))
}

/// Divides rounding up, `0` stays `0`.
///
/// Returns `None` if `d` is `0`.
pub fn div_ceil(n: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }
    if n.is_zero() {
        return Some(U256::ZERO);
    }
    Some((n - U256::from(1)) / d + U256::from(1))
}

fn narrow(value: U512) -> Option<U256> {
    let limbs = value.into_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs_slice(&limbs[..4]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_ratio_rounds_down() {
        let x = U256::from(10);
        assert_eq!(mul_ratio(x, U256::from(2), U256::from(3)), Some(U256::from(6)));
        assert_eq!(mul_ratio(x, U256::from(3), U256::from(3)), Some(U256::from(10)));
        assert_eq!(mul_ratio(x, U256::from(1), U256::ZERO), None);
    }

    #[test]
    fn mul_ratio_ceil_rounds_up() {
        let x = U256::from(10);
        assert_eq!(
            mul_ratio_ceil(x, U256::from(2), U256::from(3)),
            Some(U256::from(7))
        );
        assert_eq!(
            mul_ratio_ceil(x, U256::from(3), U256::from(3)),
            Some(U256::from(10))
        );
        assert_eq!(mul_ratio_ceil(x, U256::from(1), U256::ZERO), None);
    }

    #[test]
    fn intermediate_product_may_exceed_256_bits() {
        let x = U256::MAX;
        assert_eq!(mul_ratio(x, U256::from(2), U256::from(2)), Some(U256::MAX));
        assert_eq!(
            mul_ratio_ceil(x, U256::from(3), U256::from(3)),
            Some(U256::MAX)
        );
        assert_eq!(mul_ratio(x, U256::from(3), U256::from(2)), None);
        assert_eq!(mul_ratio_ceil(x, U256::from(3), U256::from(2)), None);
    }

    #[test]
    fn div_ceil_keeps_zero() {
        assert_eq!(div_ceil(U256::ZERO, U256::from(7)), Some(U256::ZERO));
        assert_eq!(div_ceil(U256::from(7), U256::from(7)), Some(U256::from(1)));
        assert_eq!(div_ceil(U256::from(8), U256::from(7)), Some(U256::from(2)));
        assert_eq!(div_ceil(U256::from(8), U256::ZERO), None);
    }
}
