use alloy::primitives::{
    U256,
    utils::{ParseUnits, Unit, parse_units},
};

/// Readable amounts for fixed-point values, `1.5.eth()` is `1.5 * 10^18`.
///
/// Scaling factors use the same 18 decimals as ether, so `1.2.eth()` doubles
/// as a 120% scaling factor.
pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Gwei amount as wei (i.e. 1e9 wei).
    fn gwei(self) -> U256 {
        self.wei() * Unit::GWEI.wei()
    }

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for f64 {
    fn wei(self) -> U256 {
        parse(self, "wei")
    }

    fn gwei(self) -> U256 {
        parse(self, "gwei")
    }

    fn eth(self) -> U256 {
        parse(self, "ether")
    }
}

fn parse(value: f64, unit: &str) -> U256 {
    match parse_units(&value.to_string(), unit) {
        Ok(ParseUnits::U256(val)) => val,
        _ => panic!("could not parse number as u256: {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_ether() {
        assert_eq!(1.5.eth(), U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(1.005.eth(), U256::from(1_005_000_000_000_000_000u128));
        assert_eq!(2u64.eth(), U256::from(2_000_000_000_000_000_000u128));
        assert_eq!(3u64.gwei(), U256::from(3_000_000_000u64));
    }
}
