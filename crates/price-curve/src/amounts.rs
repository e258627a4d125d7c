//! Fill and claim amounts of a Tribunal auction at a given block.

use {
    crate::{Error, NEUTRAL, evaluate::evaluate, shares_direction, supplemental::apply_supplemental},
    alloy::primitives::{Address, U256},
    mandate::Lock,
    number::math::{mul_ratio, mul_ratio_ceil},
};

/// A token the filler delivers to a recipient.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillComponent {
    pub fill_token: Address,
    pub minimum_fill_amount: U256,
    pub recipient: Address,
    /// Whether the amount follows the auction in exact-in mode.
    pub apply_scaling: bool,
}

/// The auction parameters of one fill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Auction {
    pub price_curve: Vec<U256>,
    /// Raw scaling factors layered on `price_curve` by the adjuster.
    pub supplemental_price_curve: Vec<U256>,
    /// Block the curve starts at, `0` when the fill has no curve.
    pub target_block: u64,
    pub fill_block: u64,
    /// Scaling applied per wei of priority fee above the baseline.
    pub scaling_factor: U256,
    pub baseline_priority_fee: U256,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedAmounts {
    pub fill_amounts: Vec<U256>,
    pub claim_amounts: Vec<U256>,
    pub scaling_multiplier: U256,
    pub exact_in: bool,
}

impl Auction {
    /// Scaling factor of the combined curve at the fill block.
    pub fn current_scaling_factor(&self) -> Result<U256, Error> {
        let curve = apply_supplemental(&self.price_curve, &self.supplemental_price_curve)?;
        if self.target_block == 0 {
            if !curve.is_empty() {
                return Err(Error::InvalidTargetBlockDesignation);
            }
            return Ok(NEUTRAL);
        }
        if self.target_block > self.fill_block {
            return Err(Error::InvalidTargetBlock {
                target_block: self.target_block,
                fill_block: self.fill_block,
            });
        }
        evaluate(&curve, self.fill_block - self.target_block)
    }
}

/// Amounts owed to every fill component and claimable from every commitment
/// when filling at `auction.fill_block` with `priority_fee` per gas.
pub fn derive_amounts(
    auction: &Auction,
    components: &[FillComponent],
    commitments: &[Lock],
    priority_fee: U256,
) -> Result<DerivedAmounts, Error> {
    let current = auction.current_scaling_factor()?;
    let scaling_factor = auction.scaling_factor;
    if !shares_direction(scaling_factor, current) {
        return Err(Error::InvalidDirection(scaling_factor, current));
    }

    let exact_in = scaling_factor > NEUTRAL || (scaling_factor == NEUTRAL && current >= NEUTRAL);
    let fee = priority_fee_above_baseline(priority_fee, auction.baseline_priority_fee);
    let scaling_multiplier = if exact_in {
        (scaling_factor - NEUTRAL)
            .checked_mul(fee)
            .and_then(|bump| current.checked_add(bump))
    } else {
        (NEUTRAL - scaling_factor)
            .checked_mul(fee)
            .and_then(|discount| current.checked_sub(discount))
    }
    .ok_or(Error::ArithmeticOverflow)?;

    let fill_amounts = components
        .iter()
        .map(|component| {
            if exact_in && component.apply_scaling {
                mul_ratio_ceil(component.minimum_fill_amount, scaling_multiplier, NEUTRAL)
                    .ok_or(Error::ArithmeticOverflow)
            } else {
                Ok(component.minimum_fill_amount)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let claim_amounts = commitments
        .iter()
        .map(|commitment| {
            if exact_in {
                Ok(commitment.amount)
            } else {
                mul_ratio(commitment.amount, scaling_multiplier, NEUTRAL)
                    .ok_or(Error::ArithmeticOverflow)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        %current,
        %scaling_multiplier,
        exact_in,
        fill_block = auction.fill_block,
        "derived auction amounts"
    );
    Ok(DerivedAmounts {
        fill_amounts,
        claim_amounts,
        scaling_multiplier,
        exact_in,
    })
}

/// [`derive_amounts`] for a fill with a single, scaling component.
pub fn derive_amount(
    auction: &Auction,
    minimum_fill_amount: U256,
    commitments: &[Lock],
    priority_fee: U256,
) -> Result<DerivedAmounts, Error> {
    let component = FillComponent {
        minimum_fill_amount,
        apply_scaling: true,
        ..Default::default()
    };
    derive_amounts(auction, &[component], commitments, priority_fee)
}

pub fn priority_fee_above_baseline(priority_fee: U256, baseline: U256) -> U256 {
    priority_fee.saturating_sub(baseline)
}
