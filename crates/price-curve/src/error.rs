use alloy::primitives::U256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("block duration {0} does not fit 16 bits")]
    InvalidBlockDuration(u64),
    #[error("scaling factor {0} does not fit 240 bits")]
    InvalidScalingFactor(U256),
    #[error("scaling factors {0} and {1} lie on opposite sides of neutral")]
    InvalidDirection(U256, U256),
    #[error("combined scaling factor is out of range")]
    Overflow,
    #[error("price curve is exhausted after {0} blocks")]
    BlocksExceeded(u64),
    #[error("a non-empty price curve needs a target block")]
    InvalidTargetBlockDesignation,
    #[error("target block {target_block} is after fill block {fill_block}")]
    InvalidTargetBlock { target_block: u64, fill_block: u64 },
    #[error("scaling multiplier does not fit 256 bits")]
    ArithmeticOverflow,
}
