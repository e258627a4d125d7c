//! Fixed-point and 256-bit integer helpers shared by the hashing and pricing
//! crates.

pub mod math;
pub mod serialization;
pub mod units;
