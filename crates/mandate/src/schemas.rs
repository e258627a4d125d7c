//! Mandate schemas shipped with the SDK.

use crate::{Error, FieldDef, MandateType};

/// A flat mandate: one fill on one chain, no nested types.
///
/// ```text
/// Mandate(uint256 chainId,address tribunal,address recipient,uint256 expires,address token,
///     uint256 minimumAmount,uint256 baselinePriorityFee,uint256 scalingFactor,bytes32 salt)
/// ```
pub fn simple() -> Result<MandateType, Error> {
    MandateType::flat(vec![
        FieldDef::new("chainId", "uint256"),
        FieldDef::new("tribunal", "address"),
        FieldDef::new("recipient", "address"),
        FieldDef::new("expires", "uint256"),
        FieldDef::new("token", "address"),
        FieldDef::new("minimumAmount", "uint256"),
        FieldDef::new("baselinePriorityFee", "uint256"),
        FieldDef::new("scalingFactor", "uint256"),
        FieldDef::new("salt", "bytes32"),
    ])
}

/// Tribunal's mandate: an adjuster and one or more fills, each with a price
/// curve and a list of fill components.
pub fn tribunal() -> Result<MandateType, Error> {
    MandateType::new(
        vec![
            FieldDef::new("adjuster", "address"),
            FieldDef::new("fills", "Mandate_Fill[]"),
        ],
        [
            (
                "Mandate_Fill".to_string(),
                vec![
                    FieldDef::new("chainId", "uint256"),
                    FieldDef::new("tribunal", "address"),
                    FieldDef::new("expires", "uint256"),
                    FieldDef::new("components", "Mandate_FillComponent[]"),
                    FieldDef::new("baselinePriorityFee", "uint256"),
                    FieldDef::new("scalingFactor", "uint256"),
                    FieldDef::new("priceCurve", "uint256[]"),
                    FieldDef::new("salt", "bytes32"),
                ],
            ),
            (
                "Mandate_FillComponent".to_string(),
                vec![
                    FieldDef::new("fillToken", "address"),
                    FieldDef::new("minimumFillAmount", "uint256"),
                    FieldDef::new("recipient", "address"),
                    FieldDef::new("applyScaling", "bool"),
                ],
            ),
        ],
    )
}
