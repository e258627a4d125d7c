use {
    alloy::{
        primitives::{
            Address,
            B256,
            U256,
            hex::{self, FromHexError},
            keccak256,
        },
        sol_types::SolValue,
    },
    hex_literal::hex,
    std::{fmt, str::FromStr},
};

/// The EIP-712 domain name of The Compact.
pub const DOMAIN_NAME: &str = "The Compact";

/// The EIP-712 domain version of The Compact.
pub const DOMAIN_VERSION: &str = "1";

#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DomainSeparator(pub B256);

impl DomainSeparator {
    /// `keccak256("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")`
    pub const TYPE_HASH: B256 = B256::new(hex!(
        "8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
    ));

    pub fn new(chain_id: u64, contract_address: Address) -> Self {
        let encoded = (
            Self::TYPE_HASH,
            keccak256(DOMAIN_NAME),
            keccak256(DOMAIN_VERSION),
            U256::from(chain_id),
            contract_address,
        )
            .abi_encode();
        Self(keccak256(encoded))
    }
}

impl FromStr for DomainSeparator {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(B256::new(hex::FromHex::from_hex(s)?)))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// The digest a sponsor signs: `keccak256(0x1901 || domain || struct_hash)`.
///
/// https://eips.ethereum.org/EIPS/eip-712#specification
pub fn hashed_eip712_message(domain_separator: &DomainSeparator, struct_hash: &B256) -> B256 {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(domain_separator.0.as_slice());
    message[34..66].copy_from_slice(struct_hash.as_slice());
    keccak256(message)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[test]
    fn domain_type_hash() {
        assert_eq!(
            DomainSeparator::TYPE_HASH,
            keccak256(
                "EIP712Domain(string name,string version,uint256 chainId,address \
                 verifyingContract)"
            ),
        );
    }

    #[test]
    fn domain_separator_from_str() {
        assert!(
            DomainSeparator::from_str(
                "4ac11bdf0eb5972bae47825af851d20c342d88f466669ec58827be03650df019"
            )
            .is_ok()
        );
        assert!(DomainSeparator::from_str("4ac1").is_err());
    }

    #[test]
    fn domain_separator_mainnet() {
        let contract = address!("00000000000000171ede64904551eeDF3C6C9788");
        assert_eq!(
            DomainSeparator::new(1, contract),
            DomainSeparator(B256::new(hex!(
                "4ac11bdf0eb5972bae47825af851d20c342d88f466669ec58827be03650df019"
            ))),
        );
    }
}
