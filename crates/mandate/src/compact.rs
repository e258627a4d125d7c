//! The compact message types of The Compact, with an optional mandate spliced
//! in as witness.
//!
//! A witness adds a trailing `Mandate mandate` member to the message (or to
//! each `Element` of a multichain compact) and appends the mandate's type
//! string at the end of the host type string. Its struct hash becomes the
//! last word of the encoded message.

use {
    crate::{Error, MandateType, Record},
    alloy::{
        primitives::{Address, B256, FixedBytes, U256, keccak256},
        sol,
        sol_types::{SolStruct, SolValue},
    },
};

sol! {
    #![sol(all_derives)]

    /// A resource lock commitment: the most of `token` that may be claimed
    /// from the lock identified by `lockTag`.
    struct Lock {
        bytes12 lockTag;
        address token;
        uint256 amount;
    }
}

const LOCK_TYPESTRING: &str = "Lock(bytes12 lockTag,address token,uint256 amount)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Compact,
    BatchCompact,
    MultichainCompact,
}

impl MessageKind {
    /// The host type string, closed with the mandate's own type string when a
    /// witness is attached.
    pub fn typestring(self, mandate: Option<&MandateType>) -> String {
        let member = mandate_member(mandate);
        let mut typestring = match self {
            Self::Compact => format!(
                "Compact(address arbiter,address sponsor,uint256 nonce,uint256 expires,bytes12 \
                 lockTag,address token,uint256 amount{member})"
            ),
            Self::BatchCompact => format!(
                "BatchCompact(address arbiter,address sponsor,uint256 nonce,uint256 expires,Lock[] \
                 commitments{member}){LOCK_TYPESTRING}"
            ),
            Self::MultichainCompact => format!(
                "MultichainCompact(address sponsor,uint256 nonce,uint256 expires,Element[] \
                 elements)Element(address arbiter,uint256 chainId,Lock[] \
                 commitments{member}){LOCK_TYPESTRING}"
            ),
        };
        if let Some(mandate) = mandate {
            typestring.push_str(mandate.typestring());
        }
        typestring
    }

    pub fn typehash(self, mandate: Option<&MandateType>) -> B256 {
        keccak256(self.typestring(mandate))
    }
}

fn mandate_member(mandate: Option<&MandateType>) -> &'static str {
    match mandate {
        Some(_) => ",Mandate mandate",
        None => "",
    }
}

/// Type string of a single multichain `Element`.
pub fn element_typestring(mandate: Option<&MandateType>) -> String {
    let mut typestring = format!(
        "Element(address arbiter,uint256 chainId,Lock[] commitments{}){LOCK_TYPESTRING}",
        mandate_member(mandate)
    );
    if let Some(mandate) = mandate {
        typestring.push_str(mandate.typestring());
    }
    typestring
}

/// A mandate attached to a message: its type and the struct hash of its value.
#[derive(Clone, Copy, Debug)]
pub struct Witness<'a> {
    mandate: &'a MandateType,
    hash: B256,
}

impl<'a> Witness<'a> {
    pub fn new(mandate: &'a MandateType, value: &Record) -> Result<Self, Error> {
        Ok(Self {
            mandate,
            hash: mandate.hash(value)?,
        })
    }

    /// For a mandate value that was hashed elsewhere.
    pub fn from_hash(mandate: &'a MandateType, hash: B256) -> Self {
        Self { mandate, hash }
    }

    pub fn mandate(&self) -> &'a MandateType {
        self.mandate
    }

    pub fn hash(&self) -> B256 {
        self.hash
    }
}

/// A single resource lock claim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compact {
    pub arbiter: Address,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub lock_tag: FixedBytes<12>,
    pub token: Address,
    pub amount: U256,
}

impl Compact {
    pub fn hash(&self, witness: Option<&Witness>) -> B256 {
        let typehash = MessageKind::Compact.typehash(witness.map(Witness::mandate));
        let mut encoded = (
            typehash,
            self.arbiter,
            self.sponsor,
            self.nonce,
            self.expires,
            self.lock_tag,
            self.token,
            self.amount,
        )
            .abi_encode();
        append_witness(&mut encoded, witness);
        keccak256(encoded)
    }
}

/// Claims against several resource locks on one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchCompact {
    pub arbiter: Address,
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub commitments: Vec<Lock>,
}

impl BatchCompact {
    pub fn hash(&self, witness: Option<&Witness>) -> B256 {
        let typehash = MessageKind::BatchCompact.typehash(witness.map(Witness::mandate));
        let mut encoded = (
            typehash,
            self.arbiter,
            self.sponsor,
            self.nonce,
            self.expires,
            hash_locks(&self.commitments),
        )
            .abi_encode();
        append_witness(&mut encoded, witness);
        keccak256(encoded)
    }
}

/// The per-chain part of a [`MultichainCompact`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub arbiter: Address,
    pub chain_id: U256,
    pub commitments: Vec<Lock>,
    /// Struct hash of this element's mandate, required iff the compact is
    /// hashed with a mandate type.
    pub mandate_hash: Option<B256>,
}

/// Claims against resource locks spread over several chains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultichainCompact {
    pub sponsor: Address,
    pub nonce: U256,
    pub expires: U256,
    pub elements: Vec<Element>,
}

impl MultichainCompact {
    pub fn hash(&self, mandate: Option<&MandateType>) -> Result<B256, Error> {
        let element_typehash = keccak256(element_typestring(mandate));
        let mut element_hashes = Vec::with_capacity(32 * self.elements.len());
        for element in &self.elements {
            let mut encoded = (
                element_typehash,
                element.arbiter,
                element.chain_id,
                hash_locks(&element.commitments),
            )
                .abi_encode();
            match (mandate, element.mandate_hash) {
                (Some(_), Some(hash)) => encoded.extend_from_slice(hash.as_slice()),
                (None, None) => {}
                (Some(_), None) => {
                    return Err(Error::WitnessMismatch("element is missing its mandate hash"));
                }
                (None, Some(_)) => {
                    return Err(Error::WitnessMismatch(
                        "element carries a mandate hash but no mandate type was given",
                    ));
                }
            }
            element_hashes.extend_from_slice(keccak256(encoded).as_slice());
        }

        let encoded = (
            MessageKind::MultichainCompact.typehash(mandate),
            self.sponsor,
            self.nonce,
            self.expires,
            keccak256(element_hashes),
        )
            .abi_encode();
        Ok(keccak256(encoded))
    }
}

fn hash_locks(locks: &[Lock]) -> B256 {
    let mut hashes = Vec::with_capacity(32 * locks.len());
    for lock in locks {
        hashes.extend_from_slice(lock.eip712_hash_struct().as_slice());
    }
    keccak256(hashes)
}

fn append_witness(encoded: &mut Vec<u8>, witness: Option<&Witness>) {
    if let Some(witness) = witness {
        encoded.extend_from_slice(witness.hash.as_slice());
    }
}
