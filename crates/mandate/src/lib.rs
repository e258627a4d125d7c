//! EIP-712 type strings and struct hashes for mandates, the caller-defined
//! witness payloads that get appended to compact messages.
//!
//! A [`MandateType`] is built once from a field list and a map of nested
//! types. Construction validates the schema and caches every derived type
//! string and type hash, so hashing a [`Record`] against it afterwards can only
//! fail on the shape of the value itself.

pub mod compact;
pub mod domain;
mod encoder;
mod error;
pub mod field;
pub mod schemas;
pub mod typestring;
pub mod value;
mod witness;

pub use {
    compact::{BatchCompact, Compact, Element, Lock, MessageKind, MultichainCompact, Witness},
    domain::{DomainSeparator, hashed_eip712_message},
    error::Error,
    field::FieldDef,
    value::{Record, Value},
    witness::MandateType,
};
