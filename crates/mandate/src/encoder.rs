//! `encodeData` for mandate schemas, interpreted from the resolved field
//! descriptors of a [`MandateType`].

use {
    crate::{
        Error,
        MandateType,
        Record,
        Value,
        field::{Kind, ResolvedField, StructRef},
    },
    alloy::{
        dyn_abi::{DynSolType, DynSolValue},
        primitives::{B256, keccak256},
    },
};

pub(crate) struct Encoder<'a> {
    mandate: &'a MandateType,
}

impl<'a> Encoder<'a> {
    pub fn new(mandate: &'a MandateType) -> Self {
        Self { mandate }
    }

    /// `keccak(typehash || encodeData(value))`
    pub fn hash_struct(&self, target: &StructRef, value: &Record) -> Result<B256, Error> {
        let (typehash, fields) = self.lookup(target)?;
        let mut buf = typehash.to_vec();
        buf.extend(self.encode_data(fields, value)?);
        Ok(keccak256(buf))
    }

    pub fn encode_data(&self, fields: &[ResolvedField], value: &Record) -> Result<Vec<u8>, Error> {
        // Only primitives without arrays: plain `abi.encode(field1, field2, ...)`.
        if fields.iter().all(ResolvedField::is_flat_primitive) {
            let values = fields
                .iter()
                .map(|field| match &field.kind {
                    Kind::Primitive(ty) => primitive(field, ty, member(field, value)?).cloned(),
                    Kind::Struct(_) => Err(mismatch(field)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(DynSolValue::Tuple(values).abi_encode_params());
        }

        let mut encoded = Vec::with_capacity(32 * fields.len());
        for field in fields {
            encoded.extend(self.encode_field(field, member(field, value)?)?);
        }
        Ok(encoded)
    }

    fn encode_field(&self, field: &ResolvedField, value: &Value) -> Result<Vec<u8>, Error> {
        Ok(match (&field.kind, field.array) {
            (Kind::Primitive(ty), false) => primitive(field, ty, value)?.abi_encode(),
            (Kind::Primitive(ty), true) => {
                let elements = elements(field, value)?
                    .iter()
                    .map(|element| primitive(field, ty, element).cloned())
                    .collect::<Result<Vec<_>, _>>()?;
                keccak256(DynSolValue::Array(elements).abi_encode()).to_vec()
            }
            (Kind::Struct(target), false) => self.hash_struct(target, record(field, value)?)?.to_vec(),
            (Kind::Struct(target), true) => {
                let mut hashes = Vec::new();
                for element in elements(field, value)? {
                    hashes.extend_from_slice(self.hash_struct(target, record(field, element)?)?.as_slice());
                }
                keccak256(hashes).to_vec()
            }
        })
    }

    fn lookup(&self, target: &StructRef) -> Result<(B256, &'a [ResolvedField]), Error> {
        match target {
            StructRef::Wrapper => Ok((self.mandate.typehash(), self.mandate.resolved_fields())),
            StructRef::Nested(name) => self
                .mandate
                .resolved_nested(name)
                .ok_or_else(|| Error::UnsupportedType(name.clone())),
        }
    }
}

fn member<'v>(field: &ResolvedField, value: &'v Record) -> Result<&'v Value, Error> {
    value
        .get(&field.name)
        .ok_or_else(|| Error::MissingField(field.name.clone()))
}

fn primitive<'v>(
    field: &ResolvedField,
    ty: &DynSolType,
    value: &'v Value,
) -> Result<&'v DynSolValue, Error> {
    match value {
        Value::Primitive(value) if ty.matches(value) => Ok(value),
        _ => Err(mismatch(field)),
    }
}

fn elements<'v>(field: &ResolvedField, value: &'v Value) -> Result<&'v [Value], Error> {
    match value {
        Value::Array(elements) => Ok(elements),
        _ => Err(mismatch(field)),
    }
}

fn record<'v>(field: &ResolvedField, value: &'v Value) -> Result<&'v Record, Error> {
    match value {
        Value::Struct(record) => Ok(record),
        _ => Err(mismatch(field)),
    }
}

fn mismatch(field: &ResolvedField) -> Error {
    Error::TypeMismatch {
        field: field.name.clone(),
        expected: field.ty.clone(),
    }
}
