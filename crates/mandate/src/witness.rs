use {
    crate::{
        Error,
        FieldDef,
        Record,
        encoder::Encoder,
        field::{self, ResolvedField, StructRef},
        typestring::{self, MANDATE, NESTED_TYPE_PREFIX},
    },
    alloy::primitives::{B256, keccak256},
    std::collections::BTreeMap,
};

/// The shape of a mandate: its fields and the nested types they reference.
///
/// Immutable once built. Every type string and type hash is derived during
/// [`MandateType::new`], which is also the only place schema errors surface.
#[derive(Clone, Debug)]
pub struct MandateType {
    fields: Vec<FieldDef>,
    nested_types: BTreeMap<String, Vec<FieldDef>>,
    resolved: Vec<ResolvedField>,
    nested: BTreeMap<String, NestedType>,
    witness_typestring: String,
    typestring: String,
    typehash: B256,
}

#[derive(Clone, Debug)]
struct NestedType {
    resolved: Vec<ResolvedField>,
    typestring: String,
    typehash: B256,
}

impl MandateType {
    pub fn new(
        fields: Vec<FieldDef>,
        nested_types: impl IntoIterator<Item = (String, Vec<FieldDef>)>,
    ) -> Result<Self, Error> {
        let nested_types: BTreeMap<_, _> = nested_types.into_iter().collect();
        if fields.is_empty() {
            return Err(Error::NoFields);
        }
        for (name, fields) in &nested_types {
            if !name.starts_with(NESTED_TYPE_PREFIX) {
                return Err(Error::InvalidNestedTypeName(name.clone()));
            }
            if fields.is_empty() {
                return Err(Error::EmptyNestedType(name.clone()));
            }
        }

        let resolved = field::resolve(&fields, &nested_types)?;
        let nested = nested_types
            .iter()
            .map(|(name, fields)| {
                let typestring = typestring::encode_type(name, fields, &nested_types);
                let nested = NestedType {
                    resolved: field::resolve(fields, &nested_types)?,
                    typehash: keccak256(&typestring),
                    typestring,
                };
                Ok((name.clone(), nested))
            })
            .collect::<Result<BTreeMap<_, _>, Error>>()?;

        let witness_typestring = typestring::witness_typestring(&fields, &nested_types);
        let typestring = format!("{MANDATE}({witness_typestring})");
        let typehash = keccak256(&typestring);
        tracing::debug!(%typestring, ?typehash, "built mandate type");

        Ok(Self {
            fields,
            nested_types,
            resolved,
            nested,
            witness_typestring,
            typestring,
            typehash,
        })
    }

    /// A mandate without nested types.
    pub fn flat(fields: Vec<FieldDef>) -> Result<Self, Error> {
        Self::new(fields, [])
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn nested_types(&self) -> &BTreeMap<String, Vec<FieldDef>> {
        &self.nested_types
    }

    /// The open fragment that hosts splice in after `Mandate(`.
    pub fn witness_typestring(&self) -> &str {
        &self.witness_typestring
    }

    /// `Mandate(<witness typestring>)`
    pub fn typestring(&self) -> &str {
        &self.typestring
    }

    pub fn typehash(&self) -> B256 {
        self.typehash
    }

    /// Closed type string of a nested type, see [`typestring::encode_type`].
    pub fn nested_typestring(&self, name: &str) -> Option<&str> {
        self.nested.get(name).map(|nested| nested.typestring.as_str())
    }

    pub fn nested_typehash(&self, name: &str) -> Option<B256> {
        self.nested.get(name).map(|nested| nested.typehash)
    }

    /// `encodeData` of a mandate value: the 32 byte words that follow the type
    /// hash in [`MandateType::hash`].
    pub fn encode(&self, value: &Record) -> Result<Vec<u8>, Error> {
        Encoder::new(self).encode_data(&self.resolved, value)
    }

    /// `keccak(typehash || encode(value))`
    pub fn hash(&self, value: &Record) -> Result<B256, Error> {
        Encoder::new(self).hash_struct(&StructRef::Wrapper, value)
    }

    /// Struct hash of a value of one of the nested types.
    pub fn hash_nested(&self, name: &str, value: &Record) -> Result<B256, Error> {
        Encoder::new(self).hash_struct(&StructRef::Nested(name.to_string()), value)
    }

    pub(crate) fn resolved_fields(&self) -> &[ResolvedField] {
        &self.resolved
    }

    pub(crate) fn resolved_nested(&self, name: &str) -> Option<(B256, &[ResolvedField])> {
        self.nested
            .get(name)
            .map(|nested| (nested.typehash, nested.resolved.as_slice()))
    }
}
