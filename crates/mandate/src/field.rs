use {
    crate::{Error, typestring::MANDATE},
    alloy::dyn_abi::DynSolType,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// A single `type name` member of a struct declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// What the base of a declared type (without the `[]` suffix) refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    /// Encoded by the ABI encoder.
    Primitive(DynSolType),
    /// Encoded as its struct hash.
    Struct(StructRef),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StructRef {
    /// The `Mandate` wrapper itself.
    Wrapper,
    Nested(String),
}

/// A field whose type string was checked against the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedField {
    pub name: String,
    pub ty: String,
    pub kind: Kind,
    pub array: bool,
}

impl ResolvedField {
    pub fn is_flat_primitive(&self) -> bool {
        !self.array && matches!(self.kind, Kind::Primitive(_))
    }
}

/// Resolves every field of a declaration against the nested types known to
/// the schema.
pub(crate) fn resolve(
    fields: &[FieldDef],
    nested_types: &BTreeMap<String, Vec<FieldDef>>,
) -> Result<Vec<ResolvedField>, Error> {
    fields
        .iter()
        .map(|field| {
            let (base, array) = match field.ty.strip_suffix("[]") {
                Some(base) => (base, true),
                None => (field.ty.as_str(), false),
            };
            let kind = if base == MANDATE {
                Kind::Struct(StructRef::Wrapper)
            } else if nested_types.contains_key(base) {
                Kind::Struct(StructRef::Nested(base.to_string()))
            } else {
                match DynSolType::parse(base) {
                    Ok(ty) if is_primitive(&ty) => Kind::Primitive(ty),
                    _ => return Err(Error::UnsupportedType(field.ty.clone())),
                }
            };
            Ok(ResolvedField {
                name: field.name.clone(),
                ty: field.ty.clone(),
                kind,
                array,
            })
        })
        .collect()
}

fn is_primitive(ty: &DynSolType) -> bool {
    matches!(
        ty,
        DynSolType::Bool
            | DynSolType::Int(_)
            | DynSolType::Uint(_)
            | DynSolType::FixedBytes(_)
            | DynSolType::Address
            | DynSolType::Bytes
            | DynSolType::String
    )
}
