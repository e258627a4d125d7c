use crate::typestring::NESTED_TYPE_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a mandate needs at least one field")]
    NoFields,
    #[error("nested type {0:?} does not start with {NESTED_TYPE_PREFIX:?}")]
    InvalidNestedTypeName(String),
    #[error("nested type {0:?} declares no fields")]
    EmptyNestedType(String),
    #[error("unsupported field type {0:?}")]
    UnsupportedType(String),
    #[error("missing field {0:?}")]
    MissingField(String),
    #[error("field {field:?} does not hold a value of type {expected}")]
    TypeMismatch { field: String, expected: String },
    #[error("witness does not match the message: {0}")]
    WitnessMismatch(&'static str),
}
