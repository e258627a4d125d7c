use {
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, B256, U256},
    },
    std::collections::BTreeMap,
};

/// A runtime value for one field of a mandate or of a nested mandate type.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Any non-struct value, handed to the ABI encoder as is.
    Primitive(DynSolValue),
    /// A nested struct.
    Struct(Record),
    /// The value of a `T[]` field.
    Array(Vec<Value>),
}

/// Field values of a struct, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style [`Record::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<DynSolValue> for Value {
    fn from(value: DynSolValue) -> Self {
        Self::Primitive(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Struct(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::Primitive(DynSolValue::Uint(value, 256))
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Primitive(DynSolValue::Address(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Primitive(DynSolValue::Bool(value))
    }
}

impl From<B256> for Value {
    fn from(value: B256) -> Self {
        Self::Primitive(DynSolValue::FixedBytes(value, 32))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Primitive(DynSolValue::String(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Primitive(DynSolValue::String(value.to_string()))
    }
}
