//! Extension Store
//!
//! Every node carries a map of name/value pairs outside its named attributes:
//! vendor extensions (`x-...`) and keywords the model does not name, such as the
//! `$schema` dialect identifier. Key format is a calling convention only, the
//! store accepts any key.

use std::cell::{Ref, RefMut};
use std::collections::BTreeMap;

use crate::decimal::Decimal;
use crate::meta::{Discriminator, ExternalDocumentation, Xml};
use crate::node::{Fluent, ModelNode};
use crate::schema::Schema;

/// A value of unconstrained shape: schema defaults, examples, enum members and
/// extension values.
///
/// Node values compare by identity, floats by bit pattern (so `NaN` equals
/// itself and `-0.0` differs from `0.0`), everything else structurally.
#[derive(Debug, Clone)]
pub enum AnyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    Node(ModelNode),
    Sequence(Vec<AnyValue>),
    Mapping(BTreeMap<String, AnyValue>),
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AnyValue::Null, AnyValue::Null) => true,
            (AnyValue::Bool(a), AnyValue::Bool(b)) => a == b,
            (AnyValue::Integer(a), AnyValue::Integer(b)) => a == b,
            (AnyValue::Float(a), AnyValue::Float(b)) => a.to_bits() == b.to_bits(),
            (AnyValue::Decimal(a), AnyValue::Decimal(b)) => a == b,
            (AnyValue::String(a), AnyValue::String(b)) => a == b,
            (AnyValue::Node(a), AnyValue::Node(b)) => a == b,
            (AnyValue::Sequence(a), AnyValue::Sequence(b)) => a == b,
            (AnyValue::Mapping(a), AnyValue::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl AnyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&ModelNode> {
        match self {
            AnyValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }
}

macro_rules! any_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AnyValue {
                fn from(value: $ty) -> Self {
                    AnyValue::$variant(value.into())
                }
            }
        )*
    };
}

any_value_from! {
    bool => Bool,
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    f64 => Float,
    Decimal => Decimal,
    String => String,
    &str => String,
    char => String,
    ModelNode => Node,
    Schema => Node,
    Discriminator => Node,
    Xml => Node,
    ExternalDocumentation => Node,
}

/// Widened through its shortest decimal form, so `0.1f32` is stored as `0.1`.
impl From<f32> for AnyValue {
    fn from(value: f32) -> Self {
        AnyValue::Float(value.to_string().parse().unwrap_or_else(|_| f64::from(value)))
    }
}

impl From<u64> for AnyValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => AnyValue::Integer(i),
            Err(_) => AnyValue::Decimal(Decimal::from(value)),
        }
    }
}

impl<T: Into<AnyValue>> From<Vec<T>> for AnyValue {
    fn from(values: Vec<T>) -> Self {
        AnyValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AnyValue>> From<BTreeMap<String, T>> for AnyValue {
    fn from(entries: BTreeMap<String, T>) -> Self {
        AnyValue::Mapping(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<AnyValue>> From<Option<T>> for AnyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AnyValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for AnyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AnyValue::Null,
            serde_json::Value::Bool(b) => AnyValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AnyValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    AnyValue::from(u)
                } else {
                    AnyValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => AnyValue::String(s),
            serde_json::Value::Array(items) => {
                AnyValue::Sequence(items.into_iter().map(AnyValue::from).collect())
            }
            serde_json::Value::Object(entries) => AnyValue::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, AnyValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Key/value side storage of a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    entries: BTreeMap<String, AnyValue>,
}

impl Extensions {
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.entries.get(key)
    }

    /// Store a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: AnyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AnyValue> {
        self.entries.remove(key)
    }

    pub fn replace(&mut self, entries: BTreeMap<String, AnyValue>) {
        self.entries = entries;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnyValue)> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> BTreeMap<String, AnyValue> {
        self.entries.clone()
    }
}

/// Capability of holding extensions, implemented by every node
pub trait Extensible: Fluent {
    #[doc(hidden)]
    fn extension_store(&self) -> Ref<'_, Extensions>;

    #[doc(hidden)]
    fn extension_store_mut(&self) -> RefMut<'_, Extensions>;

    /// The value stored under `key`, `None` if absent
    fn extension(&self, key: &str) -> Option<AnyValue> {
        self.extension_store().get(key).cloned()
    }

    fn set_extension(&self, key: impl Into<String>, value: impl Into<AnyValue>) {
        self.extension_store_mut().insert(key, value.into());
    }

    fn with_extension(&self, key: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        self.chain(|node| node.set_extension(key, value))
    }

    /// Remove the entry if present
    fn remove_extension(&self, key: &str) {
        self.extension_store_mut().remove(key);
    }

    /// Snapshot of every entry; mutating it does not touch the node
    fn extensions(&self) -> BTreeMap<String, AnyValue> {
        self.extension_store().snapshot()
    }

    /// Replace all entries, `None` clears the store
    fn set_extensions(&self, entries: Option<BTreeMap<String, AnyValue>>) {
        self.extension_store_mut().replace(entries.unwrap_or_default());
    }

    fn with_extensions(&self, entries: BTreeMap<String, AnyValue>) -> Self {
        self.chain(|node| node.set_extensions(Some(entries)))
    }
}
