//! Constant value capsules.

use std::fmt;
use std::sync::Arc;

use super::TypeSlim;

/// Payload of an [`ObjectSlim`], already reduced to portable primitives.
///
/// Floats are stored as bits so the capsule stays `Eq + Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Char(char),
    String(Arc<str>),
    /// Opaque payload produced by a host serializer.
    Bytes(Arc<[u8]>),
}

impl ObjectValue {
    pub fn float(value: f64) -> Self {
        ObjectValue::Float(value.to_bits())
    }

    pub fn string(value: impl Into<Arc<str>>) -> Self {
        ObjectValue::String(value.into())
    }

    /// The float payload, if this is a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ObjectValue::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectValue::Null => f.write_str("null"),
            ObjectValue::Bool(value) => write!(f, "{value}"),
            ObjectValue::Int(value) => write!(f, "{value}"),
            ObjectValue::UInt(value) => write!(f, "{value}u"),
            ObjectValue::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            ObjectValue::Char(value) => write!(f, "{value:?}"),
            ObjectValue::String(value) => write!(f, "{value:?}"),
            ObjectValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectData {
    ty: TypeSlim,
    value: ObjectValue,
}

slim_handle! {
    /// Opaque comparable value capsule carried by constant nodes.
    ObjectSlim => ObjectData
}

impl ObjectSlim {
    pub fn new(ty: TypeSlim, value: ObjectValue) -> Self {
        Self::from_data(ObjectData { ty, value })
    }

    /// The type the value was boxed with.
    pub fn ty(&self) -> &TypeSlim {
        &self.0.ty
    }

    pub fn value(&self) -> &ObjectValue {
        &self.0.value
    }
}

impl fmt::Display for ObjectSlim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.value, f)
    }
}
