//! Member surrogates: fields, properties, methods and constructors.

use std::fmt;
use std::sync::Arc;

use super::TypeSlim;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldData {
    declaring_type: TypeSlim,
    name: Arc<str>,
    field_type: TypeSlim,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyData {
    declaring_type: TypeSlim,
    name: Arc<str>,
    property_type: TypeSlim,
    index_parameter_types: Arc<[TypeSlim]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodData {
    declaring_type: TypeSlim,
    name: Arc<str>,
    parameter_types: Arc<[TypeSlim]>,
    /// `None` for methods returning nothing.
    return_type: Option<TypeSlim>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorData {
    declaring_type: TypeSlim,
    parameter_types: Arc<[TypeSlim]>,
}

slim_handle! {
    /// Field surrogate.
    FieldInfoSlim => FieldData
}

slim_handle! {
    /// Property surrogate. Indexers are properties with index parameters.
    PropertyInfoSlim => PropertyData
}

slim_handle! {
    /// Method surrogate, used by calls and by user-defined operators.
    MethodInfoSlim => MethodData
}

slim_handle! {
    /// Constructor surrogate.
    ConstructorInfoSlim => ConstructorData
}

impl FieldInfoSlim {
    pub fn new(declaring_type: TypeSlim, name: impl Into<Arc<str>>, field_type: TypeSlim) -> Self {
        Self::from_data(FieldData {
            declaring_type,
            name: name.into(),
            field_type,
        })
    }

    pub fn declaring_type(&self) -> &TypeSlim {
        &self.0.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn field_type(&self) -> &TypeSlim {
        &self.0.field_type
    }
}

impl PropertyInfoSlim {
    pub fn new(
        declaring_type: TypeSlim,
        name: impl Into<Arc<str>>,
        property_type: TypeSlim,
        index_parameter_types: impl IntoIterator<Item = TypeSlim>,
    ) -> Self {
        Self::from_data(PropertyData {
            declaring_type,
            name: name.into(),
            property_type,
            index_parameter_types: index_parameter_types.into_iter().collect(),
        })
    }

    pub fn declaring_type(&self) -> &TypeSlim {
        &self.0.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn property_type(&self) -> &TypeSlim {
        &self.0.property_type
    }

    pub fn index_parameter_types(&self) -> &[TypeSlim] {
        &self.0.index_parameter_types
    }
}

impl MethodInfoSlim {
    pub fn new(
        declaring_type: TypeSlim,
        name: impl Into<Arc<str>>,
        parameter_types: impl IntoIterator<Item = TypeSlim>,
        return_type: Option<TypeSlim>,
    ) -> Self {
        Self::from_data(MethodData {
            declaring_type,
            name: name.into(),
            parameter_types: parameter_types.into_iter().collect(),
            return_type,
        })
    }

    pub fn declaring_type(&self) -> &TypeSlim {
        &self.0.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parameter_types(&self) -> &[TypeSlim] {
        &self.0.parameter_types
    }

    pub fn return_type(&self) -> Option<&TypeSlim> {
        self.0.return_type.as_ref()
    }
}

impl ConstructorInfoSlim {
    pub fn new(declaring_type: TypeSlim, parameter_types: impl IntoIterator<Item = TypeSlim>) -> Self {
        Self::from_data(ConstructorData {
            declaring_type,
            parameter_types: parameter_types.into_iter().collect(),
        })
    }

    pub fn declaring_type(&self) -> &TypeSlim {
        &self.0.declaring_type
    }

    pub fn parameter_types(&self) -> &[TypeSlim] {
        &self.0.parameter_types
    }
}

/// Kind of member a [`MemberInfoSlim`] refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
}

/// Any member surrogate. Member access and member bindings carry this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberInfoSlim {
    Field(FieldInfoSlim),
    Property(PropertyInfoSlim),
    Method(MethodInfoSlim),
    Constructor(ConstructorInfoSlim),
}

impl MemberInfoSlim {
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Field(_) => MemberKind::Field,
            Self::Property(_) => MemberKind::Property,
            Self::Method(_) => MemberKind::Method,
            Self::Constructor(_) => MemberKind::Constructor,
        }
    }

    pub fn declaring_type(&self) -> &TypeSlim {
        match self {
            Self::Field(field) => field.declaring_type(),
            Self::Property(property) => property.declaring_type(),
            Self::Method(method) => method.declaring_type(),
            Self::Constructor(constructor) => constructor.declaring_type(),
        }
    }

    /// Member name. Constructors are named `.ctor`.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => field.name(),
            Self::Property(property) => property.name(),
            Self::Method(method) => method.name(),
            Self::Constructor(_) => ".ctor",
        }
    }

    /// Type of the value read through this member, when it has one.
    pub fn member_type(&self) -> Option<&TypeSlim> {
        match self {
            Self::Field(field) => Some(field.field_type()),
            Self::Property(property) => Some(property.property_type()),
            Self::Method(method) => method.return_type(),
            Self::Constructor(constructor) => Some(constructor.declaring_type()),
        }
    }
}

impl From<FieldInfoSlim> for MemberInfoSlim {
    fn from(field: FieldInfoSlim) -> Self {
        Self::Field(field)
    }
}

impl From<PropertyInfoSlim> for MemberInfoSlim {
    fn from(property: PropertyInfoSlim) -> Self {
        Self::Property(property)
    }
}

impl From<MethodInfoSlim> for MemberInfoSlim {
    fn from(method: MethodInfoSlim) -> Self {
        Self::Method(method)
    }
}

impl fmt::Display for MemberInfoSlim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type(), self.name())
    }
}
