//! Type surrogates.

use std::fmt;
use std::sync::Arc;

/// Shape of a type surrogate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeSlimKind {
    /// A named, non-generic type (`System.Int32`, `Person`).
    Simple { name: Arc<str> },
    /// An array of `element`. `rank: None` is a single-dimensional vector.
    Array { element: TypeSlim, rank: Option<u32> },
    /// A closed or open generic type (`List<Int32>`).
    Generic {
        definition: TypeSlim,
        arguments: Arc<[TypeSlim]>,
    },
    /// A generic parameter (`T`).
    GenericParameter { name: Arc<str> },
}

slim_handle! {
    /// Opaque, equality-comparable stand-in for a runtime type.
    TypeSlim => TypeSlimKind
}

impl TypeSlim {
    pub fn simple(name: impl Into<Arc<str>>) -> Self {
        Self::from_data(TypeSlimKind::Simple { name: name.into() })
    }

    /// Single-dimensional array (vector) of `element`.
    pub fn array(element: TypeSlim) -> Self {
        Self::from_data(TypeSlimKind::Array {
            element,
            rank: None,
        })
    }

    /// Multi-dimensional array of `element`.
    pub fn array_with_rank(element: TypeSlim, rank: u32) -> Self {
        Self::from_data(TypeSlimKind::Array {
            element,
            rank: Some(rank),
        })
    }

    pub fn generic(definition: TypeSlim, arguments: impl IntoIterator<Item = TypeSlim>) -> Self {
        Self::from_data(TypeSlimKind::Generic {
            definition,
            arguments: arguments.into_iter().collect(),
        })
    }

    pub fn generic_parameter(name: impl Into<Arc<str>>) -> Self {
        Self::from_data(TypeSlimKind::GenericParameter { name: name.into() })
    }

    pub fn kind(&self) -> &TypeSlimKind {
        &self.0
    }

    /// Element type for array surrogates.
    pub fn element_type(&self) -> Option<&TypeSlim> {
        match &*self.0 {
            TypeSlimKind::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSlim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            TypeSlimKind::Simple { name } | TypeSlimKind::GenericParameter { name } => {
                f.write_str(name)
            }
            TypeSlimKind::Array { element, rank } => match rank {
                None | Some(1) => write!(f, "{element}[]"),
                Some(rank) => {
                    let commas = ",".repeat(rank.saturating_sub(1) as usize);
                    write!(f, "{element}[{commas}]")
                }
            },
            TypeSlimKind::Generic {
                definition,
                arguments,
            } => {
                write!(f, "{definition}<")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
        }
    }
}
