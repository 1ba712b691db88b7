//! Surrogate handles for types, members and constant values.
//!
//! Nodes carry these instead of live runtime handles. The core never
//! resolves them; it only clones and compares them. Each handle is a thin
//! `Arc` so cloning is a reference-count bump and nodes stay small.
//!
//! Equality is by value. Two handles pointing at the same allocation are
//! equal without looking further; otherwise the payloads are compared.
//! The pointer check is a shortcut only; two separately built handles with
//! the same payload are always equal.

/// Define an `Arc`-backed handle with value equality and a pointer fast path.
macro_rules! slim_handle {
    ($(#[$meta:meta])* $name:ident => $data:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(::std::sync::Arc<$data>);

        impl $name {
            fn from_data(data: $data) -> Self {
                $name(::std::sync::Arc::new(data))
            }

            /// Whether both handles share one allocation.
            #[inline]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ptr_eq(other) || *self.0 == *other.0
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&*self.0, f)
            }
        }
    };
}

mod members;
mod object;
mod types;

pub use members::{
    ConstructorInfoSlim, FieldInfoSlim, MemberInfoSlim, MemberKind, MethodInfoSlim,
    PropertyInfoSlim,
};
pub use object::{ObjectSlim, ObjectValue};
pub use types::{TypeSlim, TypeSlimKind};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{MethodInfoSlim, ObjectSlim, TypeSlim};
    // Handles are stored in every typed node; keep them one pointer wide
    // so `Option<Handle>` uses the null niche.
    crate::static_assert_size!(TypeSlim, 8);
    crate::static_assert_size!(Option<TypeSlim>, 8);
    crate::static_assert_size!(MethodInfoSlim, 8);
    crate::static_assert_size!(ObjectSlim, 8);
}

#[cfg(test)]
mod tests;
