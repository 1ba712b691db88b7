//! Errors raised by node construction, argument access and visitors.
//!
//! All errors surface synchronously to the immediate caller. Nothing in this
//! crate retries, swallows or logs an error as a recovery step.

use crate::{ExpressionType, NodeKind};

/// Error type for the slim IR.
///
/// Variants fall into four groups:
/// - construction-time validation (`InvalidNodeType`, `MissingField`,
///   `EmptyCollection`, `ConflictingFields`), raised before any node is
///   allocated;
/// - `ArgumentOutOfRange`, raised by positional argument access;
/// - `Unreachable`, an internal consistency trap;
/// - visitor contract violations (`Unsupported`, `SlotKindMismatch`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlimError {
    /// The operator discriminant does not belong to the node kind being built.
    #[error("node type `{node_type}` cannot build a {expected} node")]
    InvalidNodeType {
        node_type: ExpressionType,
        expected: NodeKind,
    },

    /// A field that is required for this node shape was not supplied.
    #[error("{node} requires `{field}`")]
    MissingField {
        node: &'static str,
        field: &'static str,
    },

    /// A collection that must be non-empty was empty.
    #[error("{node} requires at least one {what}")]
    EmptyCollection {
        node: &'static str,
        what: &'static str,
    },

    /// Two optional fields were supplied that cannot be combined.
    #[error("{node} cannot combine {fields}")]
    ConflictingFields {
        node: &'static str,
        fields: &'static str,
    },

    /// Positional argument access outside `[0, count)`.
    #[error("argument index {index} is out of range for {count} argument(s)")]
    ArgumentOutOfRange { index: usize, count: usize },

    /// An internal invariant was violated. Never expected in correct usage.
    #[error("internal consistency violation: {context}")]
    Unreachable { context: &'static str },

    /// An expression-only transformer met a control-flow node.
    #[error("{kind} nodes are not supported by an expression-only transformer")]
    Unsupported { kind: NodeKind },

    /// A same-type rewrite put a node of the wrong kind into a typed slot
    /// (e.g. replaced a lambda parameter declaration with a constant).
    #[error("rewriting {slot} produced a {found} node where a {expected} node is required")]
    SlotKindMismatch {
        slot: &'static str,
        expected: NodeKind,
        found: NodeKind,
    },
}
