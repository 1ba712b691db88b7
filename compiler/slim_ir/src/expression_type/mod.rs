//! Node discriminants.
//!
//! Two tags describe every node:
//! - [`ExpressionType`] is the operator-level discriminant (`Add`,
//!   `Convert`, `Call`, ...), the value a serializer writes.
//! - [`NodeKind`] is the structural variant (`Binary`, `Unary`, ...), the
//!   value a visitor dispatches on. Several expression types share a kind.

use std::fmt;

/// Operator-level node discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpressionType {
    // Arithmetic
    Add,
    AddChecked,
    Subtract,
    SubtractChecked,
    Multiply,
    MultiplyChecked,
    Divide,
    Modulo,
    Power,

    // Bitwise and logical
    And,
    Or,
    ExclusiveOr,
    LeftShift,
    RightShift,
    AndAlso,
    OrElse,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Other binary
    Coalesce,
    ArrayIndex,
    Assign,

    // Compound assignment
    AddAssign,
    AddAssignChecked,
    SubtractAssign,
    SubtractAssignChecked,
    MultiplyAssign,
    MultiplyAssignChecked,
    DivideAssign,
    ModuloAssign,
    PowerAssign,
    AndAssign,
    OrAssign,
    ExclusiveOrAssign,
    LeftShiftAssign,
    RightShiftAssign,

    // Unary
    Negate,
    NegateChecked,
    UnaryPlus,
    Not,
    OnesComplement,
    IsTrue,
    IsFalse,
    Increment,
    Decrement,
    PreIncrementAssign,
    PreDecrementAssign,
    PostIncrementAssign,
    PostDecrementAssign,
    Convert,
    ConvertChecked,
    TypeAs,
    Unbox,
    ArrayLength,
    Quote,
    Throw,

    // Leaves
    Constant,
    Default,
    Parameter,

    // Structural
    Conditional,
    Lambda,
    Invoke,
    Call,
    New,
    NewArrayInit,
    NewArrayBounds,
    Index,
    MemberAccess,
    ListInit,
    MemberInit,
    TypeIs,
    TypeEqual,

    // Statements
    Block,
    Goto,
    Label,
    Loop,
    Switch,
    Try,
}

impl ExpressionType {
    /// Whether a binary node may carry this discriminant.
    pub const fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::AddChecked
                | Self::Subtract
                | Self::SubtractChecked
                | Self::Multiply
                | Self::MultiplyChecked
                | Self::Divide
                | Self::Modulo
                | Self::Power
                | Self::And
                | Self::Or
                | Self::ExclusiveOr
                | Self::LeftShift
                | Self::RightShift
                | Self::AndAlso
                | Self::OrElse
                | Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
                | Self::Coalesce
                | Self::ArrayIndex
                | Self::Assign
        ) || self.is_compound_assignment()
    }

    /// Compound assignments (`x += y` and friends).
    pub const fn is_compound_assignment(self) -> bool {
        matches!(
            self,
            Self::AddAssign
                | Self::AddAssignChecked
                | Self::SubtractAssign
                | Self::SubtractAssignChecked
                | Self::MultiplyAssign
                | Self::MultiplyAssignChecked
                | Self::DivideAssign
                | Self::ModuloAssign
                | Self::PowerAssign
                | Self::AndAssign
                | Self::OrAssign
                | Self::ExclusiveOrAssign
                | Self::LeftShiftAssign
                | Self::RightShiftAssign
        )
    }

    /// Whether a unary node may carry this discriminant.
    pub const fn is_unary(self) -> bool {
        matches!(
            self,
            Self::Negate
                | Self::NegateChecked
                | Self::UnaryPlus
                | Self::Not
                | Self::OnesComplement
                | Self::IsTrue
                | Self::IsFalse
                | Self::Increment
                | Self::Decrement
                | Self::PreIncrementAssign
                | Self::PreDecrementAssign
                | Self::PostIncrementAssign
                | Self::PostDecrementAssign
                | Self::Convert
                | Self::ConvertChecked
                | Self::TypeAs
                | Self::Unbox
                | Self::ArrayLength
                | Self::Quote
                | Self::Throw
        )
    }

    /// Whether a type-binary node may carry this discriminant.
    pub const fn is_type_binary(self) -> bool {
        matches!(self, Self::TypeIs | Self::TypeEqual)
    }

    /// Whether a new-array node may carry this discriminant.
    pub const fn is_new_array(self) -> bool {
        matches!(self, Self::NewArrayInit | Self::NewArrayBounds)
    }

    /// Infix symbol for binary operators, used by printers.
    ///
    /// Returns `None` for discriminants without an infix spelling.
    pub const fn infix_symbol(self) -> Option<&'static str> {
        let symbol = match self {
            Self::Add | Self::AddChecked => "+",
            Self::Subtract | Self::SubtractChecked => "-",
            Self::Multiply | Self::MultiplyChecked => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "**",
            Self::And => "&",
            Self::Or => "|",
            Self::ExclusiveOr => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Coalesce => "??",
            Self::Assign => "=",
            Self::AddAssign | Self::AddAssignChecked => "+=",
            Self::SubtractAssign | Self::SubtractAssignChecked => "-=",
            Self::MultiplyAssign | Self::MultiplyAssignChecked => "*=",
            Self::DivideAssign => "/=",
            Self::ModuloAssign => "%=",
            Self::PowerAssign => "**=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::ExclusiveOrAssign => "^=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Structural node variant. One per [`crate::ExpressionSlim`] case.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Binary,
    Unary,
    Conditional,
    Constant,
    Default,
    Parameter,
    Lambda,
    Invocation,
    MethodCall,
    New,
    NewArray,
    Index,
    Member,
    ListInit,
    MemberInit,
    TypeBinary,
    Block,
    Goto,
    Label,
    Loop,
    Switch,
    Try,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 22] = [
        NodeKind::Binary,
        NodeKind::Unary,
        NodeKind::Conditional,
        NodeKind::Constant,
        NodeKind::Default,
        NodeKind::Parameter,
        NodeKind::Lambda,
        NodeKind::Invocation,
        NodeKind::MethodCall,
        NodeKind::New,
        NodeKind::NewArray,
        NodeKind::Index,
        NodeKind::Member,
        NodeKind::ListInit,
        NodeKind::MemberInit,
        NodeKind::TypeBinary,
        NodeKind::Block,
        NodeKind::Goto,
        NodeKind::Label,
        NodeKind::Loop,
        NodeKind::Switch,
        NodeKind::Try,
    ];

    /// Statement-style control flow. Expression-only transformers reject these.
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block | Self::Goto | Self::Label | Self::Loop | Self::Switch | Self::Try
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Unary => "Unary",
            Self::Conditional => "Conditional",
            Self::Constant => "Constant",
            Self::Default => "Default",
            Self::Parameter => "Parameter",
            Self::Lambda => "Lambda",
            Self::Invocation => "Invocation",
            Self::MethodCall => "MethodCall",
            Self::New => "New",
            Self::NewArray => "NewArray",
            Self::Index => "Index",
            Self::Member => "Member",
            Self::ListInit => "ListInit",
            Self::MemberInit => "MemberInit",
            Self::TypeBinary => "TypeBinary",
            Self::Block => "Block",
            Self::Goto => "Goto",
            Self::Label => "Label",
            Self::Loop => "Loop",
            Self::Switch => "Switch",
            Self::Try => "Try",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
