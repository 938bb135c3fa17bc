//! Update operator vocabulary.
//!
//! Each update field in an `Update...By...` method name may end with an operator suffix that says how the parameter
//! is combined with the stored value. Without a suffix the field is overwritten ([`UpdateOperatorId::Set`]).
//!
//! ## Examples
//! ```rust
//! use repogen_core::lang::update_operators::{self, UpdateOperatorId};
//!
//! assert_eq!(update_operators::from_suffix("Inc"), Some(UpdateOperatorId::Inc));
//! assert_eq!(update_operators::from_suffix("Set"), None); // `Set` is implicit
//! ```

/// Stable identifier for every update operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOperatorId {
    Set,
    Push,
    Inc,
}

/// What kind of field an update operator may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandRule {
    /// Any field; the parameter has the field's type.
    Any,
    /// Sequence field (`[]T`); the parameter has the element type `T`.
    Sequence,
    /// Numeric field; the parameter has the field's type.
    Numeric,
}

/// Metadata for an update operator.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOperatorInfo {
    pub id: UpdateOperatorId,
    pub canonical: &'static str,
    /// Token that selects the operator at the end of an update field clause. `None` for the implicit default.
    pub suffix: Option<&'static str>,
    pub operand: OperandRule,
    pub description: &'static str,
}

/// Registry of all update operators.
pub const UPDATE_OPERATORS: &[UpdateOperatorInfo] = &[
    UpdateOperatorInfo {
        id: UpdateOperatorId::Set,
        canonical: "Set",
        suffix: None,
        operand: OperandRule::Any,
        description: "Overwrite the field with the parameter.",
    },
    UpdateOperatorInfo {
        id: UpdateOperatorId::Push,
        canonical: "Push",
        suffix: Some("Push"),
        operand: OperandRule::Sequence,
        description: "Append the parameter to a sequence field.",
    },
    UpdateOperatorInfo {
        id: UpdateOperatorId::Inc,
        canonical: "Inc",
        suffix: Some("Inc"),
        operand: OperandRule::Numeric,
        description: "Add the parameter to a numeric field.",
    },
];

/// Canonical spelling.
pub fn as_str(id: UpdateOperatorId) -> &'static str {
    info_for(id).canonical
}

/// Operand rule.
pub fn operand_rule(id: UpdateOperatorId) -> OperandRule {
    info_for(id).operand
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: UpdateOperatorId) -> &'static UpdateOperatorInfo {
    UPDATE_OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("update operator info missing")
}

/// Lookup by trailing token. Only explicit suffixes resolve.
pub fn from_suffix(token: &str) -> Option<UpdateOperatorId> {
    UPDATE_OPERATORS
        .iter()
        .find(|o| o.suffix == Some(token))
        .map(|o| o.id)
}
