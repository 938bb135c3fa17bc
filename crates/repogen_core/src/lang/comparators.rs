//! Comparator vocabulary.
//!
//! A comparator is the suffix of a query predicate that says how a field is compared with its parameters:
//! `AgeLessThanEqual` is the field `Age` with comparator [`ComparatorId::LessThanEqual`]. A predicate without a
//! recognised suffix compares for equality.
//!
//! ## Notes
//! - Suffixes are stored as **token sequences** (`["Less", "Than", "Equal"]`), matching the tokenizer output.
//! - Matching is longest-suffix-first in the fixed order of [`MATCH_ORDER`]. A field whose name itself ends with a
//!   comparator word (e.g. a field named `LoggedIn`) is therefore read as that comparator; there is no escaping.
//! - A suffix only matches if at least one token remains for the field name.
//!
//! ## Examples
//! ```rust
//! use repogen_core::lang::comparators::{self, ComparatorId};
//!
//! let tokens = ["Age", "Less", "Than", "Equal"];
//! assert_eq!(comparators::match_suffix(&tokens), (ComparatorId::LessThanEqual, 3));
//! assert_eq!(comparators::match_suffix(&["Age"]), (ComparatorId::Equal, 0));
//! ```

/// Stable identifier for every comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparatorId {
    Equal,
    Not,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Between,
    In,
    NotIn,
    True,
    False,
    Exists,
    NotExists,
}

/// How the parameter types a comparator consumes relate to the compared field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentRule {
    /// Each parameter has exactly the field's type.
    Identity,
    /// The parameter is a sequence of the field's type (`[]T`).
    Sequence,
}

/// What kind of field a comparator may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRule {
    Any,
    Boolean,
}

/// Metadata for a comparator.
///
/// ## Notes
/// - `arity` is the number of method parameters the predicate consumes.
/// - `suffix` is empty only for [`ComparatorId::Equal`], the default.
#[derive(Debug, Clone, Copy)]
pub struct ComparatorInfo {
    pub id: ComparatorId,
    pub canonical: &'static str,
    pub suffix: &'static [&'static str],
    pub arity: usize,
    pub argument: ArgumentRule,
    pub field: FieldRule,
}

/// Registry of all comparators.
pub const COMPARATORS: &[ComparatorInfo] = &[
    cmp(ComparatorId::Equal, "Equal", &[], 1, ArgumentRule::Identity, FieldRule::Any),
    cmp(ComparatorId::Not, "Not", &["Not"], 1, ArgumentRule::Identity, FieldRule::Any),
    cmp(ComparatorId::LessThan, "LessThan", &["Less", "Than"], 1, ArgumentRule::Identity, FieldRule::Any),
    cmp(
        ComparatorId::LessThanEqual,
        "LessThanEqual",
        &["Less", "Than", "Equal"],
        1,
        ArgumentRule::Identity,
        FieldRule::Any,
    ),
    cmp(ComparatorId::GreaterThan, "GreaterThan", &["Greater", "Than"], 1, ArgumentRule::Identity, FieldRule::Any),
    cmp(
        ComparatorId::GreaterThanEqual,
        "GreaterThanEqual",
        &["Greater", "Than", "Equal"],
        1,
        ArgumentRule::Identity,
        FieldRule::Any,
    ),
    cmp(ComparatorId::Between, "Between", &["Between"], 2, ArgumentRule::Identity, FieldRule::Any),
    cmp(ComparatorId::In, "In", &["In"], 1, ArgumentRule::Sequence, FieldRule::Any),
    cmp(ComparatorId::NotIn, "NotIn", &["Not", "In"], 1, ArgumentRule::Sequence, FieldRule::Any),
    cmp(ComparatorId::True, "True", &["True"], 0, ArgumentRule::Identity, FieldRule::Boolean),
    cmp(ComparatorId::False, "False", &["False"], 0, ArgumentRule::Identity, FieldRule::Boolean),
    cmp(ComparatorId::Exists, "Exists", &["Exists"], 0, ArgumentRule::Identity, FieldRule::Any),
    cmp(ComparatorId::NotExists, "NotExists", &["Not", "Exists"], 0, ArgumentRule::Identity, FieldRule::Any),
];

/// Suffix matching priority. `Equal` is not listed: it is the fallback.
///
/// ## Notes
/// - `NotIn`/`NotExists` precede `In`/`Exists`/`Not`, and three-token suffixes precede the two-token `LessThan` /
///   `GreaterThan`, so a longer suffix always wins over one of its own tails.
pub const MATCH_ORDER: &[ComparatorId] = &[
    ComparatorId::NotIn,
    ComparatorId::NotExists,
    ComparatorId::LessThanEqual,
    ComparatorId::GreaterThanEqual,
    ComparatorId::LessThan,
    ComparatorId::GreaterThan,
    ComparatorId::Exists,
    ComparatorId::In,
    ComparatorId::Between,
    ComparatorId::True,
    ComparatorId::False,
    ComparatorId::Not,
];

/// Canonical spelling (e.g. `"LessThanEqual"`).
pub fn as_str(id: ComparatorId) -> &'static str {
    info_for(id).canonical
}

/// Number of parameters a predicate with this comparator consumes.
pub fn arity(id: ComparatorId) -> usize {
    info_for(id).arity
}

/// Argument-type rule.
pub fn argument_rule(id: ComparatorId) -> ArgumentRule {
    info_for(id).argument
}

/// Field-type rule.
pub fn field_rule(id: ComparatorId) -> FieldRule {
    info_for(id).field
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ComparatorId) -> &'static ComparatorInfo {
    COMPARATORS.iter().find(|c| c.id == id).expect("comparator info missing")
}

/// Lookup by canonical spelling (`"NotIn"`), not by token suffix.
pub fn from_str(s: &str) -> Option<ComparatorId> {
    COMPARATORS.iter().find(|c| c.canonical == s).map(|c| c.id)
}

/// Find the comparator encoded at the end of a predicate's token run.
///
/// ## Parameters
/// - `tokens`: The predicate tokens, field name first (e.g. `["Age", "Less", "Than"]`).
///
/// ## Returns
/// - `(comparator, suffix_len)`: the matched comparator and how many trailing tokens it spans. When nothing matches,
///   `(ComparatorId::Equal, 0)`.
///
/// ## Notes
/// - A suffix that would leave no tokens for the field name is skipped, so `["Not"]` is the field `Not` compared for
///   equality.
pub fn match_suffix<S: AsRef<str>>(tokens: &[S]) -> (ComparatorId, usize) {
    for &id in MATCH_ORDER {
        let suffix = info_for(id).suffix;
        if suffix.len() >= tokens.len() {
            continue;
        }
        let tail = &tokens[tokens.len() - suffix.len()..];
        if tail.iter().zip(suffix).all(|(t, s)| t.as_ref() == *s) {
            return (id, suffix.len());
        }
    }
    (ComparatorId::Equal, 0)
}

// --- helpers -----------------------------------------------------------------

const fn cmp(
    id: ComparatorId,
    canonical: &'static str,
    suffix: &'static [&'static str],
    arity: usize,
    argument: ArgumentRule,
    field: FieldRule,
) -> ComparatorInfo {
    ComparatorInfo {
        id,
        canonical,
        suffix,
        arity,
        argument,
        field,
    }
}
