//! Define the reserved word vocabulary of repository method names.
//!
//! This module is the single source of truth for grammar keywords: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) that records canonical spellings, categories, and examples.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**: keywords are whole tokens produced by the tokenizer, which splits
//!   on case transitions (`FindByAge` → `Find`, `By`, `Age`).
//! - `Top` is a *prefix* keyword: it appears fused with its digits (`Top5`). Use [`split_limit`] for it.
//! - Comparator suffixes (`LessThan`, `In`, …) and update operator suffixes (`Push`, `Inc`) live in their own
//!   registries ([`crate::lang::comparators`], [`crate::lang::update_operators`]).
//!
//! ## Examples
//! ```rust
//! use repogen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("OrderBy"), None); // two tokens: `Order`, `By`
//! assert_eq!(keywords::from_str("Order"), Some(KeywordId::Order));
//! assert_eq!(keywords::split_limit("Top10"), Some("10"));
//! ```

use super::registry::Example;

/// Stable identifier for every grammar keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Operations (always the leading token)
    Insert,
    Find,
    Update,
    Delete,
    Count,

    // Mode modifiers
    One,
    Many,

    // Query clause
    By,
    All,

    // Connectives
    And,
    Or,

    // Sort clause
    Order,
    Asc,
    Desc,

    // Limit prefix
    Top,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Operation,
    Modifier,
    Clause,
    Connective,
    Sort,
    Limit,
}

impl KeywordCategory {
    /// Lower-case label for tooling output.
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordCategory::Operation => "operation",
            KeywordCategory::Modifier => "modifier",
            KeywordCategory::Clause => "clause",
            KeywordCategory::Connective => "connective",
            KeywordCategory::Sort => "sort",
            KeywordCategory::Limit => "limit",
        }
    }
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub description: &'static str,
    pub examples: &'static [Example],
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Operations
    info(
        KeywordId::Insert,
        "Insert",
        KeywordCategory::Operation,
        "Insert one model or a batch of models.",
        &[Example {
            code: "InsertOne(ctx context.Context, model *UserModel) (interface{}, error)",
            note: None,
        }],
    ),
    info(
        KeywordId::Find,
        "Find",
        KeywordCategory::Operation,
        "Look up one model or a list of models matching a query.",
        &[Example {
            code: "FindByEmail(ctx context.Context, email string) (*UserModel, error)",
            note: None,
        }],
    ),
    info(
        KeywordId::Update,
        "Update",
        KeywordCategory::Operation,
        "Modify matching documents, either field by field or by replacing with a model.",
        &[Example {
            code: "UpdateAgeIncByID(ctx context.Context, age int, id primitive.ObjectID) (bool, error)",
            note: Some("Increments `age` on the document whose id matches."),
        }],
    ),
    info(
        KeywordId::Delete,
        "Delete",
        KeywordCategory::Operation,
        "Remove one or many matching documents.",
        &[],
    ),
    info(
        KeywordId::Count,
        "Count",
        KeywordCategory::Operation,
        "Count documents matching a query.",
        &[],
    ),
    // Modifiers
    info(
        KeywordId::One,
        "One",
        KeywordCategory::Modifier,
        "Force single-result mode (`FindOneBy...`, `InsertOne`).",
        &[],
    ),
    info(
        KeywordId::Many,
        "Many",
        KeywordCategory::Modifier,
        "Mark a batch insert (`InsertMany`).",
        &[],
    ),
    // Query clause
    info(
        KeywordId::By,
        "By",
        KeywordCategory::Clause,
        "Introduce the query clause.",
        &[],
    ),
    info(
        KeywordId::All,
        "All",
        KeywordCategory::Clause,
        "Match every document (empty query).",
        &[Example {
            code: "FindAll(ctx context.Context) ([]*UserModel, error)",
            note: None,
        }],
    ),
    // Connectives
    info(
        KeywordId::And,
        "And",
        KeywordCategory::Connective,
        "Join predicates, update fields, or sort keys.",
        &[],
    ),
    info(
        KeywordId::Or,
        "Or",
        KeywordCategory::Connective,
        "Join predicates disjunctively. Cannot be mixed with `And` in one query.",
        &[],
    ),
    // Sort
    info(
        KeywordId::Order,
        "Order",
        KeywordCategory::Sort,
        "First half of `OrderBy`, which introduces the sort clause.",
        &[Example {
            code: "FindAllOrderByAgeDesc(ctx context.Context) ([]*UserModel, error)",
            note: None,
        }],
    ),
    info(
        KeywordId::Asc,
        "Asc",
        KeywordCategory::Sort,
        "Sort a key in ascending order (the default).",
        &[],
    ),
    info(
        KeywordId::Desc,
        "Desc",
        KeywordCategory::Sort,
        "Sort a key in descending order.",
        &[],
    ),
    // Limit
    info(
        KeywordId::Top,
        "Top",
        KeywordCategory::Limit,
        "Limit the number of results; fused with its digits (`Top5`).",
        &[Example {
            code: "FindTop5AllOrderByAgeDesc(ctx context.Context) ([]*UserModel, error)",
            note: None,
        }],
    ),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Parameters
/// - `s`: Candidate token.
///
/// ## Returns
/// - `Some(KeywordId)` if the token is exactly a keyword spelling.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Check whether `token` is the keyword `id`.
pub fn is(token: &str, id: KeywordId) -> bool {
    token == as_str(id)
}

/// Split a `Top<digits>` token into its digit part.
///
/// ## Returns
/// - `Some(digits)` when `token` starts with `Top`. The remainder is returned as-is (it may be empty or non-numeric;
///   the parser decides whether it is a valid limit).
/// - `None` when the token does not carry the `Top` prefix.
pub fn split_limit(token: &str) -> Option<&str> {
    token.strip_prefix(as_str(KeywordId::Top))
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    description: &'static str,
    examples: &'static [Example],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        description,
        examples,
    }
}
