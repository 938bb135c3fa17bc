//! Provide the canonical naming-convention vocabulary for the repogen method-name compiler.
//!
//! Repository method names encode their query intent (`FindByAgeLessThanOrderByName`). The words that carry meaning
//! in such a name (operation keywords, clause connectives, comparator suffixes, update operator suffixes) are defined
//! once here so that the parser, the validator, and tooling all agree on spellings.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global mutable state, and no compiler-specific types.
//! - Every registry is a `const` table with `from_str` / `as_str` / `info_for` lookups.

pub mod lang;
