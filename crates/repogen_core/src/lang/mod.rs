//! Naming-convention vocabulary registries.
//!
//! This module is the “front door” for the words a repository method name may contain: operation and clause
//! keywords, comparator suffixes, and update operator suffixes.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler. Callers work with **stable IDs**
//! (e.g. `KeywordId`, `ComparatorId`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no model types, no IO, no side effects.
//! - The parser enforces grammar; registries provide spellings and metadata for shared use (diagnostics, docs).
//!
//! ## Examples
//! ```rust
//! use repogen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("Find"), Some(KeywordId::Find));
//! assert_eq!(keywords::as_str(KeywordId::Find), "Find");
//! ```

pub mod comparators;
pub mod keywords;
pub mod registry;
pub mod update_operators;
