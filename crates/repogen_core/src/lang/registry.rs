//! Shareable metadata for `repogen_core::lang` registries.
//!
//! The `repogen_core::lang` module is a set of **registry-first** vocabularies. This submodule provides the small,
//! dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of grammar rules still lives in the parser.

/// Represent a small example method name for documentation.
///
/// ## Notes
/// - `code` is a method name (or signature) that uses the vocabulary item.
/// - `note` is an optional short explanation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
