//! Method-name compiler frontend
//!
//! This module contains all frontend components:
//! - `tokenizer`: splitting method names into word tokens
//! - `parser`: parsing tokens into a `MethodSpec`
//! - `method`: the typed operation model (`MethodSpec`, `Operation`, `QuerySpec`, ...)
//! - `resolver`: resolving token runs into (possibly nested) struct fields
//! - `validate`: checking a parsed method against its signature
//! - `diagnostics`: the typed failure taxonomy

pub mod diagnostics;
pub mod method;
pub mod parser;
pub mod resolver;
pub mod tokenizer;
pub mod validate;

pub use diagnostics::ParseError;
pub use method::MethodSpec;
pub use parser::parse_method;
