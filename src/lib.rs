#![forbid(unsafe_code)]
//! Repogen: a repository code generator
//!
//! Repogen compiles the *names* of repository interface methods (`FindByAgeLessThanOrderByAge`,
//! `UpdateCityByID`, `CountByGender`) into the data-access code that implements them. This crate provides the
//! compiler: frontend (tokenizer, parser, field resolver, validator), backend (MongoDB translation, code IR, and
//! file assembly), and the command-line tool.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: Method bodies are emitted as text; Go error checks in the output are strings, not control
//!   flow in the generator.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod model;

pub use frontend::diagnostics;
pub use frontend::tokenizer::tokenize;
pub use frontend::{MethodSpec, ParseError, parse_method};

pub use backend::{GeneratedFile, GenerationError, generate};
pub use config::GeneratorConfig;
pub use model::{SourceFile, SourceModel};
