//! repogen backend
//!
//! This module turns validated [`MethodSpec`]s into generated source.
//!
//! The pipeline is:
//! 1. `codegen` runs the frontend over every interface method (fail-fast)
//! 2. A [`Backend`] translates each spec into IR statements
//! 3. `codegen` assembles declarations and the import manifest into a [`GeneratedFile`]
//! 4. The file renders through `writer`
//!
//! ## Module Organization
//!
//! - `ir/` - Code-emission IR (`Expr`, `Stmt`, `Decl`) and line rendering
//! - `mongo/` - MongoDB backend: filters, updates, sorts, method bodies
//! - `codegen.rs` - Orchestrator and `GeneratedFile`
//! - `writer.rs` - Indentation-tracking text writer

pub mod codegen;
pub mod ir;
pub mod mongo;
pub mod writer;

pub use codegen::{GeneratedFile, GenerationError, ImportGroup, MethodError, generate};
pub use mongo::MongoBackend;

use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::MethodSpec;
use crate::model::Import;
use ir::{Decl, Param, Stmt};

/// Errors raised while translating a valid method into backend code.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("bson tag of struct field '{field}' not found")]
    #[diagnostic(
        code(repogen::backend::bson_tag_not_found),
        help("Every field used in a query, sort, or update needs a `bson:\"name\"` struct tag.")
    )]
    BsonTagNotFound { field: String },
}

/// Name of the method parameter at `index`. Source parameter names are not kept; generated signatures and bodies
/// refer to parameters positionally.
pub fn arg_name(index: usize) -> String {
    format!("arg{index}")
}

/// A persistence backend the generator can target.
///
/// One backend is used per run. It owns everything that depends on the database driver: the implementation type,
/// the constructor, method bodies, and the driver packages they import.
pub trait Backend {
    /// Constructor and implementation type, in output order.
    fn declarations(&self) -> Vec<Decl>;

    /// Receiver of every generated method.
    fn receiver(&self) -> Param;

    /// Imports every generated file needs, whatever its methods.
    fn base_imports(&self) -> Vec<Import>;

    /// Driver imports the body of `spec` refers to.
    fn imports(&self, spec: &MethodSpec<'_>) -> Vec<Import>;

    /// Statements of the method body.
    ///
    /// ## Errors
    /// - [`TranslateError`] when the model lacks information the driver needs (a serialization tag).
    fn method_body(&self, spec: &MethodSpec<'_>) -> Result<Vec<Stmt>, TranslateError>;
}
