//! Parser for repository method names.
//!
//! Converts a method signature into a [`MethodSpec`]: the name is tokenized, the leading token selects the
//! operation, and the remaining tokens are parsed into query, sort, limit, and update clauses. The finished spec is
//! then checked against the signature by [`crate::frontend::validate`].
//!
//! ## Grammar
//!
//! ```text
//! method  := Insert [One | Many]
//!          | Find [One] [Top<N>] query [Order By sort]
//!          | Update [fields] query
//!          | Delete query
//!          | Count query
//! query   := All | By predicate ((And | Or) predicate)*
//! sort    := key (And key)*            key := field [Asc | Desc]
//! fields  := field [Push | Inc] (And field [Push | Inc])*
//! ```
//!
//! Parameters are numbered from 1 (index 0 is always the context). Every clause that consumes parameters takes the
//! next free index, left to right: update fields first, then predicates.

mod operations;
mod query;
mod sort;
mod update;

use repogen_core::lang::keywords::{self, KeywordId};

use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{MethodSpec, Operation};
use crate::frontend::resolver::FieldResolver;
use crate::frontend::tokenizer::tokenize;
use crate::frontend::validate;
use crate::model::{MethodModel, SourceModel, StructModel};

/// Parse and validate one interface method.
///
/// ## Parameters
/// - `model`: The merged structural model.
/// - `structure`: The entity struct the repository stores.
/// - `method`: The interface method to compile.
///
/// ## Errors
/// - [`ParseError::ContextParamRequired`] before anything else when the first parameter is not `context.Context`.
/// - Grammar errors when the name does not follow the naming convention.
/// - Semantic errors when the name, the signature, and the model disagree.
#[tracing::instrument(skip_all, fields(method = %method.name))]
pub fn parse_method<'m>(
    model: &'m SourceModel,
    structure: &'m StructModel,
    method: &'m MethodModel,
) -> Result<MethodSpec<'m>, ParseError> {
    validate::check_context(&method.params)?;
    let tokens = tokenize(&method.name);
    let mut parser = Parser::new(model, structure, method);
    let operation = parser.parse(&tokens)?;
    let spec = MethodSpec::new(method, operation);
    validate::validate_method(model, structure, &spec)?;

    tracing::debug!(
        operation = spec.operation.name(),
        mode = ?spec.operation.mode(),
        predicates = spec.operation.query().map_or(0, |q| q.predicates.len()),
        "parsed method"
    );
    Ok(spec)
}

/// Parser state for a single method.
///
/// `next_param` is the only mutable state: the index of the next parameter a clause will consume.
pub(crate) struct Parser<'m> {
    structure: &'m StructModel,
    method: &'m MethodModel,
    resolver: FieldResolver<'m>,
    next_param: usize,
}

impl<'m> Parser<'m> {
    pub(crate) fn new(model: &'m SourceModel, structure: &'m StructModel, method: &'m MethodModel) -> Self {
        Self {
            structure,
            method,
            resolver: FieldResolver::new(model, structure),
            next_param: 1,
        }
    }

    /// Dispatch on the operation keyword.
    pub(crate) fn parse(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        let Some((&head, rest)) = tokens.split_first() else {
            return Err(ParseError::UnknownOperation { keyword: String::new() });
        };

        match keywords::from_str(head) {
            Some(KeywordId::Insert) => self.parse_insert(rest),
            Some(KeywordId::Find) => self.parse_find(rest),
            Some(KeywordId::Update) => self.parse_update(rest),
            Some(KeywordId::Delete) => self.parse_delete(rest),
            Some(KeywordId::Count) => self.parse_count(rest),
            _ => Err(ParseError::UnknownOperation { keyword: head.to_string() }),
        }
    }

    /// Reserve `count` consecutive parameters and return the first index.
    fn take_params(&mut self, count: usize) -> usize {
        let index = self.next_param;
        self.next_param += count;
        index
    }
}

/// Split `tokens` at each occurrence of the keyword `separator`.
fn split_on<'t, 'm>(tokens: &'t [&'m str], separator: KeywordId) -> impl Iterator<Item = &'t [&'m str]> {
    tokens.split(move |t| keywords::is(t, separator))
}
