//! Typed failures of the method-name compiler.
//!
//! Every user-input-driven problem is a [`ParseError`] variant; nothing in the frontend panics or uses control-flow
//! exceptions for expected cases. Failures are non-retryable: the same method always fails the same way.
//!
//! Two families share the type:
//! - **grammar** errors: the token stream does not follow the naming convention (unknown operation, dangling
//!   connective, mixed `And`/`Or`, malformed sort or limit);
//! - **semantic** errors: the name is well formed but disagrees with the structural model or the signature
//!   (missing field, incompatible comparator, wrong parameter or return shape).

use miette::Diagnostic;
use thiserror::Error;

/// Error produced while turning a method signature into a `MethodSpec`.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    // =========================================================================
    // Grammar Errors
    // =========================================================================
    #[error("unknown operation '{keyword}'")]
    #[diagnostic(
        code(repogen::grammar::unknown_operation),
        help("Method names must start with Insert, Find, Update, Delete, or Count.")
    )]
    UnknownOperation { keyword: String },

    #[error("query is required")]
    #[diagnostic(
        code(repogen::grammar::query_required),
        help("Add a query after 'By' (e.g. FindByEmail), or use 'All' to match every document.")
    )]
    QueryRequired,

    #[error("invalid query '{query}'")]
    #[diagnostic(
        code(repogen::grammar::invalid_query),
        help("Each 'And'/'Or' must join two predicates, and 'And' and 'Or' cannot be mixed in one query.")
    )]
    InvalidQuery { query: String },

    #[error("invalid sort '{sort}'")]
    #[diagnostic(
        code(repogen::grammar::invalid_sort),
        help("Sort keys follow 'OrderBy', are joined by 'And', and may end with 'Asc' or 'Desc'.")
    )]
    InvalidSort { sort: String },

    #[error("invalid limit '{token}'")]
    #[diagnostic(code(repogen::grammar::invalid_limit), help("Use Top<N> with N a positive integer, e.g. FindTop5..."))]
    InvalidLimit { token: String },

    #[error("invalid update fields '{fields}'")]
    #[diagnostic(
        code(repogen::grammar::invalid_update_fields),
        help("Name the fields to update joined by 'And', or pass the whole model as a single *Model parameter.")
    )]
    InvalidUpdateFields { fields: String },

    // =========================================================================
    // Semantic Errors
    // =========================================================================
    #[error("{operation} operation does not support return types ({returns})")]
    #[diagnostic(code(repogen::semantic::unsupported_return))]
    UnsupportedReturn { operation: String, returns: String },

    #[error("context parameter is required")]
    #[diagnostic(
        code(repogen::semantic::context_param_required),
        help("The first parameter of every repository method must be context.Context.")
    )]
    ContextParamRequired,

    #[error("invalid parameter: {detail}")]
    #[diagnostic(code(repogen::semantic::invalid_param))]
    InvalidParam { detail: String },

    #[error("struct field '{field}' not found")]
    #[diagnostic(code(repogen::semantic::struct_field_not_found))]
    StructFieldNotFound { field: String },

    #[error("cannot use comparator {comparator} with field '{field}' of type {field_type}")]
    #[diagnostic(
        code(repogen::semantic::incompatible_comparator),
        help("True and False can only be applied to bool fields.")
    )]
    IncompatibleComparator {
        comparator: String,
        field: String,
        field_type: String,
    },

    #[error("cannot use update operator {operator} with field '{field}' of type {field_type}")]
    #[diagnostic(
        code(repogen::semantic::incompatible_update_operator),
        help("Push requires a slice field; Inc requires a numeric field.")
    )]
    IncompatibleUpdateOperator {
        operator: String,
        field: String,
        field_type: String,
    },
}

impl ParseError {
    /// A parameter at `position` does not have the expected type.
    pub fn param_type(position: usize, expected: impl std::fmt::Display, found: impl std::fmt::Display) -> Self {
        Self::InvalidParam {
            detail: format!("parameter {position} should be {expected}, found {found}"),
        }
    }

    /// The method declares a different number of parameters than the name consumes.
    pub fn param_count(expected: usize, found: usize) -> Self {
        Self::InvalidParam {
            detail: format!("method name requires {expected} parameters, found {found}"),
        }
    }

    /// Whether the failure is a grammar error (as opposed to a semantic mismatch).
    pub fn is_grammar(&self) -> bool {
        matches!(
            self,
            ParseError::UnknownOperation { .. }
                | ParseError::QueryRequired
                | ParseError::InvalidQuery { .. }
                | ParseError::InvalidSort { .. }
                | ParseError::InvalidLimit { .. }
                | ParseError::InvalidUpdateFields { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_helpers_render_detail() {
        let err = ParseError::param_type(2, "int", "string");
        assert_eq!(err.to_string(), "invalid parameter: parameter 2 should be int, found string");
        let err = ParseError::param_count(3, 2);
        assert_eq!(err.to_string(), "invalid parameter: method name requires 3 parameters, found 2");
    }

    #[test]
    fn test_grammar_classification() {
        assert!(ParseError::QueryRequired.is_grammar());
        assert!(!ParseError::ContextParamRequired.is_grammar());
        assert!(
            !ParseError::StructFieldNotFound {
                field: "Age".into()
            }
            .is_grammar()
        );
    }
}
