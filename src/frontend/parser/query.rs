//! Query clause: `All`, or `By` followed by predicates joined by one connective.

use repogen_core::lang::comparators;
use repogen_core::lang::keywords::{self, KeywordId};

use super::Parser;
use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{BooleanOperator, Predicate, QuerySpec};

impl<'m> Parser<'m> {
    /// Parse a query clause, starting at its `By` or `All` token.
    ///
    /// ## Errors
    /// - [`ParseError::QueryRequired`] when there is no clause, or `By` has nothing after it.
    /// - [`ParseError::InvalidQuery`] for a dangling connective, mixed `And`/`Or`, or tokens after `All`.
    pub(super) fn parse_query(&mut self, tokens: &[&'m str]) -> Result<QuerySpec<'m>, ParseError> {
        let Some((&head, rest)) = tokens.split_first() else {
            return Err(ParseError::QueryRequired);
        };

        if keywords::is(head, KeywordId::All) {
            if !rest.is_empty() {
                return Err(ParseError::InvalidQuery { query: tokens.concat() });
            }
            return Ok(QuerySpec::default());
        }
        if !keywords::is(head, KeywordId::By) || rest.is_empty() {
            return Err(ParseError::QueryRequired);
        }

        self.parse_predicates(rest)
    }

    fn parse_predicates(&mut self, tokens: &[&'m str]) -> Result<QuerySpec<'m>, ParseError> {
        let invalid = || ParseError::InvalidQuery { query: tokens.concat() };
        let mut operator = None;
        let mut predicates = Vec::new();
        let mut start = 0;

        for (i, &token) in tokens.iter().enumerate() {
            let connective = match keywords::from_str(token) {
                Some(KeywordId::And) => BooleanOperator::And,
                Some(KeywordId::Or) => BooleanOperator::Or,
                _ => continue,
            };
            if operator.is_some_and(|op| op != connective) {
                return Err(invalid());
            }
            operator = Some(connective);

            let buffer = &tokens[start..i];
            if buffer.is_empty() {
                return Err(invalid());
            }
            predicates.push(self.close_predicate(buffer)?);
            start = i + 1;
        }

        let buffer = &tokens[start..];
        if buffer.is_empty() {
            return Err(invalid());
        }
        predicates.push(self.close_predicate(buffer)?);

        Ok(QuerySpec { operator, predicates })
    }

    /// Turn one predicate's tokens into a [`Predicate`]: the longest comparator suffix is stripped and what remains
    /// names the field.
    fn close_predicate(&mut self, buffer: &[&'m str]) -> Result<Predicate<'m>, ParseError> {
        let (comparator, suffix_len) = comparators::match_suffix(buffer);
        let field = self.resolver.resolve(&buffer[..buffer.len() - suffix_len])?;
        let param_index = self.take_params(comparators::arity(comparator));
        Ok(Predicate {
            field,
            comparator,
            param_index,
        })
    }
}
