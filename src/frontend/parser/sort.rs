//! Sort clause: keys after `OrderBy`, joined by `And`, each optionally ending in `Asc` or `Desc`.

use repogen_core::lang::keywords::{self, KeywordId};

use super::{Parser, split_on};
use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{Ordering, Sort};

impl<'m> Parser<'m> {
    pub(super) fn parse_sort(&mut self, tokens: &[&'m str]) -> Result<Vec<Sort<'m>>, ParseError> {
        let invalid = || ParseError::InvalidSort { sort: tokens.concat() };
        if tokens.is_empty() {
            return Err(invalid());
        }

        let mut sorts = Vec::new();
        for key in split_on(tokens, KeywordId::And) {
            let (field_tokens, ordering) = match key.split_last() {
                Some((last, field)) if keywords::is(last, KeywordId::Asc) => (field, Ordering::Ascending),
                Some((last, field)) if keywords::is(last, KeywordId::Desc) => (field, Ordering::Descending),
                _ => (key, Ordering::default()),
            };
            if field_tokens.is_empty() {
                return Err(invalid());
            }
            sorts.push(Sort {
                field: self.resolver.resolve(field_tokens)?,
                ordering,
            });
        }
        Ok(sorts)
    }
}
