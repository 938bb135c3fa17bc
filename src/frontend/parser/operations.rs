//! One entry point per operation keyword.

use repogen_core::lang::keywords::{self, KeywordId};

use super::Parser;
use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{
    CountOperation, DeleteOperation, FindOperation, InsertOperation, Mode, Operation, UpdateOperation,
};
use crate::frontend::validate::{return_mode, unsupported_return};

impl<'m> Parser<'m> {
    /// `Insert [One | Many]`. The mode comes from the return shape; an explicit modifier must agree with it.
    pub(super) fn parse_insert(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        let mode = return_mode(KeywordId::Insert, self.structure, &self.method.returns)?;
        let explicit = match tokens {
            [] => None,
            [t] if keywords::is(t, KeywordId::One) => Some(Mode::One),
            [t] if keywords::is(t, KeywordId::Many) => Some(Mode::Many),
            _ => return Err(ParseError::InvalidQuery { query: tokens.concat() }),
        };
        if explicit.is_some_and(|explicit| explicit != mode) {
            return Err(unsupported_return(KeywordId::Insert, &self.method.returns));
        }
        Ok(Operation::Insert(InsertOperation { mode }))
    }

    /// `Find [One] [Top<N>] query [Order By sort]`.
    pub(super) fn parse_find(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        let mode = return_mode(KeywordId::Find, self.structure, &self.method.returns)?;
        let mut rest = tokens;

        if let Some((first, tail)) = rest.split_first() {
            if keywords::is(first, KeywordId::One) {
                if mode != Mode::One {
                    return Err(unsupported_return(KeywordId::Find, &self.method.returns));
                }
                rest = tail;
            }
        }

        let mut limit = None;
        if let Some((first, tail)) = rest.split_first() {
            if let Some(digits) = limit_digits(first) {
                if mode == Mode::One {
                    return Err(unsupported_return(KeywordId::Find, &self.method.returns));
                }
                limit = Some(parse_limit(first, digits)?);
                rest = tail;
            }
        }

        let (query_tokens, sort_tokens) = split_order_by(rest);
        let query = self.parse_query(query_tokens)?;
        let sorts = match sort_tokens {
            Some(sort_tokens) => self.parse_sort(sort_tokens)?,
            None => Vec::new(),
        };

        Ok(Operation::Find(FindOperation {
            mode,
            query,
            sorts,
            limit,
        }))
    }

    /// `Update [fields] query`. Fields run up to the first `By` or `All`.
    pub(super) fn parse_update(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        let mode = return_mode(KeywordId::Update, self.structure, &self.method.returns)?;
        let split = tokens
            .iter()
            .position(|t| keywords::is(t, KeywordId::By) || keywords::is(t, KeywordId::All))
            .ok_or(ParseError::QueryRequired)?;
        let (field_tokens, query_tokens) = tokens.split_at(split);

        let update = self.parse_update_fields(field_tokens)?;
        let query = self.parse_query(query_tokens)?;
        Ok(Operation::Update(UpdateOperation { update, mode, query }))
    }

    pub(super) fn parse_delete(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        let mode = return_mode(KeywordId::Delete, self.structure, &self.method.returns)?;
        let query = self.parse_query(tokens)?;
        Ok(Operation::Delete(DeleteOperation { mode, query }))
    }

    pub(super) fn parse_count(&mut self, tokens: &[&'m str]) -> Result<Operation<'m>, ParseError> {
        return_mode(KeywordId::Count, self.structure, &self.method.returns)?;
        let query = self.parse_query(tokens)?;
        Ok(Operation::Count(CountOperation { query }))
    }
}

/// Digits of a `Top<N>` token. `Topic` is a field word, not a limit, so the prefix only counts when followed by a
/// digit or nothing.
fn limit_digits(token: &str) -> Option<&str> {
    keywords::split_limit(token).filter(|rest| rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit()))
}

fn parse_limit(token: &str, digits: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidLimit {
        token: token.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(n),
    }
}

/// Split at the first `Order` `By` pair: query tokens before it, sort tokens after it.
fn split_order_by<'t, 'm>(tokens: &'t [&'m str]) -> (&'t [&'m str], Option<&'t [&'m str]>) {
    let found = tokens
        .windows(2)
        .position(|pair| keywords::is(pair[0], KeywordId::Order) && keywords::is(pair[1], KeywordId::By));
    match found {
        Some(i) => (&tokens[..i], Some(&tokens[i + 2..])),
        None => (tokens, None),
    }
}
