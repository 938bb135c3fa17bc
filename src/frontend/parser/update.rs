//! Update clause: the tokens between `Update` and the query.
//!
//! An empty clause means the caller passes a whole model (`UpdateByID(ctx, model, id)`); otherwise each
//! `And`-separated field takes one parameter, with an optional `Push`/`Inc` suffix choosing the operator.

use repogen_core::lang::keywords::KeywordId;
use repogen_core::lang::update_operators;

use super::{Parser, split_on};
use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{Update, UpdateField, UpdateOperator};

impl<'m> Parser<'m> {
    pub(super) fn parse_update_fields(&mut self, tokens: &[&'m str]) -> Result<Update<'m>, ParseError> {
        let invalid = || ParseError::InvalidUpdateFields { fields: tokens.concat() };

        if tokens.is_empty() {
            let param_index = self.take_params(1);
            if self.method.params.get(param_index) != Some(&self.structure.pointer_type()) {
                return Err(invalid());
            }
            return Ok(Update::Model { param_index });
        }

        let mut fields = Vec::new();
        for clause in split_on(tokens, KeywordId::And) {
            let (field_tokens, operator) = match clause.split_last() {
                Some((last, rest)) => match update_operators::from_suffix(last) {
                    Some(operator) => (rest, operator),
                    None => (clause, UpdateOperator::Set),
                },
                None => return Err(invalid()),
            };
            if field_tokens.is_empty() {
                return Err(invalid());
            }
            let field = self.resolver.resolve(field_tokens)?;
            fields.push(UpdateField {
                field,
                operator,
                param_index: self.take_params(1),
            });
        }
        Ok(Update::Fields(fields))
    }
}
