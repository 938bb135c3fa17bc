//! Field resolution for method-name queries.
//!
//! A predicate such as `ContactPhone` names a field path, not necessarily a single field. The resolver first tries the
//! whole token run as one field name. If that fails it shrinks the prefix from the right; whenever a prefix names a
//! field whose type is (possibly through a pointer) another struct of the model, the remaining suffix is resolved
//! against that struct.
//!
//! ## Notes
//! - Recursion walks the finite token run, one token at least per level, so self-referential structs cannot make it
//!   loop.
//! - Resolution stops at the terminal field; comparators such as `Exists` apply to that field as a whole.

use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::FieldReference;
use crate::model::{FieldDescriptor, SourceModel, StructModel};

/// Resolves token runs against a root struct.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'m> {
    model: &'m SourceModel,
    root: &'m StructModel,
}

impl<'m> FieldResolver<'m> {
    pub fn new(model: &'m SourceModel, root: &'m StructModel) -> Self {
        Self { model, root }
    }

    /// Resolve a token run into a field reference.
    ///
    /// ## Errors
    /// - [`ParseError::StructFieldNotFound`] when no split of the run names a field path.
    pub fn resolve<S: AsRef<str>>(&self, tokens: &[S]) -> Result<FieldReference<'m>, ParseError> {
        let not_found = || ParseError::StructFieldNotFound {
            field: tokens.iter().map(|t| t.as_ref()).collect(),
        };
        let chain = self.resolve_in(self.root, tokens).ok_or_else(not_found)?;
        FieldReference::new(chain).ok_or_else(not_found)
    }

    fn resolve_in<S: AsRef<str>>(&self, structure: &'m StructModel, tokens: &[S]) -> Option<Vec<&'m FieldDescriptor>> {
        if tokens.is_empty() {
            return None;
        }

        let full: String = tokens.iter().map(|t| t.as_ref()).collect();
        if let Some(field) = structure.field(&full) {
            return Some(vec![field]);
        }

        for len in (1..tokens.len()).rev() {
            let prefix: String = tokens[..len].iter().map(|t| t.as_ref()).collect();
            let Some(field) = structure.field(&prefix) else {
                continue;
            };
            let Some(nested) = self.model.nested_struct(&field.ty) else {
                continue;
            };
            if let Some(rest) = self.resolve_in(nested, &tokens[len..]) {
                let mut chain = Vec::with_capacity(rest.len() + 1);
                chain.push(field);
                chain.extend(rest);
                return Some(chain);
            }
        }
        None
    }
}
