//! Update documents.
//!
//! Field updates are grouped by operator, in order of first appearance: `UpdateCityAndAgeIncAndNameByID` yields
//! `$set` (city, name) followed by `$inc` (age).

use crate::backend::TranslateError;
use crate::backend::ir::Expr;
use crate::frontend::method::{Update, UpdateOperator};

use super::filter::bson_path;
use super::{BSON_M, arg};

/// MongoDB operator key of an update operator.
pub fn operator_key(operator: UpdateOperator) -> &'static str {
    match operator {
        UpdateOperator::Set => "$set",
        UpdateOperator::Push => "$push",
        UpdateOperator::Inc => "$inc",
    }
}

/// The update document of an update operation.
pub fn update_document(update: &Update<'_>) -> Result<Expr, TranslateError> {
    let fields = match update {
        Update::Model { param_index } => {
            return Ok(Expr::map(BSON_M, vec![(Expr::string("$set"), arg(*param_index))]));
        }
        Update::Fields(fields) => fields,
    };

    let mut groups: Vec<(UpdateOperator, Vec<(Expr, Expr)>)> = Vec::new();
    for field in fields {
        let entry = (Expr::string(&bson_path(&field.field)?), arg(field.param_index));
        match groups.iter_mut().find(|(operator, _)| *operator == field.operator) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((field.operator, vec![entry])),
        }
    }

    let entries = groups
        .into_iter()
        .map(|(operator, entries)| (Expr::string(operator_key(operator)), Expr::map(BSON_M, entries)))
        .collect();
    Ok(Expr::map(BSON_M, entries))
}
