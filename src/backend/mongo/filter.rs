//! Query filters.
//!
//! One predicate becomes a one-entry document (`bson.M{"age": arg1}`); several become an array of such documents under
//! `$and` or `$or`. A match-all query is the empty document.

use crate::backend::TranslateError;
use crate::backend::ir::Expr;
use crate::frontend::method::{BooleanOperator, Comparator, FieldReference, Predicate, QuerySpec};

use super::{BSON_M, arg};

/// Dotted document path of a field reference, built from each field's `bson` tag.
///
/// ## Errors
/// - [`TranslateError::BsonTagNotFound`] naming the first field on the path without a usable tag.
pub fn bson_path(field: &FieldReference<'_>) -> Result<String, TranslateError> {
    let mut segments = Vec::with_capacity(field.fields().len());
    for descriptor in field.fields() {
        let name = descriptor.bson_name().ok_or_else(|| TranslateError::BsonTagNotFound {
            field: descriptor.name.clone(),
        })?;
        segments.push(name);
    }
    Ok(segments.join("."))
}

/// The filter document of a query.
pub fn filter(query: &QuerySpec<'_>) -> Result<Expr, TranslateError> {
    let mut documents = query
        .predicates
        .iter()
        .map(|predicate| Ok(vec![predicate_entry(predicate)?]))
        .collect::<Result<Vec<_>, TranslateError>>()?;

    match (query.operator, documents.len()) {
        (_, 0) => Ok(Expr::map(BSON_M, vec![])),
        (_, 1) => Ok(Expr::map(BSON_M, documents.swap_remove(0))),
        (None, _) => Ok(Expr::map(BSON_M, documents.into_iter().flatten().collect())),
        (Some(operator), _) => {
            let key = match operator {
                BooleanOperator::And => "$and",
                BooleanOperator::Or => "$or",
            };
            let elements = documents.into_iter().map(|entries| Expr::map("", entries)).collect();
            let array = Expr::Slice {
                ty: format!("[]{BSON_M}"),
                elements,
            };
            Ok(Expr::map(BSON_M, vec![(Expr::string(key), array)]))
        }
    }
}

fn predicate_entry(predicate: &Predicate<'_>) -> Result<(Expr, Expr), TranslateError> {
    let path = bson_path(&predicate.field)?;
    let index = predicate.param_index;
    let operand = |key: &str, value: Expr| Expr::map(BSON_M, vec![(Expr::string(key), value)]);

    let value = match predicate.comparator {
        Comparator::Equal => arg(index),
        Comparator::Not => operand("$ne", arg(index)),
        Comparator::LessThan => operand("$lt", arg(index)),
        Comparator::LessThanEqual => operand("$lte", arg(index)),
        Comparator::GreaterThan => operand("$gt", arg(index)),
        Comparator::GreaterThanEqual => operand("$gte", arg(index)),
        Comparator::Between => Expr::map(
            BSON_M,
            vec![
                (Expr::string("$gte"), arg(index)),
                (Expr::string("$lte"), arg(index + 1)),
            ],
        ),
        Comparator::In => operand("$in", arg(index)),
        Comparator::NotIn => operand("$nin", arg(index)),
        Comparator::Exists => operand("$exists", Expr::raw("1")),
        Comparator::NotExists => operand("$exists", Expr::raw("0")),
        Comparator::True => Expr::raw("true"),
        Comparator::False => Expr::raw("false"),
    };
    Ok((Expr::string(&path), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ir::render;
    use crate::model::{FieldDescriptor, TypeDescriptor};

    fn show(expr: &Expr) -> String {
        render(&expr.lines(), "\t")
    }

    fn predicate<'m>(field: &'m FieldDescriptor, comparator: Comparator, param_index: usize) -> Predicate<'m> {
        Predicate {
            field: FieldReference::new(vec![field]).unwrap(),
            comparator,
            param_index,
        }
    }

    #[test]
    fn test_single_equal_predicate() {
        let id = FieldDescriptor::new("ID", TypeDescriptor::simple("string"), Some(r#"bson:"_id""#));
        let query = QuerySpec {
            operator: None,
            predicates: vec![predicate(&id, Comparator::Equal, 1)],
        };
        assert_eq!(show(&filter(&query).unwrap()), "bson.M{\"_id\": arg1}\n");
    }

    #[test]
    fn test_match_all_is_empty_document() {
        assert_eq!(show(&filter(&QuerySpec::default()).unwrap()), "bson.M{}\n");
    }

    #[test]
    fn test_comparator_operators() {
        let age = FieldDescriptor::new("Age", TypeDescriptor::simple("int"), Some(r#"bson:"age""#));
        let cases = [
            (Comparator::Not, "bson.M{\"age\": bson.M{\"$ne\": arg1}}\n"),
            (Comparator::GreaterThanEqual, "bson.M{\"age\": bson.M{\"$gte\": arg1}}\n"),
            (Comparator::NotIn, "bson.M{\"age\": bson.M{\"$nin\": arg1}}\n"),
            (Comparator::Between, "bson.M{\"age\": bson.M{\"$gte\": arg1, \"$lte\": arg2}}\n"),
            (Comparator::NotExists, "bson.M{\"age\": bson.M{\"$exists\": 0}}\n"),
            (Comparator::True, "bson.M{\"age\": true}\n"),
        ];
        for (comparator, expected) in cases {
            let query = QuerySpec {
                operator: None,
                predicates: vec![predicate(&age, comparator, 1)],
            };
            assert_eq!(show(&filter(&query).unwrap()), expected, "{comparator:?}");
        }
    }

    #[test]
    fn test_or_query_uses_array() {
        let age = FieldDescriptor::new("Age", TypeDescriptor::simple("int"), Some(r#"bson:"age""#));
        let city = FieldDescriptor::new("City", TypeDescriptor::simple("string"), Some(r#"bson:"city""#));
        let query = QuerySpec {
            operator: Some(BooleanOperator::Or),
            predicates: vec![predicate(&age, Comparator::LessThan, 1), predicate(&city, Comparator::Equal, 2)],
        };
        assert_eq!(
            show(&filter(&query).unwrap()),
            "bson.M{\n\t\"$or\": []bson.M{\n\t\t{\"age\": bson.M{\"$lt\": arg1}},\n\t\t{\"city\": arg2},\n\t},\n}\n"
        );
    }

    #[test]
    fn test_nested_path_and_missing_tag() {
        let contact = FieldDescriptor::new("Contact", TypeDescriptor::simple("Contact"), Some(r#"bson:"contact""#));
        let phone = FieldDescriptor::new("Phone", TypeDescriptor::simple("string"), Some(r#"bson:"phone""#));
        let untagged = FieldDescriptor::new("Phone", TypeDescriptor::simple("string"), None);

        let reference = FieldReference::new(vec![&contact, &phone]).unwrap();
        assert_eq!(bson_path(&reference).unwrap(), "contact.phone");

        let reference = FieldReference::new(vec![&contact, &untagged]).unwrap();
        assert_eq!(
            bson_path(&reference),
            Err(TranslateError::BsonTagNotFound { field: "Phone".into() })
        );
    }
}
