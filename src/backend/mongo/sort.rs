//! Sort documents: an ordered `bson.D` of `{Key, Value}` pairs, `1` ascending and `-1` descending.

use crate::backend::TranslateError;
use crate::backend::ir::Expr;
use crate::frontend::method::{Ordering, Sort};

use super::BSON_D;
use super::filter::bson_path;

pub fn sort_document(sorts: &[Sort<'_>]) -> Result<Expr, TranslateError> {
    let elements = sorts
        .iter()
        .map(|sort| {
            let direction = match sort.ordering {
                Ordering::Ascending => "1",
                Ordering::Descending => "-1",
            };
            Ok(Expr::Struct {
                ty: String::new(),
                fields: vec![
                    ("Key".to_string(), Expr::string(&bson_path(&sort.field)?)),
                    ("Value".to_string(), Expr::raw(direction)),
                ],
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    Ok(Expr::Slice {
        ty: BSON_D.to_string(),
        elements,
    })
}
