//! Method bodies.
//!
//! Every body follows the same shape: call the collection, return the zero values and `err` when the call fails,
//! otherwise return the result. Zero values follow the declared return type: `nil` for handles and entities, `false`
//! for single-document updates and deletes, `0` for counts.

use crate::backend::TranslateError;
use crate::backend::ir::{Expr, Stmt};
use crate::frontend::MethodSpec;
use crate::frontend::method::{
    CountOperation, DeleteOperation, FindOperation, InsertOperation, Mode, Operation, UpdateOperation,
};
use crate::model::TypeDescriptor;

use super::filter::filter;
use super::sort::sort_document;
use super::update::update_document;
use super::{COLLECTION, MongoBackend, RECEIVER, arg};

pub(super) fn method_body(backend: &MongoBackend, spec: &MethodSpec<'_>) -> Result<Vec<Stmt>, TranslateError> {
    match &spec.operation {
        Operation::Insert(op) => Ok(insert_body(op)),
        Operation::Find(op) => find_body(backend, op),
        Operation::Update(op) => update_body(op),
        Operation::Delete(op) => delete_body(op),
        Operation::Count(op) => count_body(op),
    }
}

fn insert_body(op: &InsertOperation) -> Vec<Stmt> {
    match op.mode {
        Mode::One => vec![
            Stmt::declare_assign(&["result", "err"], collection_call("InsertOne", vec![arg(0), arg(1)])),
            return_on_error("nil"),
            success("result.InsertedID"),
        ],
        Mode::Many => vec![
            Stmt::Declare {
                name: "entities".into(),
                ty: TypeDescriptor::sequence(TypeDescriptor::EmptyInterface).to_string(),
            },
            Stmt::ForRange {
                key: "_".into(),
                value: "model".into(),
                iterable: arg(1),
                body: vec![Stmt::assign(
                    &["entities"],
                    Expr::call("append", vec![Expr::ident("entities"), Expr::ident("model")]),
                )],
            },
            Stmt::declare_assign(
                &["result", "err"],
                collection_call("InsertMany", vec![arg(0), Expr::ident("entities")]),
            ),
            return_on_error("nil"),
            success("result.InsertedIDs"),
        ],
    }
}

fn find_body(backend: &MongoBackend, op: &FindOperation<'_>) -> Result<Vec<Stmt>, TranslateError> {
    let mut args = vec![arg(0), filter(&op.query)?];
    if let Some(options) = find_options(op)? {
        args.push(options);
    }

    let entity = backend.entity_type();
    let body = match op.mode {
        Mode::One => {
            let decode = Expr::Chain(vec![
                collection_call("FindOne", args),
                Expr::call("Decode", vec![Expr::raw("&entity")]),
            ]);
            vec![
                Stmt::Declare {
                    name: "entity".into(),
                    ty: entity.to_string(),
                },
                check_call(decode, "nil"),
                success("&entity"),
            ]
        }
        Mode::Many => vec![
            Stmt::declare_assign(&["cursor", "err"], collection_call("Find", args)),
            return_on_error("nil"),
            Stmt::declare_assign(
                &["entities"],
                Expr::Slice {
                    ty: TypeDescriptor::sequence(TypeDescriptor::pointer(entity)).to_string(),
                    elements: vec![],
                },
            ),
            check_call(Expr::call("cursor.All", vec![arg(0), Expr::raw("&entities")]), "nil"),
            success("entities"),
        ],
    };
    Ok(body)
}

/// `options.Find().SetSort(...).SetLimit(N)`, or `None` when the query has neither.
fn find_options(op: &FindOperation<'_>) -> Result<Option<Expr>, TranslateError> {
    if op.sorts.is_empty() && op.limit.is_none() {
        return Ok(None);
    }
    let constructor = match op.mode {
        Mode::One => "options.FindOne",
        Mode::Many => "options.Find",
    };
    let mut chain = vec![Expr::call(constructor, vec![])];
    if !op.sorts.is_empty() {
        chain.push(Expr::call("SetSort", vec![sort_document(&op.sorts)?]));
    }
    if let Some(limit) = op.limit {
        chain.push(Expr::call("SetLimit", vec![Expr::raw(limit.to_string())]));
    }
    Ok(Some(Expr::Chain(chain)))
}

fn update_body(op: &UpdateOperation<'_>) -> Result<Vec<Stmt>, TranslateError> {
    let (method, zero, value) = match op.mode {
        Mode::One => ("UpdateOne", "false", "result.MatchedCount > 0"),
        Mode::Many => ("UpdateMany", "0", "int(result.MatchedCount)"),
    };
    let call = collection_call(method, vec![arg(0), filter(&op.query)?, update_document(&op.update)?]);
    Ok(vec![
        Stmt::declare_assign(&["result", "err"], call),
        return_on_error(zero),
        success(value),
    ])
}

fn delete_body(op: &DeleteOperation<'_>) -> Result<Vec<Stmt>, TranslateError> {
    let (method, zero, value) = match op.mode {
        Mode::One => ("DeleteOne", "false", "result.DeletedCount > 0"),
        Mode::Many => ("DeleteMany", "0", "int(result.DeletedCount)"),
    };
    let call = collection_call(method, vec![arg(0), filter(&op.query)?]);
    Ok(vec![
        Stmt::declare_assign(&["result", "err"], call),
        return_on_error(zero),
        success(value),
    ])
}

fn count_body(op: &CountOperation<'_>) -> Result<Vec<Stmt>, TranslateError> {
    let call = collection_call("CountDocuments", vec![arg(0), filter(&op.query)?]);
    Ok(vec![
        Stmt::declare_assign(&["count", "err"], call),
        return_on_error("0"),
        success("int(count)"),
    ])
}

// --- helpers -----------------------------------------------------------------

/// `r.collection.<method>(args...)`
fn collection_call(method: &str, args: Vec<Expr>) -> Expr {
    Expr::Chain(vec![
        Expr::ident(RECEIVER),
        Expr::ident(COLLECTION),
        Expr::call(method, args),
    ])
}

fn failure(zero: &str) -> Vec<Stmt> {
    vec![Stmt::Return(vec![Expr::raw(zero), Expr::ident("err")])]
}

/// `if err != nil { return <zero>, err }`
fn return_on_error(zero: &str) -> Stmt {
    Stmt::If {
        init: None,
        cond: Expr::raw("err != nil"),
        body: failure(zero),
    }
}

/// `if err := <call>; err != nil { return <zero>, err }`
fn check_call(call: Expr, zero: &str) -> Stmt {
    Stmt::If {
        init: Some(Box::new(Stmt::declare_assign(&["err"], call))),
        cond: Expr::raw("err != nil"),
        body: failure(zero),
    }
}

fn success(value: &str) -> Stmt {
    Stmt::Return(vec![Expr::raw(value), Expr::ident("nil")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ir::render;
    use crate::frontend::method::{QuerySpec, Update};

    fn show(stmts: &[Stmt]) -> String {
        stmts.iter().map(|stmt| render(&stmt.lines(), "\t")).collect()
    }

    #[test]
    fn test_insert_one_body() {
        let body = insert_body(&InsertOperation { mode: Mode::One });
        assert_eq!(
            show(&body),
            "result, err := r.collection.InsertOne(arg0, arg1)\n\
             if err != nil {\n\treturn nil, err\n}\n\
             return result.InsertedID, nil\n"
        );
    }

    #[test]
    fn test_insert_many_copies_models_into_interface_slice() {
        let body = insert_body(&InsertOperation { mode: Mode::Many });
        assert_eq!(
            show(&body),
            "var entities []interface{}\n\
             for _, model := range arg1 {\n\tentities = append(entities, model)\n}\n\
             result, err := r.collection.InsertMany(arg0, entities)\n\
             if err != nil {\n\treturn nil, err\n}\n\
             return result.InsertedIDs, nil\n"
        );
    }

    #[test]
    fn test_update_many_with_whole_model() {
        let op = UpdateOperation {
            update: Update::Model { param_index: 1 },
            mode: Mode::Many,
            query: QuerySpec::default(),
        };
        assert_eq!(
            show(&update_body(&op).unwrap()),
            "result, err := r.collection.UpdateMany(arg0, bson.M{}, bson.M{\"$set\": arg1})\n\
             if err != nil {\n\treturn 0, err\n}\n\
             return int(result.MatchedCount), nil\n"
        );
    }

    #[test]
    fn test_count_all_body() {
        let body = count_body(&CountOperation {
            query: QuerySpec::default(),
        })
        .unwrap();
        assert_eq!(
            show(&body),
            "count, err := r.collection.CountDocuments(arg0, bson.M{})\n\
             if err != nil {\n\treturn 0, err\n}\n\
             return int(count), nil\n"
        );
    }

    #[test]
    fn test_find_one_decodes_into_entity() {
        let backend = MongoBackend::new("UserModel", "UserRepository");
        let op = FindOperation {
            mode: Mode::One,
            query: QuerySpec::default(),
            sorts: vec![],
            limit: None,
        };
        assert_eq!(
            show(&find_body(&backend, &op).unwrap()),
            "var entity UserModel\n\
             if err := r.collection.FindOne(arg0, bson.M{}).Decode(&entity); err != nil {\n\treturn nil, err\n}\n\
             return &entity, nil\n"
        );
    }

    #[test]
    fn test_find_many_with_limit() {
        let backend = MongoBackend::new("UserModel", "UserRepository");
        let op = FindOperation {
            mode: Mode::Many,
            query: QuerySpec::default(),
            sorts: vec![],
            limit: Some(5),
        };
        let rendered = show(&find_body(&backend, &op).unwrap());
        assert!(rendered.starts_with("cursor, err := r.collection.Find(arg0, bson.M{}, options.Find().SetLimit(5))\n"));
        assert!(rendered.contains("entities := []*UserModel{}\n"));
    }
}
