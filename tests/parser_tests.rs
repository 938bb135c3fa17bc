//! End-to-end tests of method-name parsing through the public API
//!
//! Each case runs the full front end (tokenize → parse → resolve → validate) on one method and checks either the
//! parsed operation or the diagnostic the user would see.

use miette::Diagnostic;
use repogen::frontend::method::{BooleanOperator, Comparator, Mode, Operation, Ordering, Update, UpdateOperator};
use repogen::model::{
    FieldDescriptor, InterfaceModel, MethodModel, NamedType, SourceFile, SourceModel, StructModel, TypeDescriptor,
};
use repogen::{MethodSpec, ParseError, parse_method};

fn simple(name: &str) -> TypeDescriptor {
    TypeDescriptor::simple(name)
}

fn user_model() -> SourceModel {
    let user = StructModel {
        name: "UserModel".into(),
        fields: vec![
            FieldDescriptor::new("ID", simple("string"), Some(r#"bson:"_id""#)),
            FieldDescriptor::new("Gender", simple("Gender"), Some(r#"bson:"gender""#)),
            FieldDescriptor::new("Age", simple("int"), Some(r#"bson:"age""#)),
            FieldDescriptor::new("Enabled", simple("bool"), Some(r#"bson:"enabled""#)),
            FieldDescriptor::new("Contact", simple("ContactModel"), Some(r#"bson:"contact""#)),
            FieldDescriptor::new("Tags", TypeDescriptor::sequence(simple("string")), Some(r#"bson:"tags""#)),
        ],
    };
    let contact = StructModel {
        name: "ContactModel".into(),
        fields: vec![FieldDescriptor::new("Phone", simple("string"), Some(r#"bson:"phone""#))],
    };
    let file = SourceFile {
        package: "user".into(),
        structs: vec![user, contact],
        interfaces: vec![InterfaceModel {
            name: "UserRepository".into(),
            methods: vec![],
        }],
        named_types: vec![NamedType {
            name: "Gender".into(),
            underlying: simple("string"),
        }],
        ..Default::default()
    };
    SourceModel::from_files([file]).expect("model should build")
}

fn method(name: &str, params: Vec<TypeDescriptor>, returns: Vec<TypeDescriptor>) -> MethodModel {
    let mut all = vec![TypeDescriptor::context()];
    all.extend(params);
    MethodModel {
        name: name.into(),
        params: all,
        returns,
    }
}

fn many() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::sequence(TypeDescriptor::pointer(simple("UserModel"))),
        TypeDescriptor::error(),
    ]
}

fn one() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::pointer(simple("UserModel")), TypeDescriptor::error()]
}

fn count() -> Vec<TypeDescriptor> {
    vec![simple("int"), TypeDescriptor::error()]
}

/// Parse `method` against `UserModel` and hand the result to `check`.
fn with_parsed<R>(method: &MethodModel, check: impl FnOnce(Result<MethodSpec<'_>, ParseError>) -> R) -> R {
    let model = user_model();
    let structure = model.find_struct("UserModel").expect("struct exists");
    check(parse_method(&model, structure, method))
}

fn parse_err(method: &MethodModel) -> ParseError {
    with_parsed(method, |result| result.expect_err("method should be rejected"))
}

fn code(err: &ParseError) -> String {
    err.code().map(|code| code.to_string()).unwrap_or_default()
}

// ========================================
// Accepted methods
// ========================================

#[test]
fn test_find_with_sort() {
    let m = method("FindByAgeLessThanEqualOrderByAge", vec![simple("int")], many());
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        let Operation::Find(op) = &spec.operation else {
            panic!("expected Find, got {:?}", spec.operation);
        };
        assert_eq!(op.mode, Mode::Many);
        assert_eq!(op.query.predicates[0].comparator, Comparator::LessThanEqual);
        assert_eq!(op.sorts.len(), 1);
        assert_eq!(op.sorts[0].ordering, Ordering::Ascending);
        assert_eq!(op.sorts[0].field.reference_name(), "Age");
    });
}

#[test]
fn test_or_query_assigns_consecutive_params() {
    let m = method(
        "FindByGenderOrAgeBetween",
        vec![simple("Gender"), simple("int"), simple("int")],
        many(),
    );
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        let query = spec.operation.query().expect("find has a query");
        assert_eq!(query.operator, Some(BooleanOperator::Or));
        let indices: Vec<usize> = query.predicates.iter().map(|p| p.param_index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(query.number_of_arguments(), 3);
    });
}

#[test]
fn test_nested_field_and_zero_arity_comparator() {
    let m = method("FindByContactPhoneAndEnabledTrue", vec![simple("string")], one());
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        let query = spec.operation.query().expect("find has a query");
        assert_eq!(query.predicates[0].field.reference_name(), "Contact.Phone");
        assert_eq!(query.predicates[1].comparator, Comparator::True);
        assert_eq!(query.number_of_arguments(), 1);
    });
}

#[test]
fn test_update_fields_then_query() {
    let m = method(
        "UpdateTagsPushAndAgeIncByID",
        vec![simple("string"), simple("int"), simple("string")],
        vec![simple("bool"), TypeDescriptor::error()],
    );
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        let Operation::Update(op) = &spec.operation else {
            panic!("expected Update");
        };
        let Update::Fields(fields) = &op.update else {
            panic!("expected field updates");
        };
        let operators: Vec<UpdateOperator> = fields.iter().map(|f| f.operator).collect();
        assert_eq!(operators, vec![UpdateOperator::Push, UpdateOperator::Inc]);
        assert_eq!(op.query.predicates[0].param_index, 3);
        assert_eq!(op.mode, Mode::One);
    });
}

#[test]
fn test_count_all() {
    let m = method("CountAll", vec![], count());
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        assert!(spec.operation.query().is_some_and(|q| q.is_match_all()));
        assert_eq!(spec.operation.mode(), None);
    });
}

// ========================================
// Grammar errors
// ========================================

#[test]
fn test_unknown_operation() {
    let err = parse_err(&method("SearchByAge", vec![simple("int")], many()));
    assert_eq!(code(&err), "repogen::grammar::unknown_operation");
    assert_eq!(err.to_string(), "unknown operation 'Search'");
    assert!(err.is_grammar());
}

#[test]
fn test_query_required() {
    let err = parse_err(&method("CountBy", vec![], count()));
    assert_eq!(err, ParseError::QueryRequired);
    assert_eq!(code(&err), "repogen::grammar::query_required");
}

#[test]
fn test_mixed_connectives_rejected() {
    let err = parse_err(&method(
        "FindByAgeAndGenderOrID",
        vec![simple("int"), simple("Gender"), simple("string")],
        many(),
    ));
    assert_eq!(
        err,
        ParseError::InvalidQuery {
            query: "AgeAndGenderOrID".into()
        }
    );
}

#[test]
fn test_invalid_limit() {
    let err = parse_err(&method("FindTop0ByAge", vec![simple("int")], many()));
    assert!(matches!(err, ParseError::InvalidLimit { .. }));
    assert!(err.help().is_some());
}

#[test]
fn test_dangling_connective_rejected() {
    let err = parse_err(&method("FindByAgeAnd", vec![simple("int")], many()));
    assert_eq!(err, ParseError::InvalidQuery { query: "AgeAnd".into() });

    let err = parse_err(&method("FindByAndAge", vec![simple("int")], many()));
    assert_eq!(err, ParseError::InvalidQuery { query: "AndAge".into() });
    assert!(err.is_grammar());
}

#[test]
fn test_tokens_after_all_rejected() {
    let err = parse_err(&method("FindAllX", vec![], many()));
    assert_eq!(err, ParseError::InvalidQuery { query: "AllX".into() });
}

#[test]
fn test_empty_sort_rejected() {
    let err = parse_err(&method("FindAllOrderBy", vec![], many()));
    assert_eq!(err, ParseError::InvalidSort { sort: String::new() });
    assert_eq!(code(&err), "repogen::grammar::invalid_sort");

    let err = parse_err(&method("FindAllOrderByAgeAnd", vec![], many()));
    assert_eq!(err, ParseError::InvalidSort { sort: "AgeAnd".into() });
}

#[test]
fn test_multi_key_sort() {
    let m = method("FindAllOrderByAgeAndGenderDesc", vec![], many());
    with_parsed(&m, |result| {
        let spec = result.expect("should parse");
        let Operation::Find(op) = &spec.operation else {
            panic!("expected Find");
        };
        let keys: Vec<(String, Ordering)> = op
            .sorts
            .iter()
            .map(|sort| (sort.field.reference_name(), sort.ordering))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Age".to_string(), Ordering::Ascending),
                ("Gender".to_string(), Ordering::Descending)
            ]
        );
        assert!(op.query.is_match_all());
    });
}

#[test]
fn test_update_operator_without_field_rejected() {
    let err = parse_err(&method(
        "UpdateIncByID",
        vec![simple("int"), simple("string")],
        vec![simple("bool"), TypeDescriptor::error()],
    ));
    assert_eq!(err, ParseError::InvalidUpdateFields { fields: "Inc".into() });
}

#[test]
fn test_top_without_digits_rejected() {
    let err = parse_err(&method("FindTopByAge", vec![simple("int")], many()));
    assert_eq!(err, ParseError::InvalidLimit { token: "Top".into() });
}

// ========================================
// Semantic errors
// ========================================

#[test]
fn test_unknown_field() {
    let err = parse_err(&method("FindByCity", vec![simple("string")], many()));
    assert_eq!(err, ParseError::StructFieldNotFound { field: "City".into() });
    assert!(!err.is_grammar());
}

#[test]
fn test_missing_context() {
    let m = MethodModel {
        name: "FindByAge".into(),
        params: vec![simple("int")],
        returns: many(),
    };
    let err = parse_err(&m);
    assert_eq!(err, ParseError::ContextParamRequired);
    assert_eq!(code(&err), "repogen::semantic::context_param_required");
}

#[test]
fn test_missing_context_reported_before_unknown_field() {
    let m = MethodModel {
        name: "FindByCity".into(),
        params: vec![simple("string")],
        returns: many(),
    };
    assert_eq!(parse_err(&m), ParseError::ContextParamRequired);
}

#[test]
fn test_missing_context_reported_before_update_model_check() {
    let m = MethodModel {
        name: "UpdateByID".into(),
        params: vec![TypeDescriptor::pointer(simple("UserModel")), simple("string")],
        returns: vec![simple("bool"), TypeDescriptor::error()],
    };
    assert_eq!(parse_err(&m), ParseError::ContextParamRequired);
}

#[test]
fn test_wrong_param_type() {
    let err = parse_err(&method("FindByAge", vec![simple("string")], many()));
    assert_eq!(err.to_string(), "invalid parameter: parameter 1 should be int, found string");
}

#[test]
fn test_incompatible_update_operator() {
    let err = parse_err(&method(
        "UpdateGenderIncByID",
        vec![simple("Gender"), simple("string")],
        vec![simple("bool"), TypeDescriptor::error()],
    ));
    assert_eq!(code(&err), "repogen::semantic::incompatible_update_operator");
}

#[test]
fn test_unsupported_return() {
    let err = parse_err(&method("DeleteByID", vec![simple("string")], one()));
    assert_eq!(
        err,
        ParseError::UnsupportedReturn {
            operation: "Delete".into(),
            returns: "*UserModel, error".into()
        }
    );
}
