//! Semantic validation of parsed methods.
//!
//! The parser only checks that a name is well formed. This module checks that it agrees with the method signature
//! and the structural model:
//!
//! - the return shape matches the operation (`(T, error)` with an operation-specific `T`);
//! - the first parameter is `context.Context`;
//! - the name consumes exactly the declared parameters;
//! - each comparator and update operator fits its field's type;
//! - each consumed parameter has the type the comparator or operator expects.

use repogen_core::lang::comparators::{self, FieldRule};
use repogen_core::lang::keywords::{self, KeywordId};
use repogen_core::lang::update_operators::{self, OperandRule};

use crate::frontend::diagnostics::ParseError;
use crate::frontend::method::{MethodSpec, Mode, Operation, QuerySpec, Update, UpdateField, argument_types};
use crate::model::{SourceModel, StructModel, TypeDescriptor};

/// Mode implied by a method's return types.
///
/// | operation       | `One`            | `Many`               |
/// |-----------------|------------------|----------------------|
/// | Insert          | `interface{}`    | `[]interface{}`      |
/// | Find            | `*Model`         | `[]*Model`           |
/// | Update / Delete | `bool`           | `int`                |
/// | Count           |                  | `int`                |
///
/// Every shape is followed by a trailing `error`.
///
/// ## Errors
/// - [`ParseError::UnsupportedReturn`] for any other shape.
pub(crate) fn return_mode(
    operation: KeywordId,
    structure: &StructModel,
    returns: &[TypeDescriptor],
) -> Result<Mode, ParseError> {
    let [value, err] = returns else {
        return Err(unsupported_return(operation, returns));
    };
    if *err != TypeDescriptor::error() {
        return Err(unsupported_return(operation, returns));
    }

    let model = structure.pointer_type();
    let int = TypeDescriptor::simple("int");
    let mode = match operation {
        KeywordId::Insert if *value == TypeDescriptor::EmptyInterface => Some(Mode::One),
        KeywordId::Insert if *value == TypeDescriptor::sequence(TypeDescriptor::EmptyInterface) => Some(Mode::Many),
        KeywordId::Find if *value == model => Some(Mode::One),
        KeywordId::Find if *value == TypeDescriptor::sequence(model.clone()) => Some(Mode::Many),
        KeywordId::Update | KeywordId::Delete if *value == TypeDescriptor::simple("bool") => Some(Mode::One),
        KeywordId::Update | KeywordId::Delete | KeywordId::Count if *value == int => Some(Mode::Many),
        _ => None,
    };
    mode.ok_or_else(|| unsupported_return(operation, returns))
}

pub(crate) fn unsupported_return(operation: KeywordId, returns: &[TypeDescriptor]) -> ParseError {
    ParseError::UnsupportedReturn {
        operation: keywords::as_str(operation).to_string(),
        returns: returns.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
    }
}

/// The first parameter of every repository method is `context.Context`.
pub(crate) fn check_context(params: &[TypeDescriptor]) -> Result<(), ParseError> {
    match params.first() {
        Some(first) if *first == TypeDescriptor::context() => Ok(()),
        _ => Err(ParseError::ContextParamRequired),
    }
}

/// Check a parsed method against its signature and the model.
///
/// ## Errors
/// - [`ParseError::ContextParamRequired`] when the first parameter is not `context.Context`.
/// - [`ParseError::InvalidParam`] on a parameter count or type mismatch.
/// - [`ParseError::IncompatibleComparator`] / [`ParseError::IncompatibleUpdateOperator`] when an operator does not
///   fit its field.
pub fn validate_method(model: &SourceModel, structure: &StructModel, spec: &MethodSpec<'_>) -> Result<(), ParseError> {
    check_context(spec.params)?;

    let expected = 1 + match &spec.operation {
        Operation::Insert(_) => 1,
        Operation::Update(op) => op.update.number_of_arguments() + op.query.number_of_arguments(),
        other => other.query().map_or(0, QuerySpec::number_of_arguments),
    };
    if expected != spec.params.len() {
        return Err(ParseError::param_count(expected, spec.params.len()));
    }

    match &spec.operation {
        Operation::Insert(op) => {
            let entity = structure.pointer_type();
            let expected = match op.mode {
                Mode::One => entity,
                Mode::Many => TypeDescriptor::sequence(entity),
            };
            check_param(spec, 1, &expected)?;
        }
        Operation::Update(op) => {
            match &op.update {
                Update::Model { param_index } => check_param(spec, *param_index, &structure.pointer_type())?,
                Update::Fields(fields) => {
                    for field in fields {
                        check_update_field(model, spec, field)?;
                    }
                }
            }
            check_query(model, spec, &op.query)?;
        }
        Operation::Find(op) => check_query(model, spec, &op.query)?,
        Operation::Delete(op) => check_query(model, spec, &op.query)?,
        Operation::Count(op) => check_query(model, spec, &op.query)?,
    }
    Ok(())
}

fn check_query(model: &SourceModel, spec: &MethodSpec<'_>, query: &QuerySpec<'_>) -> Result<(), ParseError> {
    for predicate in &query.predicates {
        let field_type = predicate.field.leaf_type();
        if comparators::field_rule(predicate.comparator) == FieldRule::Boolean && !model.is_boolean(field_type) {
            return Err(ParseError::IncompatibleComparator {
                comparator: comparators::as_str(predicate.comparator).to_string(),
                field: predicate.field.reference_name(),
                field_type: field_type.to_string(),
            });
        }
        for (offset, expected) in argument_types(predicate.comparator, field_type).iter().enumerate() {
            check_param(spec, predicate.param_index + offset, expected)?;
        }
    }
    Ok(())
}

fn check_update_field(model: &SourceModel, spec: &MethodSpec<'_>, field: &UpdateField<'_>) -> Result<(), ParseError> {
    let field_type = field.field.leaf_type();
    let compatible = match update_operators::operand_rule(field.operator) {
        OperandRule::Any => true,
        OperandRule::Sequence => model.sequence_element(field_type).is_some(),
        OperandRule::Numeric => model.is_numeric(field_type),
    };
    let argument = field.argument_type(model).filter(|_| compatible);
    let Some(argument) = argument else {
        return Err(ParseError::IncompatibleUpdateOperator {
            operator: update_operators::as_str(field.operator).to_string(),
            field: field.field.reference_name(),
            field_type: field_type.to_string(),
        });
    };
    check_param(spec, field.param_index, &argument)
}

fn check_param(spec: &MethodSpec<'_>, position: usize, expected: &TypeDescriptor) -> Result<(), ParseError> {
    match spec.params.get(position) {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(ParseError::param_type(position, expected, found)),
        None => Err(ParseError::param_count(position + 1, spec.params.len())),
    }
}
