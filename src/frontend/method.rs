//! Typed description of a repository method, as understood from its name and signature.
//!
//! A [`MethodSpec`] is built once by the parser, never mutated, and consumed by a backend translator. It borrows from
//! the structural model: field references point at the model's [`FieldDescriptor`]s.

use std::fmt;

use repogen_core::lang::keywords::{self, KeywordId};
use repogen_core::lang::{comparators, update_operators};

use crate::model::{FieldDescriptor, MethodModel, SourceModel, TypeDescriptor};

pub use repogen_core::lang::comparators::ComparatorId as Comparator;
pub use repogen_core::lang::update_operators::UpdateOperatorId as UpdateOperator;

/// Resolved root-to-leaf path of struct fields (`Contact.Phone`). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference<'m> {
    chain: Vec<&'m FieldDescriptor>,
}

impl<'m> FieldReference<'m> {
    /// Build a reference from a chain of fields.
    ///
    /// ## Returns
    /// - `None` if `chain` is empty.
    pub fn new(chain: Vec<&'m FieldDescriptor>) -> Option<Self> {
        if chain.is_empty() { None } else { Some(Self { chain }) }
    }

    pub fn fields(&self) -> &[&'m FieldDescriptor] {
        &self.chain
    }

    /// The last field of the chain; its type is the type being compared or updated.
    pub fn leaf(&self) -> &'m FieldDescriptor {
        // The chain is non-empty by construction.
        self.chain[self.chain.len() - 1]
    }

    pub fn leaf_type(&self) -> &'m TypeDescriptor {
        &self.leaf().ty
    }

    /// Dotted Go field path, e.g. `Contact.Phone`.
    pub fn reference_name(&self) -> String {
        self.chain.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for FieldReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_name())
    }
}

/// Argument types a comparator consumes for a field of type `field`, in parameter order.
pub fn argument_types(comparator: Comparator, field: &TypeDescriptor) -> Vec<TypeDescriptor> {
    let ty = match comparators::argument_rule(comparator) {
        comparators::ArgumentRule::Identity => field.clone(),
        comparators::ArgumentRule::Sequence => TypeDescriptor::sequence(field.clone()),
    };
    vec![ty; comparators::arity(comparator)]
}

/// How predicates of one query combine. A query never mixes both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
}

/// One condition on one field.
///
/// `param_index` is the first of `arity(comparator)` consecutive method parameters the predicate consumes. For
/// zero-arity comparators it is where the predicate *would* read, and consumes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate<'m> {
    pub field: FieldReference<'m>,
    pub comparator: Comparator,
    pub param_index: usize,
}

impl Predicate<'_> {
    pub fn arity(&self) -> usize {
        comparators::arity(self.comparator)
    }
}

/// A whole query: predicates in source order and the operator joining them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec<'m> {
    /// `None` when there is at most one predicate.
    pub operator: Option<BooleanOperator>,
    pub predicates: Vec<Predicate<'m>>,
}

impl QuerySpec<'_> {
    /// A query with no predicates matches every document.
    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Total parameters consumed by all predicates.
    pub fn number_of_arguments(&self) -> usize {
        self.predicates.iter().map(Predicate::arity).sum()
    }
}

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<'m> {
    pub field: FieldReference<'m>,
    pub ordering: Ordering,
}

/// One field to update, with the parameter that supplies the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateField<'m> {
    pub field: FieldReference<'m>,
    pub operator: UpdateOperator,
    pub param_index: usize,
}

impl UpdateField<'_> {
    /// The type the parameter must have.
    ///
    /// ## Returns
    /// - `None` when the operator cannot apply to the field (a `Push` onto a non-sequence).
    pub fn argument_type(&self, model: &SourceModel) -> Option<TypeDescriptor> {
        match update_operators::operand_rule(self.operator) {
            update_operators::OperandRule::Sequence => model.sequence_element(self.field.leaf_type()).cloned(),
            update_operators::OperandRule::Any | update_operators::OperandRule::Numeric => {
                Some(self.field.leaf_type().clone())
            }
        }
    }
}

/// What an update writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update<'m> {
    /// Replace the stored fields with the model passed at `param_index`.
    Model { param_index: usize },
    /// Apply individual field updates, in source order.
    Fields(Vec<UpdateField<'m>>),
}

impl Update<'_> {
    pub fn number_of_arguments(&self) -> usize {
        match self {
            Update::Model { .. } => 1,
            Update::Fields(fields) => fields.len(),
        }
    }
}

/// Whether an operation targets one document or many, derived from the return shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    One,
    Many,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOperation {
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOperation<'m> {
    pub mode: Mode,
    pub query: QuerySpec<'m>,
    pub sorts: Vec<Sort<'m>>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOperation<'m> {
    pub update: Update<'m>,
    pub mode: Mode,
    pub query: QuerySpec<'m>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOperation<'m> {
    pub mode: Mode,
    pub query: QuerySpec<'m>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOperation<'m> {
    pub query: QuerySpec<'m>,
}

/// The closed set of operations a method name can encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'m> {
    Insert(InsertOperation),
    Find(FindOperation<'m>),
    Update(UpdateOperation<'m>),
    Delete(DeleteOperation<'m>),
    Count(CountOperation<'m>),
}

impl<'m> Operation<'m> {
    /// The keyword that selects this operation.
    pub fn keyword(&self) -> KeywordId {
        match self {
            Operation::Insert(_) => KeywordId::Insert,
            Operation::Find(_) => KeywordId::Find,
            Operation::Update(_) => KeywordId::Update,
            Operation::Delete(_) => KeywordId::Delete,
            Operation::Count(_) => KeywordId::Count,
        }
    }

    /// Operation keyword, as spelled in method names.
    pub fn name(&self) -> &'static str {
        keywords::as_str(self.keyword())
    }

    /// The query, for operations that have one.
    pub fn query(&self) -> Option<&QuerySpec<'m>> {
        match self {
            Operation::Insert(_) => None,
            Operation::Find(op) => Some(&op.query),
            Operation::Update(op) => Some(&op.query),
            Operation::Delete(op) => Some(&op.query),
            Operation::Count(op) => Some(&op.query),
        }
    }

    /// `None` for `Count`, which always returns a number.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Operation::Insert(op) => Some(op.mode),
            Operation::Find(op) => Some(op.mode),
            Operation::Update(op) => Some(op.mode),
            Operation::Delete(op) => Some(op.mode),
            Operation::Count(_) => None,
        }
    }
}

/// A fully parsed and validated repository method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec<'m> {
    pub name: &'m str,
    pub params: &'m [TypeDescriptor],
    pub returns: &'m [TypeDescriptor],
    pub operation: Operation<'m>,
}

impl<'m> MethodSpec<'m> {
    pub fn new(method: &'m MethodModel, operation: Operation<'m>) -> Self {
        Self {
            name: &method.name,
            params: &method.params,
            returns: &method.returns,
            operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_types_follow_rule() {
        let int = TypeDescriptor::simple("int");
        assert_eq!(argument_types(Comparator::Equal, &int), vec![int.clone()]);
        assert_eq!(argument_types(Comparator::Between, &int), vec![int.clone(), int.clone()]);
        assert_eq!(argument_types(Comparator::NotIn, &int), vec![TypeDescriptor::sequence(int.clone())]);
        assert!(argument_types(Comparator::Exists, &int).is_empty());
    }

    #[test]
    fn test_operation_name_round_trips_through_keywords() {
        let operations = [
            Operation::Insert(InsertOperation { mode: Mode::One }),
            Operation::Count(CountOperation {
                query: QuerySpec::default(),
            }),
        ];
        for operation in operations {
            assert_eq!(keywords::from_str(operation.name()), Some(operation.keyword()));
        }
        assert_eq!(Operation::Insert(InsertOperation { mode: Mode::Many }).name(), "Insert");
    }

    #[test]
    fn test_field_reference_requires_fields() {
        assert!(FieldReference::new(vec![]).is_none());
        let contact = FieldDescriptor::new("Contact", TypeDescriptor::simple("Contact"), None);
        let phone = FieldDescriptor::new("Phone", TypeDescriptor::simple("string"), None);
        let reference = FieldReference::new(vec![&contact, &phone]).unwrap();
        assert_eq!(reference.to_string(), "Contact.Phone");
        assert_eq!(reference.leaf().name, "Phone");
    }

    #[test]
    fn test_query_argument_count() {
        let age = FieldDescriptor::new("Age", TypeDescriptor::simple("int"), None);
        let field = FieldReference::new(vec![&age]).unwrap();
        let query = QuerySpec {
            operator: Some(BooleanOperator::And),
            predicates: vec![
                Predicate {
                    field: field.clone(),
                    comparator: Comparator::Between,
                    param_index: 1,
                },
                Predicate {
                    field: field.clone(),
                    comparator: Comparator::Exists,
                    param_index: 3,
                },
                Predicate {
                    field,
                    comparator: Comparator::In,
                    param_index: 3,
                },
            ],
        };
        assert_eq!(query.number_of_arguments(), 3);
        assert!(!query.is_match_all());
    }
}
