//! MongoDB backend
//!
//! Targets the official Go driver (`go.mongodb.org/mongo-driver`). The generated implementation type wraps a
//! `*mongo.Collection`; every method translates its query into a `bson.M` filter and calls the matching collection
//! operation.
//!
//! - `filter.rs` - query filters and document paths
//! - `update.rs` - `$set` / `$push` / `$inc` documents
//! - `sort.rs` - `bson.D` sort documents
//! - `body.rs` - method bodies per operation

mod body;
pub mod filter;
pub mod sort;
pub mod update;

use crate::backend::ir::{Decl, Expr, Param, Stmt};
use crate::backend::{Backend, TranslateError, arg_name};
use crate::frontend::MethodSpec;
use crate::frontend::method::Operation;
use crate::model::{Import, TypeDescriptor};

pub const BSON_IMPORT: &str = "go.mongodb.org/mongo-driver/bson";
pub const MONGO_IMPORT: &str = "go.mongodb.org/mongo-driver/mongo";
pub const OPTIONS_IMPORT: &str = "go.mongodb.org/mongo-driver/mongo/options";

pub(crate) const BSON_M: &str = "bson.M";
pub(crate) const BSON_D: &str = "bson.D";

/// Name of the receiver of generated methods.
const RECEIVER: &str = "r";
/// Field of the implementation type holding the collection.
const COLLECTION: &str = "collection";

pub(crate) fn arg(index: usize) -> Expr {
    Expr::ident(arg_name(index))
}

/// MongoDB implementation of one repository interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoBackend {
    entity: String,
    interface: String,
}

impl MongoBackend {
    /// ## Parameters
    /// - `entity`: Name of the stored struct (`UserModel`).
    /// - `interface`: Name of the repository interface (`UserRepository`).
    pub fn new(entity: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            interface: interface.into(),
        }
    }

    /// `UserRepositoryMongo`
    pub fn implementation_name(&self) -> String {
        format!("{}Mongo", self.interface)
    }

    /// `NewUserRepository`
    pub fn constructor_name(&self) -> String {
        format!("New{}", self.interface)
    }

    fn entity_type(&self) -> TypeDescriptor {
        TypeDescriptor::simple(&self.entity)
    }

    fn collection_type() -> TypeDescriptor {
        TypeDescriptor::pointer(TypeDescriptor::qualified("mongo", "Collection"))
    }
}

impl Backend for MongoBackend {
    fn declarations(&self) -> Vec<Decl> {
        let implementation = self.implementation_name();
        let constructor = Decl::Function {
            name: self.constructor_name(),
            params: vec![Param::new(COLLECTION, Self::collection_type())],
            returns: vec![TypeDescriptor::simple(&self.interface)],
            body: vec![Stmt::Return(vec![Expr::Struct {
                ty: format!("&{implementation}"),
                fields: vec![(COLLECTION.to_string(), Expr::ident(COLLECTION))],
            }])],
        };
        let implementation = Decl::Struct {
            name: implementation,
            fields: vec![Param::new(COLLECTION, Self::collection_type())],
        };
        vec![constructor, implementation]
    }

    fn receiver(&self) -> Param {
        Param::new(
            RECEIVER,
            TypeDescriptor::pointer(TypeDescriptor::simple(self.implementation_name())),
        )
    }

    fn base_imports(&self) -> Vec<Import> {
        vec![Import::new(MONGO_IMPORT)]
    }

    fn imports(&self, spec: &MethodSpec<'_>) -> Vec<Import> {
        match &spec.operation {
            Operation::Insert(_) => vec![],
            Operation::Find(op) if !op.sorts.is_empty() || op.limit.is_some() => {
                vec![Import::new(BSON_IMPORT), Import::new(OPTIONS_IMPORT)]
            }
            Operation::Find(_) | Operation::Update(_) | Operation::Delete(_) | Operation::Count(_) => {
                vec![Import::new(BSON_IMPORT)]
            }
        }
    }

    fn method_body(&self, spec: &MethodSpec<'_>) -> Result<Vec<Stmt>, TranslateError> {
        body::method_body(self, spec)
    }
}
