//! IR declaration definitions

use super::stmt::block;
use super::{Block, Line, Stmt, nest, single};
use crate::model::TypeDescriptor;

/// A named, typed parameter, receiver, or struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), ty }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `func name(params) returns { body }`
    Function {
        name: String,
        params: Vec<Param>,
        returns: Vec<TypeDescriptor>,
        body: Vec<Stmt>,
    },

    /// `func (receiver) name(params) returns { body }`
    Method {
        receiver: Param,
        name: String,
        params: Vec<Param>,
        returns: Vec<TypeDescriptor>,
        body: Vec<Stmt>,
    },

    /// `type name struct { fields }`
    Struct { name: String, fields: Vec<Param> },
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Function { name, .. } | Decl::Method { name, .. } | Decl::Struct { name, .. } => name,
        }
    }

    pub fn lines(&self) -> Block {
        match self {
            Decl::Function {
                name,
                params,
                returns,
                body,
            } => block(single(format!("func {name}{}", signature(params, returns))), body),
            Decl::Method {
                receiver,
                name,
                params,
                returns,
                body,
            } => block(
                single(format!("func ({receiver}) {name}{}", signature(params, returns))),
                body,
            ),
            Decl::Struct { name, fields } => {
                let mut out = single(format!("type {name} struct {{"));
                for field in fields {
                    out.extend(nest(single(field.to_string()), 1));
                }
                out.push(Line::new("}"));
                out
            }
        }
    }
}

/// `(a A, b B) (R, error)`; a single result is not parenthesized.
fn signature(params: &[Param], returns: &[TypeDescriptor]) -> String {
    let params = params.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    let returns = match returns {
        [] => String::new(),
        [one] => format!(" {one}"),
        many => format!(" ({})", many.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")),
    };
    format!("({params}){returns}")
}
