//! IR statement definitions

use super::{Block, Expr, Line, glue, glue_all, nest, single};

/// An IR statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `var name ty`
    Declare { name: String, ty: String },

    /// `a, b := value`
    DeclareAssign { names: Vec<String>, value: Expr },

    /// `a = value`
    Assign { names: Vec<String>, value: Expr },

    /// `return a, b`
    Return(Vec<Expr>),

    /// `if init; cond { body }`
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: Vec<Stmt>,
    },

    /// `for key, value := range iterable { body }`
    ForRange {
        key: String,
        value: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn declare_assign(names: &[&str], value: Expr) -> Self {
        Stmt::DeclareAssign {
            names: names.iter().map(|n| n.to_string()).collect(),
            value,
        }
    }

    pub fn assign(names: &[&str], value: Expr) -> Self {
        Stmt::Assign {
            names: names.iter().map(|n| n.to_string()).collect(),
            value,
        }
    }

    pub fn lines(&self) -> Block {
        match self {
            Stmt::Declare { name, ty } => single(format!("var {name} {ty}")),
            Stmt::DeclareAssign { names, value } => glue(single(names.join(", ")), value.lines(), " := "),
            Stmt::Assign { names, value } => glue(single(names.join(", ")), value.lines(), " = "),
            Stmt::Return(values) if values.is_empty() => single("return"),
            Stmt::Return(values) => glue(single("return"), glue_all(values.iter().map(Expr::lines), ", "), " "),
            Stmt::If { init, cond, body } => {
                let header = match init {
                    Some(init) => glue(glue(single("if"), init.lines(), " "), cond.lines(), "; "),
                    None => glue(single("if"), cond.lines(), " "),
                };
                block(header, body)
            }
            Stmt::ForRange {
                key,
                value,
                iterable,
                body,
            } => {
                let header = glue(single(format!("for {key}, {value} := range")), iterable.lines(), " ");
                block(header, body)
            }
        }
    }
}

/// `header {`, the body one level deeper, `}`.
pub(crate) fn block(header: Block, body: &[Stmt]) -> Block {
    let mut out = glue(header, single("{"), " ");
    for stmt in body {
        out.extend(nest(stmt.lines(), 1));
    }
    out.push(Line::new("}"));
    out
}
