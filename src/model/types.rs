//! Type descriptors of the structural model.
//!
//! The front end describes every field, parameter, and return type with a [`TypeDescriptor`]. The set is closed and
//! Go-shaped: `*T`, `[]T`, `map[K]V`, `interface{}`, `pkg.Name`, and function types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Go builtin numeric type names.
pub const NUMERIC_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64", "float32", "float64",
    "byte", "rune",
];

/// A type as written in the host source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Builtin or same-package named type (`int`, `UserModel`).
    Simple { name: String },
    /// Type from another package (`context.Context`).
    Qualified { package: String, name: String },
    /// `*T`
    Pointer { inner: Box<TypeDescriptor> },
    /// `[]T`
    Sequence { inner: Box<TypeDescriptor> },
    /// `map[K]V`
    Mapping {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// `interface{}`
    EmptyInterface,
    /// `func(P...) (R...)`
    Func {
        #[serde(default)]
        params: Vec<TypeDescriptor>,
        #[serde(default)]
        returns: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeDescriptor::Simple { name: name.into() }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer { inner: Box::new(inner) }
    }

    pub fn sequence(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence { inner: Box::new(inner) }
    }

    pub fn mapping(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `context.Context`, the type every repository method takes first.
    pub fn context() -> Self {
        Self::qualified("context", "Context")
    }

    /// The builtin `error` type.
    pub fn error() -> Self {
        Self::simple("error")
    }

    /// Name of a `Simple` type, if it is one.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Simple { name } => Some(name),
            _ => None,
        }
    }

    /// Strip any number of pointer indirections.
    pub fn deref(&self) -> &TypeDescriptor {
        let mut ty = self;
        while let TypeDescriptor::Pointer { inner } = ty {
            ty = inner;
        }
        ty
    }

    /// Package qualifiers referenced anywhere in this type.
    pub fn packages(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_packages(&mut out);
        out
    }

    fn collect_packages<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Simple { .. } | TypeDescriptor::EmptyInterface => {}
            TypeDescriptor::Qualified { package, .. } => out.push(package),
            TypeDescriptor::Pointer { inner } | TypeDescriptor::Sequence { inner } => inner.collect_packages(out),
            TypeDescriptor::Mapping { key, value } => {
                key.collect_packages(out);
                value.collect_packages(out);
            }
            TypeDescriptor::Func { params, returns } => {
                for ty in params.iter().chain(returns) {
                    ty.collect_packages(out);
                }
            }
        }
    }
}

/// Renders the type in Go syntax.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Simple { name } => write!(f, "{name}"),
            TypeDescriptor::Qualified { package, name } => write!(f, "{package}.{name}"),
            TypeDescriptor::Pointer { inner } => write!(f, "*{inner}"),
            TypeDescriptor::Sequence { inner } => write!(f, "[]{inner}"),
            TypeDescriptor::Mapping { key, value } => write!(f, "map[{key}]{value}"),
            TypeDescriptor::EmptyInterface => write!(f, "interface{{}}"),
            TypeDescriptor::Func { params, returns } => {
                write!(f, "func(")?;
                write_list(f, params)?;
                write!(f, ")")?;
                match returns.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " {single}"),
                    many => {
                        write!(f, " (")?;
                        write_list(f, many)?;
                        write!(f, ")")
                    }
                }
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[TypeDescriptor]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
