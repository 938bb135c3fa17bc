//! Structural model of a host source file.
//!
//! The model is produced by an external front end (declaration extraction is not this crate's job) and handed over
//! as plain data, usually JSON. It holds the struct declarations with their fields and serialization tags, the
//! interface declarations with their method signatures, named types, and the file's imports.
//!
//! Everything downstream borrows from the model: a resolved field reference points at the [`FieldDescriptor`] owned
//! here instead of copying it.

mod builder;
mod types;

pub use builder::{ModelBuilder, ModelError};
pub use types::{NUMERIC_TYPES, TypeDescriptor};

use serde::{Deserialize, Serialize};

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Raw struct tag without backquotes, e.g. `bson:"age,omitempty" json:"age"`.
    #[serde(default)]
    pub tag: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor, tag: Option<&str>) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: tag.map(str::to_string),
        }
    }

    /// Value stored under `key` in the struct tag, if present.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        let tag = self.tag.as_deref()?;
        parse_tag(tag).find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Name of the field in the stored document: the `bson` tag up to its first comma.
    ///
    /// ## Returns
    /// - `None` if the tag has no `bson` key, or names the field `-` or the empty string.
    pub fn bson_name(&self) -> Option<&str> {
        let value = self.tag_value("bson")?;
        let name = value.split(',').next().unwrap_or_default();
        if name.is_empty() || name == "-" { None } else { Some(name) }
    }
}

/// Iterate `key:"value"` pairs of a Go struct tag. Malformed trailing input ends the iteration.
fn parse_tag(tag: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = tag;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        let colon = rest.find(':')?;
        let key = &rest[..colon];
        let after = rest[colon + 1..].strip_prefix('"')?;
        let mut escaped = false;
        let end = after.char_indices().find_map(|(i, c)| match c {
            '\\' if !escaped => {
                escaped = true;
                None
            }
            '"' if !escaped => Some(i),
            _ => {
                escaped = false;
                None
            }
        })?;
        rest = &after[end + 1..];
        Some((key, &after[..end]))
    })
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructModel {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl StructModel {
    /// Look up a field by its exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// `*Name`, the shape models are passed in.
    pub fn pointer_type(&self) -> TypeDescriptor {
        TypeDescriptor::pointer(TypeDescriptor::simple(&self.name))
    }
}

/// An interface method signature. Parameter names are irrelevant and not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeDescriptor>,
    #[serde(default)]
    pub returns: Vec<TypeDescriptor>,
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceModel {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
}

/// A named type declaration such as `type Gender string`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub underlying: TypeDescriptor,
}

/// An import of the host file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Import {
    #[serde(default)]
    pub alias: Option<String>,
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    /// Identifier the import is referred to by: the alias, or the last path segment.
    pub fn qualifier(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }
}

/// Declarations extracted from one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub package: String,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub structs: Vec<StructModel>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceModel>,
    #[serde(default)]
    pub named_types: Vec<NamedType>,
}

/// The merged model of one package. Build it with [`ModelBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceModel {
    pub package: String,
    pub imports: Vec<Import>,
    pub structs: Vec<StructModel>,
    pub interfaces: Vec<InterfaceModel>,
    pub named_types: Vec<NamedType>,
}

impl SourceModel {
    pub fn find_struct(&self, name: &str) -> Option<&StructModel> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_interface(&self, name: &str) -> Option<&InterfaceModel> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn find_named_type(&self, name: &str) -> Option<&NamedType> {
        self.named_types.iter().find(|t| t.name == name)
    }

    /// The struct a field type refers to, looking through pointers (`Contact`, `*Contact`).
    pub fn nested_struct(&self, ty: &TypeDescriptor) -> Option<&StructModel> {
        ty.deref().simple_name().and_then(|name| self.find_struct(name))
    }

    /// Resolve pointers and named types down to the type that decides what operations apply.
    ///
    /// ## Notes
    /// - Named type chains are followed at most once per declared named type, so a cyclic declaration terminates.
    pub fn underlying<'a>(&'a self, ty: &'a TypeDescriptor) -> &'a TypeDescriptor {
        let mut current = ty.deref();
        for _ in 0..=self.named_types.len() {
            let Some(named) = current.simple_name().and_then(|name| self.find_named_type(name)) else {
                break;
            };
            current = named.underlying.deref();
        }
        current
    }

    pub fn is_numeric(&self, ty: &TypeDescriptor) -> bool {
        self.underlying(ty)
            .simple_name()
            .is_some_and(|name| NUMERIC_TYPES.contains(&name))
    }

    pub fn is_boolean(&self, ty: &TypeDescriptor) -> bool {
        self.underlying(ty).simple_name() == Some("bool")
    }

    /// Element type of a sequence-typed field.
    pub fn sequence_element<'a>(&'a self, ty: &'a TypeDescriptor) -> Option<&'a TypeDescriptor> {
        match self.underlying(ty) {
            TypeDescriptor::Sequence { inner } => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &str) -> FieldDescriptor {
        FieldDescriptor::new("Age", TypeDescriptor::simple("int"), Some(tag))
    }

    // ========================================
    // Struct tags
    // ========================================

    #[test]
    fn test_tag_value_multiple_keys() {
        let field = tagged(r#"bson:"age,omitempty" json:"years""#);
        assert_eq!(field.tag_value("bson"), Some("age,omitempty"));
        assert_eq!(field.tag_value("json"), Some("years"));
        assert_eq!(field.tag_value("yaml"), None);
    }

    #[test]
    fn test_bson_name_strips_options() {
        assert_eq!(tagged(r#"bson:"age,omitempty""#).bson_name(), Some("age"));
        assert_eq!(tagged(r#"bson:"_id""#).bson_name(), Some("_id"));
    }

    #[test]
    fn test_bson_name_missing_or_skipped() {
        assert_eq!(tagged(r#"json:"age""#).bson_name(), None);
        assert_eq!(tagged(r#"bson:"-""#).bson_name(), None);
        assert_eq!(tagged(r#"bson:",omitempty""#).bson_name(), None);
        assert_eq!(FieldDescriptor::new("Age", TypeDescriptor::simple("int"), None).bson_name(), None);
    }

    #[test]
    fn test_tag_value_with_escaped_quote() {
        let field = tagged(r#"doc:"say \"hi\"" bson:"age""#);
        assert_eq!(field.bson_name(), Some("age"));
    }

    // ========================================
    // Type resolution
    // ========================================

    fn model() -> SourceModel {
        SourceModel {
            package: "user".into(),
            named_types: vec![
                NamedType {
                    name: "Score".into(),
                    underlying: TypeDescriptor::simple("Points"),
                },
                NamedType {
                    name: "Points".into(),
                    underlying: TypeDescriptor::simple("float64"),
                },
                NamedType {
                    name: "Loop".into(),
                    underlying: TypeDescriptor::simple("Loop"),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_underlying_follows_named_chain_and_pointers() {
        let model = model();
        let ty = TypeDescriptor::pointer(TypeDescriptor::simple("Score"));
        assert_eq!(model.underlying(&ty), &TypeDescriptor::simple("float64"));
        assert!(model.is_numeric(&ty));
        assert!(!model.is_boolean(&ty));
    }

    #[test]
    fn test_underlying_terminates_on_cycle() {
        let model = model();
        let ty = TypeDescriptor::simple("Loop");
        assert_eq!(model.underlying(&ty), &TypeDescriptor::simple("Loop"));
    }

    #[test]
    fn test_import_qualifier() {
        assert_eq!(Import::new("go.mongodb.org/mongo-driver/bson/primitive").qualifier(), "primitive");
        let aliased = Import {
            alias: Some("pb".into()),
            path: "example.com/proto".into(),
        };
        assert_eq!(aliased.qualifier(), "pb");
    }
}
