//! Merge per-file declarations into one package model.
//!
//! A package may be spread across several files. The builder checks that they agree on the package name and that no
//! struct or interface is declared twice.

use miette::Diagnostic;
use thiserror::Error;

use super::{SourceFile, SourceModel};

/// Errors raised while assembling the structural model.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("ambiguous package name: source files declare both '{first}' and '{second}'")]
    #[diagnostic(
        code(repogen::model::ambiguous_package_name),
        help("All files passed in one run must belong to the same package.")
    )]
    AmbiguousPackageName { first: String, second: String },

    #[error("struct '{name}' is declared more than once")]
    #[diagnostic(code(repogen::model::duplicate_struct))]
    DuplicateStruct { name: String },

    #[error("interface '{name}' is declared more than once")]
    #[diagnostic(code(repogen::model::duplicate_interface))]
    DuplicateInterface { name: String },

    #[error("struct '{name}' not found")]
    #[diagnostic(code(repogen::model::struct_not_found))]
    StructNotFound { name: String },

    #[error("interface '{name}' not found")]
    #[diagnostic(code(repogen::model::interface_not_found))]
    InterfaceNotFound { name: String },
}

/// Accumulates [`SourceFile`]s and produces a [`SourceModel`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: SourceModel,
    package_seen: bool,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the declarations of one file.
    ///
    /// ## Errors
    /// - [`ModelError::AmbiguousPackageName`] if the file's package differs from earlier files.
    /// - [`ModelError::DuplicateStruct`] / [`ModelError::DuplicateInterface`] on a repeated declaration name.
    pub fn add_file(&mut self, file: SourceFile) -> Result<&mut Self, ModelError> {
        if !self.package_seen {
            self.model.package = file.package;
            self.package_seen = true;
        } else if self.model.package != file.package {
            return Err(ModelError::AmbiguousPackageName {
                first: self.model.package.clone(),
                second: file.package,
            });
        }

        for structure in file.structs {
            if self.model.find_struct(&structure.name).is_some() {
                return Err(ModelError::DuplicateStruct { name: structure.name });
            }
            self.model.structs.push(structure);
        }
        for interface in file.interfaces {
            if self.model.find_interface(&interface.name).is_some() {
                return Err(ModelError::DuplicateInterface { name: interface.name });
            }
            self.model.interfaces.push(interface);
        }
        for named in file.named_types {
            if self.model.find_named_type(&named.name).is_none() {
                self.model.named_types.push(named);
            }
        }
        for import in file.imports {
            if !self.model.imports.contains(&import) {
                self.model.imports.push(import);
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SourceModel {
        self.model
    }
}

impl SourceModel {
    /// Build a model from a set of files in one go.
    pub fn from_files(files: impl IntoIterator<Item = SourceFile>) -> Result<Self, ModelError> {
        let mut builder = ModelBuilder::new();
        for file in files {
            builder.add_file(file)?;
        }
        Ok(builder.build())
    }
}
