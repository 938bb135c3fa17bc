//! Generation orchestrator
//!
//! Runs the per-method pipeline (tokenize → parse → validate → translate) over every method of the repository
//! interface and assembles the output file: the backend's constructor and implementation type, one method per
//! interface method, and a grouped import manifest.
//!
//! ## Notes
//! - Processing is sequential and fail-fast: the first failing method aborts generation, with the method name
//!   attached to the error. No partial file is produced.
//! - The import manifest lists what the generated code refers to; unused-import pruning is left to the formatter run
//!   on the output.

use miette::Diagnostic;
use thiserror::Error;

use super::ir::{Decl, Param};
use super::writer::CodeWriter;
use super::{Backend, MongoBackend, TranslateError, arg_name};
use crate::config::GeneratorConfig;
use crate::frontend::{MethodSpec, ParseError, parse_method};
use crate::model::{Import, MethodModel, ModelError, SourceModel};

/// Why one method could not be generated.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MethodError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Translate(#[from] TranslateError),
}

/// Error produced while generating a file.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error("method '{method}': {source}")]
    #[diagnostic(code(repogen::codegen::method))]
    Method {
        method: String,
        #[diagnostic_source]
        source: MethodError,
    },
}

impl GenerationError {
    fn method(method: &MethodModel, source: impl Into<MethodError>) -> Self {
        GenerationError::Method {
            method: method.name.clone(),
            source: source.into(),
        }
    }
}

/// One block of imports; blocks are separated by a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroup {
    pub imports: Vec<Import>,
}

impl ImportGroup {
    fn add(&mut self, import: Import) {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    fn contains_path(&self, path: &str) -> bool {
        self.imports.iter().any(|import| import.path == path)
    }
}

/// A generated source file, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub header: String,
    pub package: String,
    /// Standard library, driver, then source-file imports. Empty groups are skipped when rendering.
    pub imports: Vec<ImportGroup>,
    pub decls: Vec<Decl>,
}

impl GeneratedFile {
    /// Render the file as text.
    pub fn render(&self, config: &GeneratorConfig) -> String {
        let mut writer = CodeWriter::new(config.indent.as_str());
        if !self.header.is_empty() {
            writer.writeln(&self.header);
            writer.newline();
        }
        writer.writeln(&format!("package {}", self.package));

        let groups: Vec<&ImportGroup> = self.imports.iter().filter(|group| !group.imports.is_empty()).collect();
        if !groups.is_empty() {
            writer.newline();
            writer.writeln("import (");
            writer.indent();
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    writer.newline();
                }
                for import in &group.imports {
                    writer.writeln(&render_import(import));
                }
            }
            writer.dedent();
            writer.writeln(")");
        }

        for decl in &self.decls {
            writer.blank_lines(config.blank_lines_top_level);
            writer.write_block(&decl.lines());
        }
        writer.finish()
    }
}

fn render_import(import: &Import) -> String {
    let path = serde_json::Value::String(import.path.clone()).to_string();
    match &import.alias {
        Some(alias) => format!("{alias} {path}"),
        None => path,
    }
}

/// Generate the repository implementation described by `config` from `model`.
///
/// ## Errors
/// - [`GenerationError::Model`] when the struct or interface is missing.
/// - [`GenerationError::Method`] for the first method that fails to parse, validate, or translate.
#[tracing::instrument(skip_all, fields(interface = %config.interface_name, entity = %config.struct_name))]
pub fn generate(model: &SourceModel, config: &GeneratorConfig) -> Result<GeneratedFile, GenerationError> {
    let structure = model
        .find_struct(&config.struct_name)
        .ok_or_else(|| ModelError::StructNotFound {
            name: config.struct_name.clone(),
        })?;
    let interface = model
        .find_interface(&config.interface_name)
        .ok_or_else(|| ModelError::InterfaceNotFound {
            name: config.interface_name.clone(),
        })?;

    let backend = MongoBackend::new(&structure.name, &interface.name);
    let specs = interface
        .methods
        .iter()
        .map(|method| parse_method(model, structure, method).map_err(|err| GenerationError::method(method, err)))
        .collect::<Result<Vec<_>, _>>()?;

    let file = assemble(&backend, model, config, &specs)?;
    tracing::info!(methods = specs.len(), "generated repository implementation");
    Ok(file)
}

/// Build the file from parsed specs with any backend.
fn assemble(
    backend: &impl Backend,
    model: &SourceModel,
    config: &GeneratorConfig,
    specs: &[MethodSpec<'_>],
) -> Result<GeneratedFile, GenerationError> {
    let mut standard = ImportGroup::default();
    standard.add(Import::new("context"));
    let mut driver = ImportGroup::default();
    for import in backend.base_imports() {
        driver.add(import);
    }
    let mut source = ImportGroup::default();

    let mut decls = backend.declarations();
    let receiver = backend.receiver();
    for spec in specs {
        let body = backend.method_body(spec).map_err(|err| GenerationError::Method {
            method: spec.name.to_string(),
            source: err.into(),
        })?;
        for import in backend.imports(spec) {
            driver.add(import);
        }
        for qualifier in spec.params.iter().chain(spec.returns).flat_map(|ty| ty.packages()) {
            if let Some(import) = model.imports.iter().find(|import| import.qualifier() == qualifier) {
                source.add(import.clone());
            }
        }

        tracing::debug!(method = spec.name, "translated method");
        decls.push(Decl::Method {
            receiver: receiver.clone(),
            name: spec.name.to_string(),
            params: spec
                .params
                .iter()
                .enumerate()
                .map(|(i, ty)| Param::new(arg_name(i), ty.clone()))
                .collect(),
            returns: spec.returns.to_vec(),
            body,
        });
    }

    // A path already imported by an earlier group would be declared twice.
    source
        .imports
        .retain(|import| !standard.contains_path(&import.path) && !driver.contains_path(&import.path));

    Ok(GeneratedFile {
        header: config.header_comment.clone(),
        package: config.package_or(&model.package).to_string(),
        imports: vec![standard, driver, source],
        decls,
    })
}
