//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use repogen_core::lang::keywords::{self, KeywordId};
use repogen_core::lang::{comparators, update_operators};
use serde::Deserialize;

use crate::backend;
use crate::config::GeneratorConfig;
use crate::frontend::method::{BooleanOperator, Mode, Operation, Ordering, QuerySpec, Update};
use crate::frontend::{MethodSpec, parse_method, tokenizer};
use crate::model::{ModelError, SourceFile, SourceModel};

use super::{CliError, CliResult, ExitCode, ModelArgs};

// ============================================================================
// Model loading
// ============================================================================

/// A model file holds either one source file or all files of a package.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelFile {
    Single(SourceFile),
    Package(Vec<SourceFile>),
}

/// Read and merge the structural model at `path`.
pub fn load_model(path: &Path) -> CliResult<SourceModel> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))?;
    model_from_json(&text).map_err(|e| CliError::failure(format!("Error loading model {}: {}", path.display(), e)))
}

fn model_from_json(text: &str) -> Result<SourceModel, LoadError> {
    let files = match serde_json::from_str::<ModelFile>(text)? {
        ModelFile::Single(file) => vec![file],
        ModelFile::Package(files) => files,
    };
    Ok(SourceModel::from_files(files)?)
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

// ============================================================================
// Commands
// ============================================================================

/// Generate the implementation and print it or write it to `dest`.
pub fn generate(args: &ModelArgs, dest: Option<&Path>, package: Option<String>) -> CliResult<ExitCode> {
    let model = load_model(&args.model)?;
    let mut config = GeneratorConfig::new(&args.struct_name, &args.interface);
    if let Some(package) = package {
        config = config.with_package_name(package);
    }

    let file = backend::generate(&model, &config).map_err(CliError::diagnostic)?;
    let output = file.render(&config);

    match dest {
        Some(dest) => {
            if dest.exists() {
                tracing::warn!(path = %dest.display(), "overwriting existing file");
            }
            if let Some(parent) = dest.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| {
                        CliError::failure(format!("Error creating directory {}: {}", parent.display(), e))
                    })?;
                }
            }
            fs::write(dest, output)
                .map_err(|e| CliError::failure(format!("Error writing {}: {}", dest.display(), e)))?;
            tracing::info!(path = %dest.display(), "wrote repository implementation");
        }
        None => print!("{output}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the tokens of a method name, one per line.
pub fn tokens(ident: &str, explain: bool) -> CliResult<ExitCode> {
    for token in tokenizer::tokenize(ident) {
        if explain {
            print!("{}", explain_token(token));
        } else {
            println!("{token}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse every method of the interface and print what each one means.
pub fn parse(args: &ModelArgs) -> CliResult<ExitCode> {
    let model = load_model(&args.model)?;
    let structure = model
        .find_struct(&args.struct_name)
        .ok_or_else(|| CliError::diagnostic(ModelError::StructNotFound { name: args.struct_name.clone() }))?;
    let interface = model.find_interface(&args.interface).ok_or_else(|| {
        CliError::diagnostic(ModelError::InterfaceNotFound {
            name: args.interface.clone(),
        })
    })?;

    let mut failed = false;
    for method in &interface.methods {
        match parse_method(&model, structure, method) {
            Ok(spec) => print!("{}", describe(&spec)),
            Err(err) => {
                failed = true;
                eprintln!("{}: {:?}", method.name, miette::Report::new(err));
            }
        }
    }
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

// ============================================================================
// Helpers
// ============================================================================

/// One token with its registry entry, if it has one.
fn explain_token(token: &str) -> String {
    let limit = keywords::split_limit(token)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .map(|_| KeywordId::Top);

    let mut out = String::from(token);
    if let Some(id) = keywords::from_str(token).or(limit) {
        let info = keywords::info_for(id);
        let _ = write!(out, "\t{} keyword: {}", keywords::category(id).as_str(), info.description);
        for example in info.examples {
            let _ = write!(out, "\n\te.g. {}", example.code);
            if let Some(note) = example.note {
                let _ = write!(out, " ({note})");
            }
        }
    } else if let Some(id) = update_operators::from_suffix(token) {
        let _ = write!(out, "\tupdate operator: {}", update_operators::info_for(id).description);
    }
    out.push('\n');
    out
}

/// Human-readable summary of a parsed method.
fn describe(spec: &MethodSpec<'_>) -> String {
    let mut out = String::new();
    let mode = match spec.operation.mode() {
        Some(Mode::One) => " one",
        Some(Mode::Many) => " many",
        None => "",
    };
    let _ = writeln!(out, "{}: {}{}", spec.name, spec.operation.name(), mode);

    if let Operation::Update(op) = &spec.operation {
        match &op.update {
            Update::Model { param_index } => {
                let _ = writeln!(out, "  update: model @{param_index}");
            }
            Update::Fields(fields) => {
                for field in fields {
                    let _ = writeln!(
                        out,
                        "  update: {} {} @{}",
                        field.field,
                        update_operators::as_str(field.operator),
                        field.param_index
                    );
                }
            }
        }
    }
    if let Some(query) = spec.operation.query() {
        describe_query(&mut out, query);
    }
    if let Operation::Find(op) = &spec.operation {
        for sort in &op.sorts {
            let ordering = match sort.ordering {
                Ordering::Ascending => "asc",
                Ordering::Descending => "desc",
            };
            let _ = writeln!(out, "  sort: {} {}", sort.field, ordering);
        }
        if let Some(limit) = op.limit {
            let _ = writeln!(out, "  limit: {limit}");
        }
    }
    out
}

fn describe_query(out: &mut String, query: &QuerySpec<'_>) {
    if query.is_match_all() {
        let _ = writeln!(out, "  query: all");
        return;
    }
    for (i, predicate) in query.predicates.iter().enumerate() {
        let joiner = match (i, query.operator) {
            (0, _) | (_, None) => "query:",
            (_, Some(BooleanOperator::And)) => "  and:",
            (_, Some(BooleanOperator::Or)) => "   or:",
        };
        let _ = write!(
            out,
            "  {} {} {}",
            joiner,
            predicate.field,
            comparators::as_str(predicate.comparator)
        );
        if predicate.arity() > 0 {
            let _ = write!(out, " @{}", predicate.param_index);
        }
        out.push('\n');
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "package": "user",
        "structs": [{
            "name": "UserModel",
            "fields": [
                {"name": "ID", "type": {"kind": "simple", "name": "string"}, "tag": "bson:\"_id\""},
                {"name": "Age", "type": {"kind": "simple", "name": "int"}, "tag": "bson:\"age\""}
            ]
        }],
        "interfaces": [{
            "name": "UserRepository",
            "methods": [{
                "name": "FindByAgeLessThanOrderByAgeDesc",
                "params": [
                    {"kind": "qualified", "package": "context", "name": "Context"},
                    {"kind": "simple", "name": "int"}
                ],
                "returns": [
                    {"kind": "sequence", "inner": {"kind": "pointer", "inner": {"kind": "simple", "name": "UserModel"}}},
                    {"kind": "simple", "name": "error"}
                ]
            }]
        }]
    }"#;

    #[test]
    fn test_model_from_single_file() {
        let model = model_from_json(MODEL).unwrap();
        assert_eq!(model.package, "user");
        assert!(model.find_struct("UserModel").is_some());
    }

    #[test]
    fn test_model_from_package_array() {
        let json = format!("[{MODEL}, {{\"package\": \"user\"}}]");
        let model = model_from_json(&json).unwrap();
        assert!(model.find_interface("UserRepository").is_some());
    }

    #[test]
    fn test_model_package_mismatch() {
        let json = format!("[{MODEL}, {{\"package\": \"order\"}}]");
        assert!(matches!(model_from_json(&json), Err(LoadError::Model(_))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(model_from_json("{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_explain_keywords_and_operators() {
        assert_eq!(explain_token("Age"), "Age\n");
        assert_eq!(explain_token("Inc"), "Inc\tupdate operator: Add the parameter to a numeric field.\n");
        assert_eq!(explain_token("Desc"), "Desc\tsort keyword: Sort a key in descending order.\n");
        assert!(explain_token("Top5").starts_with("Top5\tlimit keyword: "));
        assert_eq!(explain_token("Topic"), "Topic\n");

        let update = explain_token("Update");
        assert!(update.starts_with("Update\toperation keyword: "));
        assert!(update.contains("\te.g. UpdateAgeIncByID("));
        assert!(update.contains("(Increments `age` on the document whose id matches.)"));
    }

    #[test]
    fn test_describe_find() {
        let model = model_from_json(MODEL).unwrap();
        let structure = model.find_struct("UserModel").unwrap();
        let method = &model.find_interface("UserRepository").unwrap().methods[0];
        let spec = parse_method(&model, structure, method).unwrap();
        assert_eq!(
            describe(&spec),
            "FindByAgeLessThanOrderByAgeDesc: Find many\n  query: Age LessThan @1\n  sort: Age desc\n"
        );
    }
}
