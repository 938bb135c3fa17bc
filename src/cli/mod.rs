//! CLI module for repogen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate --model <file> --struct <Name> --interface <Name>` - Generate the repository implementation
//! - `tokens [--explain] <identifier>` - Print the tokens of a method name (debug)
//! - `parse --model <file> --struct <Name> --interface <Name>` - Print each parsed method (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//! All file I/O of the tool happens here; the library core performs none.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a library diagnostic (code, message, help) as a failure.
    pub fn diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate MongoDB repository implementations from method names
#[derive(Parser, Debug)]
#[command(name = "repogen")]
#[command(version = VERSION)]
#[command(about = "Generate MongoDB repository implementations from method names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options naming the model file and the struct/interface pair.
#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Structural model (JSON: one source file or an array of files of one package)
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,
    /// Entity struct stored by the repository
    #[arg(long = "struct", value_name = "NAME")]
    pub struct_name: String,
    /// Repository interface to implement
    #[arg(long, value_name = "NAME")]
    pub interface: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the repository implementation
    Generate {
        #[command(flatten)]
        model: ModelArgs,
        /// Output file (default: stdout)
        #[arg(long, value_name = "FILE")]
        dest: Option<PathBuf>,
        /// Package of the generated file (default: the model's package)
        #[arg(long, value_name = "NAME")]
        package: Option<String>,
    },

    /// Print the tokens of a method name (debug)
    Tokens {
        /// Method name to tokenize
        #[arg(value_name = "IDENT")]
        ident: String,
        /// Describe grammar keywords and update operators next to their tokens
        #[arg(long)]
        explain: bool,
    },

    /// Print each parsed method of an interface (debug)
    Parse {
        #[command(flatten)]
        model: ModelArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate { model, dest, package } => commands::generate(&model, dest.as_deref(), package),
        Command::Tokens { ident, explain } => commands::tokens(&ident, explain),
        Command::Parse { model } => commands::parse(&model),
    }
}

// ============================================================================
// Tests
// ============================================================================
