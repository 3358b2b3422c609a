use std::path::PathBuf;

use gramble_driver::InternalError;
use gramble_source::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to read file {path}")]
    #[diagnostic(code(gramble::cli::io_error))]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode the syntax tree in {path}")]
    #[diagnostic(
        code(gramble::cli::json_error),
        help("The input must be a JSON-serialized tabular syntax tree")
    )]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Internal(#[from] InternalError),

    #[error("No symbol named `{name}`")]
    #[diagnostic(code(gramble::cli::unknown_symbol), help("Use the qualified name, e.g. `Sheet.symbol`"))]
    UnknownSymbol { name: String },

    #[error("Check failed with {errors} error(s) and {warnings} warning(s)")]
    #[diagnostic(code(gramble::cli::check_failed))]
    CheckFailed { errors: usize, warnings: usize },
}

/// Convert IO errors with context
pub fn convert_io_error(error: std::io::Error, path: PathBuf) -> CliError {
    CliError::IoError { path, source: error }
}
