use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur when loading `gramble.toml`.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Error reading configuration {path}: {reason}")]
    #[diagnostic(
        code("CONFIG-001"),
        help("Check file permissions and ensure the file is not corrupted")
    )]
    Read { path: PathBuf, reason: String },

    /// The configuration file is not valid TOML or has unexpected keys.
    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Check your gramble.toml syntax; only the [compile] table is recognized")
    )]
    Parse(String),
}

// Conversion from toml::de::Error to ConfigError
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// A pass received a tree it was never designed for.
///
/// These indicate a pipeline ordering bug rather than bad user input, so
/// unlike `Message`s they stop the compilation run.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("Internal error: pass `{pass}` cannot handle {node} nodes")]
    #[diagnostic(code(gramble::internal::unsupported_node))]
    UnsupportedNode { pass: &'static str, node: String },

    #[error("Internal error: pass `{pass}` found a nested collection; names must be qualified first")]
    #[diagnostic(code(gramble::internal::unflattened_collection))]
    UnflattenedCollection { pass: &'static str },
}
