//! Source positions, diagnostics and configuration for the Gramble compiler.
//!
//! This crate is responsible for:
//! - Identifying spreadsheet cells (`CellPos`) so that every diagnostic can be
//!   mapped back onto the sheet the author is editing
//! - The structured message system (`Message`, `MessageKind`, `Severity`)
//!   that passes use to report problems without aborting the compilation
//! - Fatal internal errors (`InternalError`) raised when a pass receives a
//!   tree shape it was never designed to handle
//! - Loading the `gramble.toml` configuration (`CompileConfig`)
//!
//! ## Diagnostics
//!
//! Messages are collected as data. Every `MessageKind` derives
//! `miette::Diagnostic`, so a host can render them with source context, while
//! editor integrations only need the `(sheet, row, col, text, severity)`
//! tuple exposed by `Message`.

mod config;
mod diagnostic;
mod error;

pub use config::{CompileConfig, CompileSection, PassOptions, CONFIG_FILE_NAME};
pub use diagnostic::{CellPos, Message, MessageKind, Severity};
pub use error::{ConfigError, InternalError};

/// Name of the default alternation synthesized for every collection.
pub const ALL_SYMBOL: &str = ".all";

/// The anonymous tape that `SingleTape` binds to a concrete name.
pub const DEFAULT_TAPE: &str = ".T";

/// Separator between the segments of a qualified symbol name.
pub const QUALIFIER_SEPARATOR: char = '.';

/// Appends `name` to the qualified prefix `scope`.
///
/// The separator is always inserted, so a synthesized name such as `.all`
/// keeps its leading dot: the default of `Verbs` is `Verbs..all`, which no
/// member named `all` (qualified as `Verbs.all`) can collide with.
pub fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        return name.to_string();
    }
    let mut qualified = String::with_capacity(scope.len() + 1 + name.len());
    qualified.push_str(scope);
    qualified.push(QUALIFIER_SEPARATOR);
    qualified.push_str(name);
    qualified
}
