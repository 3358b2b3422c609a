//! Structured messages produced while compiling a grammar.
//!
//! Passes never throw on bad user input. They push a `Message` onto the
//! environment, patch the tree locally and keep going, so that a host editor
//! can display every problem found in one run.
//!
//! ## Miette Integration
//!
//! `MessageKind` derives `miette::Diagnostic`. Its severity comes from the
//! `#[diagnostic(severity(...))]` attribute of each variant; variants without
//! the attribute are errors. `Message` delegates to its kind so it can be
//! handed to `miette::Report` directly.

use std::fmt;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The location of a single spreadsheet cell.
///
/// Rows and columns are zero-based, matching the coordinates the ingestion
/// stage assigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub sheet: String,
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(sheet: impl Into<String>, row: usize, col: usize) -> Self {
        Self { sheet: sheet.into(), row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.sheet, self.row, self.col)
    }
}

/// How serious a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl From<miette::Severity> for Severity {
    fn from(severity: miette::Severity) -> Self {
        match severity {
            miette::Severity::Error => Severity::Error,
            miette::Severity::Warning => Severity::Warning,
            miette::Severity::Advice => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

/// Every diagnostic the compiler can attach to a cell.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// A column under a test operator is not a plain tape column.
    #[error("Invalid test header: `{header}` is not a literal header")]
    #[diagnostic(
        code(gramble::non_literal_test_header),
        help("Test content can only contain tape columns (optionally marked unique); this column has been ignored")
    )]
    NonLiteralTestHeader { header: String },

    /// A grid appeared where an operator was expected and was wrapped in a table.
    #[error("Implicit table: the grid under `{op}` is treated as a table")]
    #[diagnostic(code(gramble::implicit_table), severity(Advice))]
    ImplicitTable { op: String },

    /// A table has no grid, or a grid has no rows.
    #[error("Empty table: this table has no content")]
    #[diagnostic(code(gramble::empty_table), severity(Warning))]
    EmptyTable,

    /// Content that is not part of any symbol definition.
    #[error("Unassigned content: this content is not assigned to a symbol and will be ignored")]
    #[diagnostic(
        code(gramble::unassigned_content),
        severity(Warning),
        help("Start the block with `name =` to define a symbol")
    )]
    UnassignedContent,

    /// A collection used as an operand instead of being assigned to a symbol.
    #[error("Misplaced collection: `{name}` cannot be used inside an expression and will be ignored")]
    #[diagnostic(
        code(gramble::misplaced_collection),
        severity(Warning),
        help("Assign the collection to a symbol with `name =` and embed that symbol instead")
    )]
    MisplacedCollection { name: String },

    /// A test operator with nothing to test.
    #[error("Missing test target: there is no grammar before this `{op}`")]
    #[diagnostic(code(gramble::missing_test_target), severity(Warning))]
    MissingTestTarget { op: String },

    /// The same value appears twice in a column marked unique.
    #[error("Duplicate value: `{value}` appears more than once in unique column `{header}`")]
    #[diagnostic(code(gramble::duplicate_unique_value), severity(Warning))]
    DuplicateUniqueValue { header: String, value: String },

    /// Two definitions share a (case-insensitive) name in one collection.
    #[error("Duplicate symbol: `{name}` is already defined in this collection")]
    #[diagnostic(
        code(gramble::duplicate_symbol),
        help("Symbol names are case-insensitive; the first definition is used")
    )]
    DuplicateSymbol { name: String },

    /// An embed whose name matches no symbol in any enclosing scope.
    #[error("Unknown symbol: cannot find `{name}`")]
    #[diagnostic(code(gramble::unresolved_symbol), help("Is `{name}` defined in this sheet or an enclosing one?"))]
    UnresolvedSymbol { name: String },

    /// Two definitions flatten to the same qualified name.
    #[error("Ambiguous symbol: `{name}` is defined more than once after qualification")]
    #[diagnostic(code(gramble::ambiguous_symbol))]
    AmbiguousSymbol { name: String },

    /// A chain of embeds that leads back to itself.
    #[error("Recursive embed: `{symbol}` refers to itself through {cycle}")]
    #[diagnostic(
        code(gramble::recursive_embed),
        help("The symbol has been replaced by an empty grammar")
    )]
    RecursiveEmbed { symbol: String, cycle: String },

    /// A rename whose source tape does not occur in the renamed grammar.
    #[error("Invalid rename: cannot rename `{from}` to `{to}`, the grammar has no tape `{from}`")]
    #[diagnostic(code(gramble::rename_missing_tape))]
    RenameMissingTape { from: String, to: String },
}

impl MessageKind {
    /// The severity declared for this kind.
    pub fn level(&self) -> Severity {
        Diagnostic::severity(self)
            .map(Severity::from)
            .unwrap_or(Severity::Error)
    }
}

/// A diagnostic message, optionally tied to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{kind}")]
pub struct Message {
    pub pos: Option<CellPos>,
    pub kind: MessageKind,
}

impl Message {
    pub fn new(kind: MessageKind, pos: Option<CellPos>) -> Self {
        Self { pos, kind }
    }

    pub fn sheet(&self) -> Option<&str> {
        self.pos.as_ref().map(|pos| pos.sheet.as_str())
    }

    pub fn row(&self) -> Option<usize> {
        self.pos.as_ref().map(|pos| pos.row)
    }

    pub fn col(&self) -> Option<usize> {
        self.pos.as_ref().map(|pos| pos.col)
    }

    /// The human-readable message text.
    pub fn text(&self) -> String {
        self.kind.to_string()
    }

    pub fn severity(&self) -> Severity {
        self.kind.level()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl Diagnostic for Message {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.help()
    }

    fn severity(&self) -> Option<miette::Severity> {
        Diagnostic::severity(&self.kind)
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.url()
    }
}
