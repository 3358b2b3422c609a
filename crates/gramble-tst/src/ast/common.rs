use gramble_source::CellPos;
use serde::{Deserialize, Serialize};

/// The text of one spreadsheet cell and where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub pos: CellPos,
}

impl Cell {
    pub fn new(text: impl Into<String>, pos: CellPos) -> Self {
        Self { text: text.into(), pos }
    }

    /// Whether the cell holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
