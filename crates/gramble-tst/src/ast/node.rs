use std::fmt;

use gramble_source::CellPos;
use serde::{Deserialize, Serialize};

use super::common::Cell;
use super::header::TstHeader;

/// A node of the Tabular Syntax Tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TstNode {
    Op(TstOp),
    Grid(TstGrid),
    Collection(TstCollection),
    #[default]
    Empty,
}

impl TstNode {
    pub fn op(cell: Cell, op: Operator, sibling: TstNode, child: TstNode) -> Self {
        TstNode::Op(TstOp {
            cell,
            op,
            sibling: Box::new(sibling),
            child: Box::new(child),
        })
    }

    pub fn grid(grid: TstGrid) -> Self {
        TstNode::Grid(grid)
    }

    pub fn collection(cell: Cell, name: impl Into<String>, children: Vec<TstNode>) -> Self {
        TstNode::Collection(TstCollection {
            cell,
            name: name.into(),
            children,
        })
    }

    /// The cell the node starts at; `Empty` has none.
    pub fn pos(&self) -> Option<&CellPos> {
        match self {
            TstNode::Op(op) => Some(&op.cell.pos),
            TstNode::Grid(grid) => Some(&grid.cell.pos),
            TstNode::Collection(coll) => Some(&coll.cell.pos),
            TstNode::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TstNode::Empty)
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, TstNode::Grid(_))
    }

    /// Short name of the variant, for logs and internal errors.
    pub fn tag(&self) -> &'static str {
        match self {
            TstNode::Op(_) => "op",
            TstNode::Grid(_) => "grid",
            TstNode::Collection(_) => "collection",
            TstNode::Empty => "empty",
        }
    }
}

/// An operator cell with the content before it and its argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TstOp {
    pub cell: Cell,
    pub op: Operator,
    /// Content preceding the operator in the same block.
    #[serde(default)]
    pub sibling: Box<TstNode>,
    /// The operator's argument.
    #[serde(default)]
    pub child: Box<TstNode>,
}

/// The operators a block can start with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Operator {
    /// Read the child grid as a grammar.
    Table,
    /// The child grid holds inputs the sibling grammar must accept.
    Test,
    /// The child grid holds inputs the sibling grammar must reject.
    TestNot,
    /// Alternation of sibling and child.
    Or,
    /// `name = child`.
    Assign { name: String },
}

impl Operator {
    pub fn assign(name: impl Into<String>) -> Self {
        Operator::Assign { name: name.into() }
    }

    /// Whether a grid may appear directly as this operator's child.
    pub fn allows_grid_child(&self) -> bool {
        match self {
            Operator::Table | Operator::Test | Operator::TestNot => true,
            Operator::Or | Operator::Assign { .. } => false,
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Operator::Test | Operator::TestNot)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Table => f.write_str("table"),
            Operator::Test => f.write_str("test"),
            Operator::TestNot => f.write_str("testnot"),
            Operator::Or => f.write_str("or"),
            Operator::Assign { name } => write!(f, "{} =", name),
        }
    }
}

/// A grid of content under a row of headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TstGrid {
    /// The top-left cell of the grid.
    pub cell: Cell,
    pub headers: Vec<TstHeader>,
    #[serde(default)]
    pub rows: Vec<TstRow>,
}

impl TstGrid {
    pub fn new(cell: Cell, headers: Vec<TstHeader>, rows: Vec<TstRow>) -> Self {
        Self { cell, headers, rows }
    }

    /// Removes column `index` from the headers and from every row.
    pub fn remove_column(&mut self, index: usize) {
        if index < self.headers.len() {
            self.headers.remove(index);
        }
        for row in &mut self.rows {
            if index < row.cells.len() {
                row.cells.remove(index);
            }
        }
    }
}

/// One content row; cell `i` sits under header `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TstRow {
    pub pos: CellPos,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl TstRow {
    pub fn new(pos: CellPos, cells: Vec<Cell>) -> Self {
        Self { pos, cells }
    }

    /// The cell under column `index`; a missing cell reads as empty.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index).filter(|cell| !cell.is_blank())
    }
}

/// A named grouping of blocks: a sheet, or a namespace inside one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TstCollection {
    pub cell: Cell,
    pub name: String,
    #[serde(default)]
    pub children: Vec<TstNode>,
}
