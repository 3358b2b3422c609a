//! The Tabular Syntax Tree (TST): the spreadsheet-shaped input of the compiler.
//!
//! Ingestion turns the cells of a workbook into a tree of operators, grids
//! and named collections, and interprets every column header into a
//! [`Header`]. This crate only defines that tree; it does no parsing of cell
//! text itself. Trees can be (de)serialized with `serde`, which is how the
//! command-line tool receives them.
//!
//! ```text
//! Collection "Sheet1"
//! └── Op(Assign "verb")           verb = table:
//!     └── child: Op(Table)          text   | gloss
//!         └── child: Grid           run    | run
//!                                   walk   | walk
//! ```

pub mod ast;

pub use ast::{
    Cell, Header, Operator, TstCollection, TstGrid, TstHeader, TstNode, TstOp, TstRow,
};
