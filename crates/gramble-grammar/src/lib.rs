//! The Grammar IR: the tagged syntax tree a spreadsheet grammar compiles to.
//!
//! Nodes are immutable values. Passes rebuild trees instead of mutating them,
//! and the only derived data a node ever gains is its tape set, written once
//! by tape calculation.

pub mod grammar;
pub mod symbols;
pub mod tapes;
pub mod text;

pub use grammar::{Grammar, GrammarKind};
pub use symbols::{SymbolEntry, SymbolMap};
pub use tapes::TapeSet;
pub use text::{parse_grammar, GrammarParseError};
