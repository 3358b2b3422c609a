//! Symbol resolution for the Gramble compiler.
//!
//! Takes the nested, unqualified Grammar IR produced by translation to a
//! single qualified symbol table in which every node knows its tapes:
//!
//! - [`QualifyNames`] flattens nested collections and rewrites every embed
//!   to the qualified name it refers to, searching the innermost enclosing
//!   collection first.
//! - [`CalculateTapes`] computes the tape set of every node, breaking
//!   recursive embeds and dropping renames of tapes that do not exist.
//! - [`extract_literals`] collects the literal alphabet of a literal-only
//!   grammar such as a test input.

mod literals;
mod qualify;
mod tapes;

pub use literals::{extract_literals, LiteralMap};
pub use qualify::QualifyNames;
pub use tapes::{CalculateTapes, TapeCalculator};
