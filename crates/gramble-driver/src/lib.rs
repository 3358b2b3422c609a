//! The compilation pipeline of the Gramble grammar compiler.
//!
//! [`Compiler`] runs every pass over a Tabular Syntax Tree and returns a
//! [`CompileOutput`]: the compiled grammar (a qualified symbol table whose
//! nodes all carry their tape sets, plus the test cases and their literal
//! alphabet) together with every message produced along the way.

mod compiler;
mod output;

pub use compiler::Compiler;
pub use output::{CompileOutput, CompiledGrammar};

// Re-exported so hosts only need this crate.
pub use gramble_passes::TestCase;
pub use gramble_resolve::LiteralMap;
pub use gramble_source::{CompileConfig, InternalError, Message, Severity};
