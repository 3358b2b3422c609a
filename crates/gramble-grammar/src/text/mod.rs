//! The canonical textual form of the Grammar IR.
//!
//! ```text
//! <Grammar> ::= "ε" | "∅" | <Atom> ":" <Atom> | "$" <Atom> | "(" <Form> ")"
//! <Form>    ::= "seq" <Grammar>* | "alt" <Grammar>*
//!             | "rename" <Atom> <Atom> <Grammar> | "single" <Atom> <Grammar>
//!             | "coll" <Def>* | "qual" <Def>*
//! <Def>     ::= "(" <Atom> <Grammar> ")"
//! <Atom>    ::= <word> | <quoted>
//! ```
//!
//! Printing a parsed tree gives back the same text for canonical input.

pub mod lexer;
pub mod parser;
mod printer;
pub mod token;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::Grammar;

pub use printer::write_atom;

/// Errors produced while reading canonical grammar text.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum GrammarParseError {
    #[error("Unrecognized token: '{lexeme}'")]
    #[diagnostic(code(gramble::text::lexer))]
    Lexer {
        lexeme: String,
        #[label("not a valid token")]
        span: SourceSpan,
    },

    #[error("Expected {expected}, found '{found}'")]
    #[diagnostic(code(gramble::text::unexpected_token))]
    Unexpected {
        expected: String,
        found: String,
        #[label("unexpected token")]
        span: SourceSpan,
    },

    #[error("Unexpected end of input; expected {expected}")]
    #[diagnostic(code(gramble::text::unexpected_eof))]
    UnexpectedEof { expected: String },

    #[error("Unknown form `{name}`")]
    #[diagnostic(
        code(gramble::text::unknown_form),
        help("Forms are seq, alt, rename, single, coll and qual")
    )]
    UnknownForm {
        name: String,
        #[label("unknown form")]
        span: SourceSpan,
    },

    #[error("Duplicate symbol `{name}` in {form}")]
    #[diagnostic(code(gramble::text::duplicate_symbol))]
    DuplicateSymbol {
        name: String,
        form: &'static str,
        #[label("defined again here")]
        span: SourceSpan,
    },
}

/// Parses canonical grammar text.
pub fn parse_grammar(input: &str) -> Result<Grammar, GrammarParseError> {
    let tokens = lexer::lex(input)?;
    let mut parser = parser::Parser::new(&tokens);
    let grammar = parser.parse_grammar()?;
    parser.expect_end()?;
    Ok(grammar)
}
