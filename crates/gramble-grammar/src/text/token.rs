use logos::Logos;
use miette::SourceSpan;

/// A token spans from `start` to `end` within the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub span: SourceSpan,
}

/// All possible tokens of the canonical grammar text.
#[derive(Debug, Logos, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token("$")]
    Dollar,

    // Constants
    #[token("ε")]
    Epsilon,
    #[token("∅")]
    Null,

    // Double-quoted text with `\"` and `\\` escapes
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    // Bare words: tape names, literal text, symbol names and form keywords
    #[regex(r#"[^\s():"$\\ε∅]+"#)]
    Word,

    // Whitespace (to be skipped)
    #[regex(r"[ \t\n\r]+", logos::skip)]
    Whitespace,

    // Catch-all for anything unexpected
    #[error]
    Error,
}
