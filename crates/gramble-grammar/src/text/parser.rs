use super::lexer::unquote;
use super::token::{Token, TokenKind};
use super::GrammarParseError;
use crate::{Grammar, SymbolMap};

type ParseResult<T> = Result<T, GrammarParseError>;

/// Recursive descent over the tokens of one canonical grammar text.
///
/// Every form is either an atom (`ε`, `∅`, `$name`, `tape:text`) or a
/// parenthesized form whose first word picks the node kind.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Steps past the current token.
    fn next(&mut self) -> Option<&'a Token<'a>> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn unexpected(tok: &Token<'_>, expected: &str) -> GrammarParseError {
        GrammarParseError::Unexpected {
            expected: expected.to_string(),
            found: tok.lexeme.to_string(),
            span: tok.span,
        }
    }

    /// Consumes a token of kind `expected` or fails at the token found.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<&'a Token<'a>> {
        match self.next() {
            Some(t) if t.kind == expected => Ok(t),
            Some(t) => Err(Self::unexpected(t, &format!("{:?}", expected))),
            None => Err(GrammarParseError::UnexpectedEof {
                expected: format!("{:?}", expected),
            }),
        }
    }

    /// Fails unless every token has been consumed.
    pub fn expect_end(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(t) => Err(Self::unexpected(t, "end of input")),
            None => Ok(()),
        }
    }

    //--------------------------------------------------------------------------
    // <Atom> ::= <word> | <quoted>
    //--------------------------------------------------------------------------

    fn parse_atom(&mut self) -> ParseResult<String> {
        match self.next() {
            Some(t) if t.kind == TokenKind::Word => Ok(t.lexeme.to_string()),
            Some(t) if t.kind == TokenKind::Quoted => Ok(unquote(t.lexeme)),
            Some(t) => Err(Self::unexpected(t, "a name or text")),
            None => Err(GrammarParseError::UnexpectedEof {
                expected: "a name or text".to_string(),
            }),
        }
    }

    //--------------------------------------------------------------------------
    // <Grammar> ::= "ε" | "∅" | <Atom> ":" <Atom> | "$" <Atom> | "(" <Form> ")"
    //--------------------------------------------------------------------------

    pub fn parse_grammar(&mut self) -> ParseResult<Grammar> {
        let tok = self.peek().ok_or_else(|| GrammarParseError::UnexpectedEof {
            expected: "a grammar".to_string(),
        })?;

        match tok.kind {
            TokenKind::Epsilon => {
                self.next();
                Ok(Grammar::epsilon())
            }
            TokenKind::Null => {
                self.next();
                Ok(Grammar::null())
            }
            TokenKind::Dollar => {
                self.next();
                let symbol = self.parse_atom()?;
                Ok(Grammar::embed(symbol))
            }
            TokenKind::Word | TokenKind::Quoted => {
                let tape = self.parse_atom()?;
                self.expect(TokenKind::Colon)?;
                let text = self.parse_atom()?;
                Ok(Grammar::literal(tape, text))
            }
            TokenKind::LParen => {
                self.next();
                let grammar = self.parse_form()?;
                self.expect(TokenKind::RParen)?;
                Ok(grammar)
            }
            _ => Err(Self::unexpected(tok, "a grammar")),
        }
    }

    //--------------------------------------------------------------------------
    // <Form> ::= "seq" <Grammar>* | "alt" <Grammar>*
    //          | "rename" <Atom> <Atom> <Grammar> | "single" <Atom> <Grammar>
    //          | "coll" <Def>* | "qual" <Def>*
    //--------------------------------------------------------------------------

    fn parse_form(&mut self) -> ParseResult<Grammar> {
        let head = self.expect(TokenKind::Word)?;
        match head.lexeme {
            "seq" => Ok(Grammar::seq(self.parse_children()?)),
            "alt" => Ok(Grammar::alt(self.parse_children()?)),
            "rename" => {
                let from = self.parse_atom()?;
                let to = self.parse_atom()?;
                let child = self.parse_grammar()?;
                Ok(Grammar::rename(child, from, to))
            }
            "single" => {
                let tape = self.parse_atom()?;
                let child = self.parse_grammar()?;
                Ok(Grammar::single_tape(child, tape))
            }
            "coll" => Ok(Grammar::collection(self.parse_defs("coll")?)),
            "qual" => Ok(Grammar::qualified(self.parse_defs("qual")?)),
            name => Err(GrammarParseError::UnknownForm {
                name: name.to_string(),
                span: head.span,
            }),
        }
    }

    /// Parses grammars up to (not including) the closing parenthesis.
    fn parse_children(&mut self) -> ParseResult<Vec<Grammar>> {
        let mut children = Vec::new();
        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::RParen {
                break;
            }
            children.push(self.parse_grammar()?);
        }
        Ok(children)
    }

    //--------------------------------------------------------------------------
    // <Def> ::= "(" <Atom> <Grammar> ")"
    //--------------------------------------------------------------------------

    fn parse_defs(&mut self, form: &'static str) -> ParseResult<SymbolMap> {
        let mut symbols = SymbolMap::new();
        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::RParen {
                break;
            }
            self.expect(TokenKind::LParen)?;
            let name_span = self.peek().map(|t| t.span);
            let name = self.parse_atom()?;
            let grammar = self.parse_grammar()?;
            self.expect(TokenKind::RParen)?;

            if symbols.contains(&name) {
                return Err(GrammarParseError::DuplicateSymbol {
                    name,
                    form,
                    span: name_span.unwrap_or_else(|| (0, 0).into()),
                });
            }
            symbols.insert(name, grammar);
        }
        Ok(symbols)
    }
}
