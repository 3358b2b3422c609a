use super::token::*;
use super::GrammarParseError;
use logos::Logos;
use miette::SourceSpan;

/// Lexes the input string into a vector of tokens.
pub fn lex(input: &str) -> Result<Vec<Token<'_>>, GrammarParseError> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let range = lexer.span();
        let lexeme = &input[range.clone()];
        let span = SourceSpan::from(range);

        match kind {
            TokenKind::Error => {
                return Err(GrammarParseError::Lexer {
                    lexeme: lexeme.to_string(),
                    span,
                });
            }
            _ => {
                tokens.push(Token { kind, lexeme, span });
            }
        }
    }

    Ok(tokens)
}

/// Strips the quotes of a `Quoted` lexeme and resolves its escapes.
pub fn unquote(lexeme: &str) -> String {
    let inner = &lexeme[1..lexeme.len() - 1];
    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                text.push(escaped);
            }
        } else {
            text.push(c);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_literal_and_forms() {
        let tokens = lex("(seq t1:hello $verb ε ∅)").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Colon,
                TokenKind::Word,
                TokenKind::Dollar,
                TokenKind::Word,
                TokenKind::Epsilon,
                TokenKind::Null,
                TokenKind::RParen,
            ]
        );
        assert_eq!(tokens[2].lexeme, "t1");
        assert_eq!(tokens[4].lexeme, "hello");
    }

    #[test]
    fn test_lex_dotted_names() {
        let tokens = lex("$sheet.all .T:a").unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["$", "sheet.all", ".T", ":", "a"]);
    }

    #[test]
    fn test_unquote_escapes() {
        let tokens = lex(r#"text:"say \"hi\" \\ (now)""#).unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Quoted);
        assert_eq!(unquote(tokens[2].lexeme), r#"say "hi" \ (now)"#);
    }

    #[test]
    fn test_lex_error() {
        let err = lex("text:\"unterminated").unwrap_err();
        assert!(matches!(err, GrammarParseError::Lexer { .. }));
    }
}
