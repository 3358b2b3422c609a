use std::fmt::{self, Display, Write};

use crate::{Grammar, GrammarKind, SymbolMap};

/// Writes a tape name, symbol name or literal text, quoting it when it
/// would not lex back as a single word.
pub fn write_atom(f: &mut impl Write, atom: &str) -> fmt::Result {
    let needs_quotes = atom.is_empty()
        || atom
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ':' | '"' | '$' | '\\' | 'ε' | '∅'));
    if !needs_quotes {
        return f.write_str(atom);
    }
    f.write_char('"')?;
    for c in atom.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

fn write_children(f: &mut fmt::Formatter<'_>, form: &str, children: &[Grammar]) -> fmt::Result {
    write!(f, "({}", form)?;
    for child in children {
        write!(f, " {}", child)?;
    }
    f.write_str(")")
}

fn write_symbols(f: &mut fmt::Formatter<'_>, form: &str, symbols: &SymbolMap) -> fmt::Result {
    write!(f, "({}", form)?;
    for (name, grammar) in symbols.iter() {
        f.write_str(" (")?;
        write_atom(f, name)?;
        write!(f, " {})", grammar)?;
    }
    f.write_str(")")
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            GrammarKind::Epsilon => f.write_str("ε"),
            GrammarKind::Null => f.write_str("∅"),
            GrammarKind::Literal { tape, text } => {
                write_atom(f, tape)?;
                f.write_char(':')?;
                write_atom(f, text)
            }
            GrammarKind::Sequence(children) => write_children(f, "seq", children),
            GrammarKind::Alternation(children) => write_children(f, "alt", children),
            GrammarKind::Embed { symbol } => {
                f.write_char('$')?;
                write_atom(f, symbol)
            }
            GrammarKind::Collection(symbols) => write_symbols(f, "coll", symbols),
            GrammarKind::Rename { child, from, to } => {
                f.write_str("(rename ")?;
                write_atom(f, from)?;
                f.write_char(' ')?;
                write_atom(f, to)?;
                write!(f, " {})", child)
            }
            GrammarKind::SingleTape { child, tape } => {
                f.write_str("(single ")?;
                write_atom(f, tape)?;
                write!(f, " {})", child)
            }
            GrammarKind::Qualified(symbols) => write_symbols(f, "qual", symbols),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_print_nested_forms() {
        let mut inner = SymbolMap::new();
        inner.insert("root", Grammar::alt(vec![Grammar::literal("text", "walk"), Grammar::null()]));
        let mut outer = SymbolMap::new();
        outer.insert("Verbs", Grammar::collection(inner));
        outer.insert(
            "word",
            Grammar::seq(vec![
                Grammar::embed("Verbs.root"),
                Grammar::rename(Grammar::single_tape(Grammar::literal(".T", "ed"), "suffix"), "suffix", "text"),
            ]),
        );
        expect![[r#"(coll (Verbs (coll (root (alt text:walk ∅)))) (word (seq $Verbs.root (rename suffix text (single suffix .T:ed)))))"#]]
            .assert_eq(&Grammar::collection(outer).to_str());
    }

    #[test]
    fn test_print_quoted_atoms() {
        expect![[r#"$"noun root""#]].assert_eq(&Grammar::embed("noun root").to_str());
        expect![[r#"text:"""#]].assert_eq(&Grammar::literal("text", "").to_str());
        expect![[r#"gloss:"a\\b""#]].assert_eq(&Grammar::literal("gloss", "a\\b").to_str());
    }
}
