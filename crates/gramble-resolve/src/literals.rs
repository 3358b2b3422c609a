use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gramble_grammar::{Grammar, GrammarKind};
use gramble_source::{InternalError, DEFAULT_TAPE};

const PASS_NAME: &str = "extract-literals";

/// The distinct strings found on each tape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiteralMap(BTreeMap<String, BTreeSet<String>>);

impl LiteralMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tape: impl Into<String>, text: impl Into<String>) -> bool {
        self.0.entry(tape.into()).or_default().insert(text.into())
    }

    /// Adds every literal of `other`.
    pub fn merge(&mut self, other: LiteralMap) {
        for (tape, texts) in other.0 {
            self.0.entry(tape).or_default().extend(texts);
        }
    }

    /// Moves the literals of tape `from` onto tape `to`.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(texts) = self.0.remove(from) {
            self.0.entry(to.to_string()).or_default().extend(texts);
        }
    }

    pub fn get(&self, tape: &str) -> Option<&BTreeSet<String>> {
        self.0.get(tape)
    }

    pub fn tapes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(tape, texts)| (tape.as_str(), texts))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LiteralMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tape, texts) in &self.0 {
            let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
            writeln!(f, "{}: {}", tape, texts.join(", "))?;
        }
        Ok(())
    }
}

/// Collects the literals of a literal-only grammar, keyed by the tape they
/// end up on once enclosing renames are applied.
///
/// Only `ε`, literals, sequences, renames and single-tape wrappers are
/// accepted; anything else is an internal error.
pub fn extract_literals(grammar: &Grammar) -> Result<LiteralMap, InternalError> {
    let mut literals = LiteralMap::new();
    match grammar.kind() {
        GrammarKind::Epsilon => {}
        GrammarKind::Literal { tape, text } => {
            literals.insert(tape.as_str(), text.as_str());
        }
        GrammarKind::Sequence(children) => {
            for child in children {
                literals.merge(extract_literals(child)?);
            }
        }
        GrammarKind::Rename { child, from, to } => {
            literals = extract_literals(child)?;
            literals.rename(from, to);
        }
        GrammarKind::SingleTape { child, tape } => {
            literals = extract_literals(child)?;
            literals.rename(DEFAULT_TAPE, tape);
        }
        GrammarKind::Null
        | GrammarKind::Alternation(_)
        | GrammarKind::Embed { .. }
        | GrammarKind::Collection(_)
        | GrammarKind::Qualified(_) => {
            return Err(InternalError::UnsupportedNode {
                pass: PASS_NAME,
                node: grammar.tag().to_string(),
            });
        }
    }
    Ok(literals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use gramble_grammar::parse_grammar;

    fn extract(text: &str) -> Result<LiteralMap, InternalError> {
        extract_literals(&parse_grammar(text).unwrap())
    }

    #[test]
    fn test_sequence_of_literals() {
        let literals = extract("(seq text:run gloss:run text:walk text:run ε)").unwrap();
        expect![[r#"
            gloss: run
            text: run, walk
        "#]]
        .assert_eq(&literals.to_string());
    }

    #[test]
    fn test_rename_moves_literals() {
        let literals = extract("(rename t1 t2 t1:x)").unwrap();
        let mut expected = LiteralMap::new();
        expected.insert("t2", "x");
        assert_eq!(literals, expected);
    }

    #[test]
    fn test_nested_wrappers() {
        let literals = extract("(rename suffix text (seq (single suffix .T:ed) text:walk))").unwrap();
        assert_eq!(literals.tapes().collect::<Vec<_>>(), vec!["text"]);
        assert_eq!(literals.get("text").unwrap().len(), 2);
    }

    #[test]
    fn test_unsupported_shapes() {
        for text in ["(alt t:a t:b)", "$verb", "∅", "(seq t:a (coll))"] {
            let err = extract(text).unwrap_err();
            assert!(matches!(err, InternalError::UnsupportedNode { pass: "extract-literals", .. }), "{}", text);
        }
        let err = extract("(seq t:a (alt))").unwrap_err();
        assert_eq!(err, InternalError::UnsupportedNode { pass: PASS_NAME, node: "alt".into() });
    }

    #[test]
    fn test_merge() {
        let mut left = extract("(seq t:a u:b)").unwrap();
        left.merge(extract("(seq t:c)").unwrap());
        assert_eq!(left.get("t").unwrap().iter().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}
