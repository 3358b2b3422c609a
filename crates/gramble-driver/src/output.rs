use gramble_grammar::{Grammar, GrammarKind, TapeSet};
use gramble_passes::TestCase;
use gramble_resolve::LiteralMap;
use gramble_source::{InternalError, Message, Severity};

/// A grammar ready for the execution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledGrammar {
    /// The `Qualified` symbol table; every node carries its tape set.
    pub grammar: Grammar,
    pub tests: Vec<TestCase>,
    /// The literals of all test inputs, by tape.
    pub literals: LiteralMap,
}

impl CompiledGrammar {
    /// The definition of a qualified symbol name; lookup ignores case.
    pub fn symbol(&self, name: &str) -> Option<&Grammar> {
        match self.grammar.kind() {
            GrammarKind::Qualified(symbols) => symbols.get(name),
            _ => None,
        }
    }

    pub fn tapes_of(&self, name: &str) -> Option<&TapeSet> {
        self.symbol(name).and_then(Grammar::tapes)
    }

    /// Qualified symbol names in definition order.
    pub fn symbol_names(&self) -> impl Iterator<Item = &str> {
        let symbols = match self.grammar.kind() {
            GrammarKind::Qualified(symbols) => Some(symbols),
            _ => None,
        };
        symbols.into_iter().flat_map(|symbols| symbols.names())
    }
}

/// Everything one compilation run produced.
#[derive(Debug)]
pub struct CompileOutput {
    pub result: Result<CompiledGrammar, InternalError>,
    /// Messages in the order they were reported.
    pub messages: Vec<Message>,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Message::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Message> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Message> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.severity() == severity)
    }

    /// Whether the run should count as a failure.
    pub fn failed(&self, fail_on_warnings: bool) -> bool {
        self.result.is_err() || self.has_errors() || (fail_on_warnings && self.warnings().next().is_some())
    }
}
