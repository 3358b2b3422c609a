use gramble_source::CellPos;

use crate::{SymbolMap, TapeSet};

// --- Core Grammar Structures ---

/// A node of the Grammar IR.
///
/// Carries the cell it was compiled from (if any) and, once tape calculation
/// has run, the exact set of tapes the node can touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    kind: GrammarKind,
    pos: Option<CellPos>,
    tapes: Option<TapeSet>,
}

/// The variants of the Grammar IR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarKind {
    /// The empty string on every tape.
    Epsilon,
    /// Matches nothing.
    Null,
    /// A fixed string on one tape.
    Literal { tape: String, text: String },
    /// Ordered concatenation.
    Sequence(Vec<Grammar>),
    /// Union of the children.
    Alternation(Vec<Grammar>),
    /// A reference to a symbol defined elsewhere.
    Embed { symbol: String },
    /// A namespace of named sub-grammars; may nest.
    Collection(SymbolMap),
    /// Relabels tape `from` of the child as `to`.
    Rename { child: Box<Grammar>, from: String, to: String },
    /// Binds the child's default tape to `tape`.
    SingleTape { child: Box<Grammar>, tape: String },
    /// The flattened symbol table, keyed by qualified names.
    Qualified(SymbolMap),
}

impl Grammar {
    pub fn new(kind: GrammarKind) -> Self {
        Self { kind, pos: None, tapes: None }
    }

    pub fn epsilon() -> Self {
        Self::new(GrammarKind::Epsilon)
    }

    pub fn null() -> Self {
        Self::new(GrammarKind::Null)
    }

    pub fn literal(tape: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(GrammarKind::Literal { tape: tape.into(), text: text.into() })
    }

    pub fn seq(children: Vec<Grammar>) -> Self {
        Self::new(GrammarKind::Sequence(children))
    }

    pub fn alt(children: Vec<Grammar>) -> Self {
        Self::new(GrammarKind::Alternation(children))
    }

    pub fn embed(symbol: impl Into<String>) -> Self {
        Self::new(GrammarKind::Embed { symbol: symbol.into() })
    }

    pub fn collection(symbols: SymbolMap) -> Self {
        Self::new(GrammarKind::Collection(symbols))
    }

    pub fn rename(child: Grammar, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(GrammarKind::Rename { child: Box::new(child), from: from.into(), to: to.into() })
    }

    pub fn single_tape(child: Grammar, tape: impl Into<String>) -> Self {
        Self::new(GrammarKind::SingleTape { child: Box::new(child), tape: tape.into() })
    }

    pub fn qualified(symbols: SymbolMap) -> Self {
        Self::new(GrammarKind::Qualified(symbols))
    }

    /// Attaches a source position.
    pub fn at(mut self, pos: Option<CellPos>) -> Self {
        self.pos = pos;
        self
    }

    /// Attaches the tape set computed by tape calculation.
    ///
    /// The annotation is written once; re-annotating with a different set is a bug.
    pub fn with_tapes(mut self, tapes: TapeSet) -> Self {
        debug_assert!(
            self.tapes.as_ref().map_or(true, |existing| *existing == tapes),
            "tape set of {} annotated twice",
            self.tag()
        );
        self.tapes = Some(tapes);
        self
    }

    pub fn kind(&self) -> &GrammarKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<&CellPos> {
        self.pos.as_ref()
    }

    /// The tape set, if tape calculation has annotated this node.
    pub fn tapes(&self) -> Option<&TapeSet> {
        self.tapes.as_ref()
    }

    /// Splits the node into its variant and position, dropping any annotation.
    pub fn into_parts(self) -> (GrammarKind, Option<CellPos>) {
        (self.kind, self.pos)
    }

    /// Short name of the variant, as used by the canonical printer.
    pub fn tag(&self) -> &'static str {
        match &self.kind {
            GrammarKind::Epsilon => "epsilon",
            GrammarKind::Null => "null",
            GrammarKind::Literal { .. } => "literal",
            GrammarKind::Sequence(_) => "seq",
            GrammarKind::Alternation(_) => "alt",
            GrammarKind::Embed { .. } => "embed",
            GrammarKind::Collection(_) => "coll",
            GrammarKind::Rename { .. } => "rename",
            GrammarKind::SingleTape { .. } => "single",
            GrammarKind::Qualified(_) => "qual",
        }
    }

    /// The canonical textual form of this grammar.
    pub fn to_str(&self) -> String {
        self.to_string()
    }
}
