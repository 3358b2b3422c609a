//! Tape calculation.
//!
//! The tape set of a node is the union of the tapes its leaves can write,
//! after following embeds and applying renames:
//!
//! ```text
//! tapes(ε) = tapes(∅)        = {}
//! tapes(t:x)                 = {t}
//! tapes(seq cs), tapes(alt cs) = ⋃ tapes(c)
//! tapes($n)                  = tapes(definition of n)
//! tapes(rename f t c)        = tapes(c) with f relabelled t
//! tapes(single n c)          = tapes(c) with .T relabelled n
//! tapes(qual defs)           = ⋃ tapes(def)
//! ```
//!
//! Calculation runs in two phases. The first computes the tape set of every
//! symbol of the table, memoized by qualified name, and finds recursive
//! embeds with an explicit stack of the symbols being computed. The second
//! rebuilds every definition bottom-up, annotating each node and reporting
//! local problems.

use gramble_grammar::{Grammar, GrammarKind, SymbolMap, TapeSet};
use gramble_passes::{Pass, PassEnv, Transform};
use gramble_source::{CellPos, InternalError, MessageKind, DEFAULT_TAPE};
use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

const PASS_NAME: &str = "calculate-tapes";

/// Annotates every node of a flattened grammar with its tape set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateTapes;

impl Pass for CalculateTapes {
    type Input = Grammar;
    type Output = Grammar;

    fn name(&self) -> &'static str {
        PASS_NAME
    }

    fn transform(&self, input: Grammar, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        TapeCalculator::new().calculate(input, env)
    }
}

/// The state of one tape calculation.
///
/// A calculator is meant for a single grammar: its memo is keyed by
/// qualified names and is only valid for the table it was filled from.
#[derive(Debug, Default)]
pub struct TapeCalculator {
    /// Final tape sets of the symbols computed so far.
    memo: FxHashMap<String, TapeSet>,
    /// Symbols whose tape sets are being computed, in visiting order.
    in_progress: IndexSet<String>,
    /// Symbols found to embed themselves.
    cyclic: FxHashSet<String>,
}

impl TapeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotates `grammar` and every node below it.
    ///
    /// A `Qualified` root is treated as the symbol table embeds refer to; any
    /// other root has no symbols, so its embeds are unresolved.
    pub fn calculate(&mut self, grammar: Grammar, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        let (kind, pos) = grammar.into_parts();
        match kind {
            GrammarKind::Qualified(symbols) => self.calculate_table(symbols, pos, env),
            kind => self.annotate(Grammar::new(kind).at(pos), env),
        }
    }

    /// The memoized tape set of `name`, if it has been computed.
    pub fn symbol_tapes(&self, name: &str) -> Option<&TapeSet> {
        self.memo.get(&SymbolMap::normalize(name))
    }

    fn calculate_table(
        &mut self,
        symbols: SymbolMap,
        pos: Option<CellPos>,
        env: &mut PassEnv,
    ) -> Result<Grammar, InternalError> {
        for name in symbols.names() {
            self.compute_symbol(name, &symbols, env)?;
        }
        log::debug!(
            "Computed tapes of {} symbols, {} recursive",
            self.memo.len(),
            self.cyclic.len()
        );

        let mut table = SymbolMap::new();
        let mut all = TapeSet::new();
        for entry in symbols {
            let key = SymbolMap::normalize(&entry.name);
            let grammar = if self.cyclic.contains(&key) {
                let pos = entry.grammar.pos().cloned();
                Grammar::null().at(pos).with_tapes(TapeSet::new())
            } else {
                self.annotate(entry.grammar, env)?
            };
            if let Some(tapes) = grammar.tapes() {
                all.extend_from(tapes);
            }
            table.insert(entry.name, grammar);
        }
        Ok(Grammar::qualified(table).at(pos).with_tapes(all))
    }

    //--------------------------------------------------------------------------
    // Phase 1: symbol tape sets
    //--------------------------------------------------------------------------

    /// Computes and memoizes the tape set of symbol `name`.
    ///
    /// Returns `None` when `symbols` has no such symbol. The symbols `name`
    /// depends on are visited depth-first with an explicit stack of frames,
    /// so long embed chains cost heap rather than call depth. A symbol
    /// reached again while its own tape set is being computed closes a
    /// cycle; every symbol on the cycle is reported once and ends up with no
    /// tapes.
    fn compute_symbol(
        &mut self,
        name: &str,
        symbols: &SymbolMap,
        env: &mut PassEnv,
    ) -> Result<Option<TapeSet>, InternalError> {
        let key = SymbolMap::normalize(name);
        if let Some(tapes) = self.memo.get(&key) {
            return Ok(Some(tapes.clone()));
        }
        if !symbols.contains(&key) {
            return Ok(None);
        }

        let mut stack = vec![self.enter(key.clone(), symbols)];
        while let Some(frame) = stack.last_mut() {
            match frame.pending.pop() {
                Some(dep) => {
                    if self.memo.contains_key(&dep) {
                        continue;
                    }
                    if let Some(start) = self.in_progress.get_index_of(&dep) {
                        self.report_cycle(start, symbols, env);
                        continue;
                    }
                    // Unknown targets are reported when the embed is annotated.
                    if symbols.contains(&dep) {
                        stack.push(self.enter(dep, symbols));
                    }
                }
                None => {
                    let Some(frame) = stack.pop() else { break };
                    self.leave(frame.key, symbols)?;
                }
            }
        }
        Ok(self.memo.get(&key).cloned())
    }

    /// Marks `key` as in progress and lists the symbols its definition embeds.
    fn enter(&mut self, key: String, symbols: &SymbolMap) -> Frame {
        let mut pending = Vec::new();
        if let Some(grammar) = symbols.get(&key) {
            log::trace!("Computing tapes of `{}`", key);
            embeds_of(grammar, &mut pending);
        }
        // Popped from the back, so reverse to visit in definition order.
        pending.reverse();
        self.in_progress.insert(key.clone());
        Frame { key, pending }
    }

    /// Computes `key` once everything it embeds has been memoized.
    fn leave(&mut self, key: String, symbols: &SymbolMap) -> Result<(), InternalError> {
        let tapes = match symbols.get(&key) {
            Some(grammar) => self.compute(grammar)?,
            None => TapeSet::new(),
        };
        self.in_progress.pop();
        let tapes = if self.cyclic.contains(&key) { TapeSet::new() } else { tapes };
        self.memo.insert(key, tapes);
        Ok(())
    }

    fn report_cycle(&mut self, start: usize, symbols: &SymbolMap, env: &mut PassEnv) {
        let members: Vec<String> = self.in_progress.iter().skip(start).cloned().collect();
        let display = |key: &str| {
            symbols
                .get_entry(key)
                .map_or_else(|| key.to_string(), |entry| entry.name.clone())
        };
        let mut path: Vec<String> = members.iter().map(|key| display(key)).collect();
        path.push(display(&members[0]));
        let cycle = path.join(" -> ");
        log::debug!("Recursive embed: {}", cycle);

        for key in members {
            if !self.cyclic.insert(key.clone()) {
                continue;
            }
            let pos = symbols.get(&key).and_then(Grammar::pos);
            env.error(
                MessageKind::RecursiveEmbed { symbol: display(&key), cycle: cycle.clone() },
                pos,
            );
        }
    }

    /// The tape set of `grammar`, reading embedded symbols from the memo.
    ///
    /// Symbols still in progress read as no tapes; they are on a cycle with
    /// the symbol being computed, which is then emptied anyway.
    fn compute(&self, grammar: &Grammar) -> Result<TapeSet, InternalError> {
        Ok(match grammar.kind() {
            GrammarKind::Epsilon | GrammarKind::Null => TapeSet::new(),
            GrammarKind::Literal { tape, .. } => TapeSet::singleton(tape.as_str()),
            GrammarKind::Sequence(children) | GrammarKind::Alternation(children) => {
                let mut tapes = TapeSet::new();
                for child in children {
                    tapes.extend_from(&self.compute(child)?);
                }
                tapes
            }
            GrammarKind::Embed { symbol } => self.symbol_tapes(symbol).cloned().unwrap_or_default(),
            GrammarKind::Rename { child, from, to } => self.compute(child)?.rename(from, to),
            GrammarKind::SingleTape { child, tape } => self.compute(child)?.rename(DEFAULT_TAPE, tape),
            GrammarKind::Qualified(defs) => {
                let mut tapes = TapeSet::new();
                for (_, def) in defs.iter() {
                    tapes.extend_from(&self.compute(def)?);
                }
                tapes
            }
            GrammarKind::Collection(_) => {
                return Err(InternalError::UnflattenedCollection { pass: PASS_NAME });
            }
        })
    }

    //--------------------------------------------------------------------------
    // Phase 2: annotation
    //--------------------------------------------------------------------------

    /// Rebuilds `grammar` with every node annotated.
    ///
    /// Embeds take the memoized tape set of their target, so every symbol
    /// they can reach must have been computed first.
    fn annotate(&self, grammar: Grammar, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        grammar.transform_bottom_up(env, &mut |node: Grammar, env: &mut PassEnv| {
            let (kind, pos) = node.into_parts();
            let kind = match kind {
                GrammarKind::Rename { child, from, to } if !tapes_of(&child).contains(&from) => {
                    env.error(MessageKind::RenameMissingTape { from, to }, pos.as_ref());
                    return Ok(*child);
                }
                kind => kind,
            };
            let tapes = match &kind {
                GrammarKind::Epsilon | GrammarKind::Null => TapeSet::new(),
                GrammarKind::Literal { tape, .. } => TapeSet::singleton(tape.as_str()),
                GrammarKind::Sequence(children) | GrammarKind::Alternation(children) => union_of(children.iter()),
                GrammarKind::Embed { symbol } => match self.symbol_tapes(symbol) {
                    Some(tapes) => tapes.clone(),
                    None => {
                        env.error(MessageKind::UnresolvedSymbol { name: symbol.clone() }, pos.as_ref());
                        return Ok(Grammar::null().at(pos).with_tapes(TapeSet::new()));
                    }
                },
                GrammarKind::Rename { child, from, to } => tapes_of(child).rename(from, to),
                GrammarKind::SingleTape { child, tape } => tapes_of(child).rename(DEFAULT_TAPE, tape),
                GrammarKind::Qualified(defs) => union_of(defs.iter().map(|(_, def)| def)),
                GrammarKind::Collection(_) => {
                    return Err(InternalError::UnflattenedCollection { pass: PASS_NAME });
                }
            };
            let grammar = Grammar::new(kind).at(pos).with_tapes(tapes);
            log::trace!("Annotated {} node with {:?}", grammar.tag(), grammar.tapes());
            Ok(grammar)
        })
    }
}

/// A symbol whose dependencies are being visited.
#[derive(Debug)]
struct Frame {
    key: String,
    /// Normalized names of the embeds not visited yet, last one first.
    pending: Vec<String>,
}

/// Collects the normalized targets of the embeds inside `grammar`.
fn embeds_of(grammar: &Grammar, out: &mut Vec<String>) {
    match grammar.kind() {
        GrammarKind::Epsilon | GrammarKind::Null | GrammarKind::Literal { .. } | GrammarKind::Collection(_) => {}
        GrammarKind::Embed { symbol } => out.push(SymbolMap::normalize(symbol)),
        GrammarKind::Sequence(children) | GrammarKind::Alternation(children) => {
            for child in children {
                embeds_of(child, out);
            }
        }
        GrammarKind::Rename { child, .. } | GrammarKind::SingleTape { child, .. } => embeds_of(child, out),
        GrammarKind::Qualified(defs) => {
            for (_, def) in defs.iter() {
                embeds_of(def, out);
            }
        }
    }
}

/// The annotation of an already annotated child.
fn tapes_of(grammar: &Grammar) -> TapeSet {
    grammar.tapes().cloned().unwrap_or_default()
}

fn union_of<'g>(children: impl Iterator<Item = &'g Grammar>) -> TapeSet {
    let mut tapes = TapeSet::new();
    for child in children {
        if let Some(child_tapes) = child.tapes() {
            tapes.extend_from(child_tapes);
        }
    }
    tapes
}
