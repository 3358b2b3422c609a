//! Translation of the Tabular Syntax Tree into Grammar IR.
//!
//! The walk is top-down because a node's meaning depends on where it sits:
//! the enclosing collections give test cases their qualified symbol names,
//! and an assignment decides which symbol a table defines.

use gramble_grammar::{Grammar, SymbolMap};
use gramble_source::{CellPos, InternalError, MessageKind, DEFAULT_TAPE, QUALIFIER_SEPARATOR};
use gramble_tst::{Cell, Header, Operator, TstCollection, TstGrid, TstNode, TstOp, TstRow};
use rustc_hash::FxHashSet;

use crate::pass::{Pass, PassEnv, TestCase};

/// Translates a normalized TST into an unflattened Grammar IR.
///
/// The root should be the workbook collection; anything else is treated as
/// the only content of an unnamed root collection. Symbols of the root are
/// unqualified, symbols of a nested collection `Verbs` are addressed as
/// `Verbs.name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateTst;

impl Pass for TranslateTst {
    type Input = TstNode;
    type Output = Grammar;

    fn name(&self) -> &'static str {
        "translate-tst"
    }

    fn transform(&self, input: TstNode, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        let mut translator = Translator { env, scope: Vec::new() };
        Ok(match input {
            TstNode::Collection(root) => translator.root_collection(root),
            other => {
                let pos = other.pos().cloned();
                let mut symbols = SymbolMap::new();
                translator.statement(other, &mut symbols);
                Grammar::collection(symbols).at(pos)
            }
        })
    }
}

struct Translator<'e> {
    env: &'e mut PassEnv,
    /// Names of the collections enclosing the current node, root excluded.
    scope: Vec<String>,
}

impl<'e> Translator<'e> {
    //--------------------------------------------------------------------------
    // Collections and statements
    //--------------------------------------------------------------------------

    fn root_collection(&mut self, coll: TstCollection) -> Grammar {
        log::debug!("Translating root collection `{}`", coll.name);
        let pos = coll.cell.pos.clone();
        let symbols = self.members(coll.children);
        Grammar::collection(symbols).at(Some(pos))
    }

    /// Translates a nested collection defined as symbol `name`.
    ///
    /// Its members are qualified by `name`, which for `x = <collection>` is
    /// the assigned name rather than the collection's own.
    fn collection(&mut self, name: &str, coll: TstCollection) -> Grammar {
        log::debug!("Translating collection `{}` as `{}`", coll.name, name);
        self.scope.push(name.to_string());
        let symbols = self.members(coll.children);
        self.scope.pop();
        Grammar::collection(symbols).at(Some(coll.cell.pos))
    }

    fn members(&mut self, children: Vec<TstNode>) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        for child in children {
            self.statement(child, &mut symbols);
        }
        symbols
    }

    /// Adds the definitions made by `node` to `symbols`.
    ///
    /// An assignment's sibling holds the statements written before it, so the
    /// chain is walked sibling-first to keep definition order.
    fn statement(&mut self, node: TstNode, symbols: &mut SymbolMap) {
        match node {
            TstNode::Empty => {}
            TstNode::Collection(coll) => {
                let name = coll.name.clone();
                let pos = coll.cell.pos.clone();
                let grammar = self.collection(&name, coll);
                self.define(symbols, name, grammar, &pos);
            }
            TstNode::Op(TstOp { cell, op: Operator::Assign { name }, sibling, child }) => {
                self.statement(*sibling, symbols);
                let grammar = match *child {
                    TstNode::Collection(coll) => self.collection(&name, coll),
                    child => self.expr(child, &name),
                };
                self.define(symbols, name, grammar, &cell.pos);
            }
            other => {
                self.env.warn(MessageKind::UnassignedContent, other.pos());
            }
        }
    }

    fn define(&mut self, symbols: &mut SymbolMap, name: String, grammar: Grammar, pos: &CellPos) {
        if symbols.contains(&name) {
            self.env.error(MessageKind::DuplicateSymbol { name }, Some(pos));
            return;
        }
        log::trace!("Defining symbol `{}`", name);
        symbols.insert(name, grammar);
    }

    /// The qualified name of `symbol` as seen from the current scope.
    fn qualified(&self, symbol: &str) -> String {
        let sep = QUALIFIER_SEPARATOR.to_string();
        self.scope
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(symbol))
            .collect::<Vec<_>>()
            .join(&sep)
    }

    //--------------------------------------------------------------------------
    // Expressions
    //--------------------------------------------------------------------------

    /// Translates the body of the definition of `symbol`.
    fn expr(&mut self, node: TstNode, symbol: &str) -> Grammar {
        match node {
            TstNode::Empty => Grammar::epsilon(),
            TstNode::Grid(grid) => self.grid(grid),
            TstNode::Collection(coll) => {
                // Only a symbol definition can hold a collection.
                self.env.warn(MessageKind::MisplacedCollection { name: coll.name }, Some(&coll.cell.pos));
                Grammar::epsilon().at(Some(coll.cell.pos))
            }
            TstNode::Op(op) => self.op(op, symbol),
        }
    }

    fn op(&mut self, node: TstOp, symbol: &str) -> Grammar {
        let TstOp { cell, op, sibling, child } = node;
        let pos = Some(cell.pos.clone());
        match op {
            Operator::Table => {
                if !sibling.is_empty() {
                    self.env.warn(MessageKind::UnassignedContent, sibling.pos());
                }
                match *child {
                    TstNode::Empty => {
                        self.env.warn(MessageKind::EmptyTable, Some(&cell.pos));
                        Grammar::epsilon().at(pos)
                    }
                    child => self.expr(child, symbol),
                }
            }
            Operator::Or => {
                let left = self.expr(*sibling, symbol);
                let right = self.expr(*child, symbol);
                Grammar::alt(vec![left, right]).at(pos)
            }
            Operator::Test | Operator::TestNot => {
                let negated = op == Operator::TestNot;
                let tested = if sibling.is_empty() {
                    self.env.warn(MessageKind::MissingTestTarget { op: op.to_string() }, Some(&cell.pos));
                    Grammar::epsilon().at(pos)
                } else {
                    self.expr(*sibling, symbol)
                };
                match *child {
                    TstNode::Grid(grid) => self.tests(grid, symbol, negated),
                    TstNode::Empty => self.env.warn(MessageKind::EmptyTable, Some(&cell.pos)),
                    other => self.env.warn(MessageKind::UnassignedContent, other.pos()),
                }
                tested
            }
            Operator::Assign { .. } => {
                // Assignments only define symbols at statement level.
                self.env.warn(MessageKind::UnassignedContent, Some(&cell.pos));
                self.expr(*child, symbol)
            }
        }
    }

    //--------------------------------------------------------------------------
    // Grids
    //--------------------------------------------------------------------------

    fn grid(&mut self, grid: TstGrid) -> Grammar {
        let pos = Some(grid.cell.pos.clone());
        if grid.rows.is_empty() {
            self.env.warn(MessageKind::EmptyTable, pos.as_ref());
            return Grammar::epsilon().at(pos);
        }
        self.check_unique(&grid);

        let rows = grid.rows.iter().map(|row| row_grammar(&grid, row)).collect();
        Grammar::alt(rows).at(pos)
    }

    fn check_unique(&mut self, grid: &TstGrid) {
        for (index, header) in grid.headers.iter().enumerate() {
            if !header.header.is_unique() {
                continue;
            }
            let mut seen = FxHashSet::default();
            for cell in grid.rows.iter().filter_map(|row| row.cell(index)) {
                if !seen.insert(cell.text.as_str()) {
                    self.env.warn(
                        MessageKind::DuplicateUniqueValue {
                            header: header.header.to_string(),
                            value: cell.text.clone(),
                        },
                        Some(&cell.pos),
                    );
                }
            }
        }
    }

    fn tests(&mut self, grid: TstGrid, symbol: &str, negated: bool) {
        let symbol = self.qualified(symbol);
        for row in &grid.rows {
            let literals: Vec<Grammar> = grid
                .headers
                .iter()
                .enumerate()
                .filter_map(|(index, header)| {
                    let tape = header.header.literal_tape()?;
                    let cell = row.cell(index)?;
                    Some(Grammar::literal(tape, cell.text.as_str()).at(Some(cell.pos.clone())))
                })
                .collect();
            log::trace!("Recording test of `{}` at {}", symbol, row.pos);
            self.env.add_test(TestCase {
                symbol: symbol.clone(),
                pos: Some(row.pos.clone()),
                input: Grammar::seq(literals).at(Some(row.pos.clone())),
                negated,
            });
        }
    }
}

fn row_grammar(grid: &TstGrid, row: &TstRow) -> Grammar {
    let cells = grid
        .headers
        .iter()
        .enumerate()
        .filter_map(|(index, header)| cell_grammar(&header.header, row.cell(index)?))
        .collect();
    Grammar::seq(cells).at(Some(row.pos.clone()))
}

/// The grammar of one non-empty cell under `header`; comments give none.
fn cell_grammar(header: &Header, cell: &Cell) -> Option<Grammar> {
    let pos = Some(cell.pos.clone());
    let grammar = match header {
        Header::Tape { name } => Grammar::literal(name.as_str(), cell.text.as_str()),
        Header::Unique { inner } => return cell_grammar(inner, cell),
        Header::Embed => Grammar::embed(cell.text.trim()),
        Header::Rename { from, to } => {
            let embed = Grammar::embed(cell.text.trim()).at(pos.clone());
            Grammar::rename(embed, from.as_str(), to.as_str())
        }
        Header::Choice { tape } => {
            let alternatives = cell
                .text
                .split('|')
                .map(str::trim)
                .map(|alt| Grammar::literal(DEFAULT_TAPE, alt).at(pos.clone()))
                .collect();
            Grammar::single_tape(Grammar::alt(alternatives).at(pos.clone()), tape.as_str())
        }
        Header::Comment => return None,
    };
    Some(grammar.at(pos))
}
