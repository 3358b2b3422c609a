// Flattening: nested collections become one table keyed by qualified names.

use gramble_grammar::{Grammar, GrammarKind, SymbolMap};
use gramble_passes::{Pass, PassEnv, Transform};
use gramble_source::{qualify, InternalError, MessageKind, ALL_SYMBOL, QUALIFIER_SEPARATOR};
use rustc_hash::{FxHashMap, FxHashSet};

/// Linearizes nested collections into a single `Qualified` table.
///
/// A symbol `root` of a collection `Verbs` is stored as `Verbs.root`;
/// symbols of the outermost collection keep their plain names. Every embed
/// is rewritten to the qualified name of its target.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualifyNames;

impl Pass for QualifyNames {
    type Input = Grammar;
    type Output = Grammar;

    fn name(&self) -> &'static str {
        "qualify-names"
    }

    fn transform(&self, input: Grammar, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        let (kind, pos) = input.into_parts();
        match kind {
            GrammarKind::Collection(symbols) => {
                let mut table = SymbolTable::default();
                table.collect(symbols, &mut Vec::new(), env);
                log::debug!(
                    "Collected {} definitions in {} nested collections",
                    table.definitions.len(),
                    table.collections.len()
                );
                let definitions = std::mem::take(&mut table.definitions);
                let mut qualified = SymbolMap::new();
                for def in definitions {
                    let grammar = table.resolve_embeds(def.grammar, &def.scope, env)?;
                    qualified.insert(def.name, grammar);
                }
                Ok(Grammar::qualified(qualified).at(pos))
            }
            kind @ GrammarKind::Qualified(_) => Ok(Grammar::new(kind).at(pos)),
            // A lone grammar has no symbols to refer to.
            kind => SymbolTable::default().resolve_embeds(Grammar::new(kind).at(pos), &[], env),
        }
    }
}

/// A definition found while walking the collection tree.
#[derive(Debug)]
struct DefinitionInfo {
    /// Qualified display name, e.g. `Verbs.root`.
    name: String,
    grammar: Grammar,
    /// Display names of the enclosing collections, outermost first.
    scope: Vec<String>,
}

#[derive(Debug, Default)]
struct SymbolTable {
    definitions: Vec<DefinitionInfo>,
    /// Normalized qualified key to qualified display name.
    names: FxHashMap<String, String>,
    /// Normalized qualified keys of the nested collections.
    collections: FxHashSet<String>,
}

/// Qualifies `name` with the collections in `scope`.
fn join(scope: &[String], name: &str) -> String {
    qualify(&scope.join(&QUALIFIER_SEPARATOR.to_string()), name)
}

impl SymbolTable {
    //--------------------------------------------------------------------------
    // Definition collection
    //--------------------------------------------------------------------------

    fn collect(&mut self, symbols: SymbolMap, scope: &mut Vec<String>, env: &mut PassEnv) {
        for entry in symbols {
            let qualified = join(scope, &entry.name);
            let key = SymbolMap::normalize(&qualified);
            let (kind, pos) = entry.grammar.into_parts();
            match kind {
                GrammarKind::Collection(members) => {
                    self.collections.insert(key);
                    scope.push(entry.name);
                    self.collect(members, scope, env);
                    scope.pop();
                }
                kind => {
                    if self.names.contains_key(&key) {
                        env.error(MessageKind::AmbiguousSymbol { name: qualified }, pos.as_ref());
                        continue;
                    }
                    log::trace!("Collected definition `{}`", qualified);
                    self.names.insert(key, qualified.clone());
                    self.definitions.push(DefinitionInfo {
                        name: qualified,
                        grammar: Grammar::new(kind).at(pos),
                        scope: scope.clone(),
                    });
                }
            }
        }
    }

    //--------------------------------------------------------------------------
    // Embed resolution
    //--------------------------------------------------------------------------

    /// Finds the qualified name that `name`, written inside `scope`, refers to.
    ///
    /// The innermost scope is searched first. A name that denotes a
    /// collection refers to that collection's default symbol.
    fn lookup(&self, name: &str, scope: &[String]) -> Option<&str> {
        for depth in (0..=scope.len()).rev() {
            let key = SymbolMap::normalize(&join(&scope[..depth], name));
            if let Some(found) = self.names.get(&key) {
                return Some(found);
            }
            if self.collections.contains(&key) {
                let all_key = qualify(&key, ALL_SYMBOL);
                if let Some(found) = self.names.get(&all_key) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn resolve_embeds(&self, grammar: Grammar, scope: &[String], env: &mut PassEnv) -> Result<Grammar, InternalError> {
        grammar.transform_bottom_up(env, &mut |node: Grammar, env: &mut PassEnv| {
            let GrammarKind::Embed { symbol } = node.kind() else {
                return Ok(node);
            };
            let pos = node.pos().cloned();
            match self.lookup(symbol, scope) {
                Some(qualified) => {
                    log::trace!("Resolved `{}` to `{}`", symbol, qualified);
                    Ok(Grammar::embed(qualified).at(pos))
                }
                None => {
                    env.error(MessageKind::UnresolvedSymbol { name: symbol.clone() }, pos.as_ref());
                    Ok(Grammar::null().at(pos))
                }
            }
        })
    }
}
