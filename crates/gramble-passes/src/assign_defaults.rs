use gramble_grammar::{Grammar, GrammarKind, SymbolMap};
use gramble_source::{qualify, InternalError, ALL_SYMBOL};

use crate::pass::{Pass, PassEnv, Transform};

/// Gives every collection a default symbol, `.all`.
///
/// `.all` is the alternation of all members of the collection in definition
/// order; a member `Inner` that is itself a collection contributes its own
/// default, `Inner..all`.
/// Collections that already define `.all` keep it, so running the pass twice
/// changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignDefaults;

fn default_symbol(symbols: &SymbolMap) -> Grammar {
    let members = symbols
        .iter()
        .map(|(name, grammar)| match grammar.kind() {
            GrammarKind::Collection(_) => Grammar::embed(qualify(name, ALL_SYMBOL)),
            _ => Grammar::embed(name),
        })
        .collect();
    Grammar::alt(members)
}

impl Pass for AssignDefaults {
    type Input = Grammar;
    type Output = Grammar;

    fn name(&self) -> &'static str {
        "assign-defaults"
    }

    fn transform(&self, input: Grammar, env: &mut PassEnv) -> Result<Grammar, InternalError> {
        input.transform_bottom_up(env, &mut |node: Grammar, _env: &mut PassEnv| {
            let (kind, pos) = node.into_parts();
            match kind {
                GrammarKind::Collection(mut symbols) if !symbols.contains(ALL_SYMBOL) => {
                    log::trace!("Adding {} over {} members", ALL_SYMBOL, symbols.len());
                    let all = default_symbol(&symbols).at(pos.clone());
                    symbols.insert(ALL_SYMBOL, all);
                    Ok(Grammar::collection(symbols).at(pos))
                }
                kind => Ok(Grammar::new(kind).at(pos)),
            }
        })
    }
}
