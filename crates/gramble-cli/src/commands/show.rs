use std::path::Path;

use gramble_driver::{CompileConfig, CompiledGrammar};

use crate::commands::compile_grammar;
use crate::error::CliError;

pub fn handle_show(file: &Path, config: &CompileConfig) -> Result<(), CliError> {
    let compiled = compile_grammar(file, config)?;
    println!("{}", render_grammar(&compiled));
    Ok(())
}

/// The canonical text of the compiled symbol table.
fn render_grammar(compiled: &CompiledGrammar) -> String {
    compiled.grammar.to_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_utils::compiled;

    #[test]
    fn test_render_grammar() {
        assert_eq!(
            render_grammar(&compiled()),
            "(qual (Verbs.root (alt (seq text:walk gloss:walk) (seq text:jump gloss:jump))) \
             (Verbs..all (alt $Verbs.root)) (.all (alt $Verbs..all)))"
        );
    }
}
