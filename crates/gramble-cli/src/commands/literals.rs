use std::path::Path;

use gramble_driver::{CompileConfig, LiteralMap};

use crate::commands::compile_grammar;
use crate::error::CliError;

pub fn handle_literals(file: &Path, config: &CompileConfig) -> Result<(), CliError> {
    let compiled = compile_grammar(file, config)?;
    print!("{}", render_literals(&compiled.literals));
    Ok(())
}

fn render_literals(literals: &LiteralMap) -> String {
    if literals.is_empty() {
        return "(no test inputs)\n".to_string();
    }
    literals.to_string()
}
