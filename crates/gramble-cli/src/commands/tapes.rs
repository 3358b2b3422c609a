use std::path::Path;

use gramble_driver::{CompileConfig, CompiledGrammar};

use crate::commands::compile_grammar;
use crate::error::CliError;

pub fn handle_tapes(file: &Path, symbol: Option<&str>, config: &CompileConfig) -> Result<(), CliError> {
    let compiled = compile_grammar(file, config)?;
    print!("{}", render_tapes(&compiled, symbol)?);
    Ok(())
}

/// One `name: {tapes}` line per symbol, or just the requested one.
fn render_tapes(compiled: &CompiledGrammar, symbol: Option<&str>) -> Result<String, CliError> {
    let names: Vec<&str> = match symbol {
        Some(name) => {
            if compiled.symbol(name).is_none() {
                return Err(CliError::UnknownSymbol { name: name.to_string() });
            }
            vec![name]
        }
        None => compiled.symbol_names().collect(),
    };

    let mut out = String::new();
    for name in names {
        let tapes = compiled.tapes_of(name).map(ToString::to_string).unwrap_or_default();
        out.push_str(&format!("{}: {}\n", name, tapes));
    }
    Ok(out)
}
