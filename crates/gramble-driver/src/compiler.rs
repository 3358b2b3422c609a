use gramble_passes::{AssignDefaults, CheckTestLiterals, InsertTables, Pass, PassOutput, TranslateTst};
use gramble_resolve::{extract_literals, CalculateTapes, LiteralMap, QualifyNames};
use gramble_source::{CompileConfig, InternalError};
use gramble_tst::TstNode;

use crate::output::{CompileOutput, CompiledGrammar};

/// Compiles tabular syntax trees with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompileConfig,
}

impl Compiler {
    pub fn new(config: CompileConfig) -> Self {
        Compiler { config }
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Runs the full pipeline over `root`.
    ///
    /// Problems in the input never stop compilation; they are returned as
    /// messages. Only an internal error makes `result` an `Err`, and the
    /// messages gathered up to that point are still returned.
    pub fn compile(&self, root: TstNode) -> CompileOutput {
        log::info!("Compiling grammar");
        let pipeline = InsertTables
            .compose(CheckTestLiterals)
            .compose(TranslateTst)
            .compose(AssignDefaults)
            .compose(QualifyNames)
            .compose(CalculateTapes);

        let PassOutput { output, messages, tests } =
            pipeline.get_env_and_transform(root, self.config.pass_options());

        let result = output.and_then(|grammar| {
            let literals = test_alphabet(&tests)?;
            Ok(CompiledGrammar { grammar, tests, literals })
        });

        match &result {
            Ok(compiled) => log::info!(
                "Compiled {} symbols and {} tests with {} messages",
                compiled.symbol_names().count(),
                compiled.tests.len(),
                messages.len()
            ),
            Err(err) => log::info!("Compilation failed: {}", err),
        }
        CompileOutput { result, messages }
    }
}

/// The literals of every test input, by tape.
fn test_alphabet(tests: &[gramble_passes::TestCase]) -> Result<LiteralMap, InternalError> {
    let mut literals = LiteralMap::new();
    for test in tests {
        literals.merge(extract_literals(&test.input)?);
    }
    log::debug!("Extracted test alphabet over {} tapes", literals.tapes().count());
    Ok(literals)
}
