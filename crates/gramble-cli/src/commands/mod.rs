//! One module per subcommand. Each `handle_*` prints its result; the
//! `render_*` helpers build the text so it can be tested without a terminal.

mod check;
mod literals;
mod show;
mod tapes;

pub use check::handle_check;
pub use literals::handle_literals;
pub use show::handle_show;
pub use tapes::handle_tapes;

use std::fmt;
use std::path::Path;

use gramble_driver::{CompileConfig, CompileOutput, CompiledGrammar, Compiler, Message};
use miette::Diagnostic;

use crate::error::CliError;
use crate::io::read_tst;

/// Reads and compiles `file`, printing every message to stderr.
fn compile(file: &Path, config: &CompileConfig) -> Result<CompileOutput, CliError> {
    let root = read_tst(file)?;
    let output = Compiler::new(config.clone()).compile(root);
    report(&output.messages);
    Ok(output)
}

/// Like [`compile`], for commands that need the compiled grammar itself.
fn compile_grammar(file: &Path, config: &CompileConfig) -> Result<CompiledGrammar, CliError> {
    Ok(compile(file, config)?.result?)
}

fn report(messages: &[Message]) {
    for message in messages {
        eprintln!("{:?}", miette::Report::new(CellDiagnostic(message.clone())));
    }
}

/// A message prefixed with the cell it belongs to.
#[derive(Debug)]
struct CellDiagnostic(Message);

impl std::error::Error for CellDiagnostic {}

impl fmt::Display for CellDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.pos {
            Some(pos) => write!(f, "{}: {}", pos, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Diagnostic for CellDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help()
    }

    fn severity(&self) -> Option<miette::Severity> {
        Diagnostic::severity(&self.0)
    }
}
