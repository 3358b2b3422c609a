use std::path::Path;

use gramble_driver::{CompileConfig, CompileOutput};

use crate::commands::compile;
use crate::error::CliError;

pub fn handle_check(file: &Path, config: &CompileConfig) -> Result<(), CliError> {
    let output = compile(file, config)?;
    verdict(&output, config.compile.fail_on_warnings)?;
    println!("✅ {} checked successfully.", file.display());
    Ok(())
}

/// Turns a finished compilation into the command's exit status.
fn verdict(output: &CompileOutput, fail_on_warnings: bool) -> Result<(), CliError> {
    if let Err(err) = &output.result {
        return Err(err.clone().into());
    }
    if output.failed(fail_on_warnings) {
        return Err(CliError::CheckFailed {
            errors: output.errors().count(),
            warnings: output.warnings().count(),
        });
    }
    Ok(())
}
