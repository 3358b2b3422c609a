use std::path::{Path, PathBuf};

use gramble_source::{CompileConfig, CONFIG_FILE_NAME};
use gramble_tst::TstNode;

use crate::error::{convert_io_error, CliError};

pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| convert_io_error(e, path.to_path_buf()))
}

/// Reads a JSON-serialized tabular syntax tree.
pub fn read_tst(path: &Path) -> Result<TstNode, CliError> {
    let contents = read_file(path)?;
    let root = serde_json::from_str(&contents).map_err(|source| CliError::JsonError {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read syntax tree from {}", path.display());
    Ok(root)
}

/// Loads the configuration named on the command line, or `gramble.toml` in
/// `dir` when it exists. Without either the defaults apply.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<CompileConfig, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default: PathBuf = dir.join(CONFIG_FILE_NAME);
            if !default.is_file() {
                log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                return Ok(CompileConfig::default());
            }
            default
        }
    };
    Ok(CompileConfig::load(&path)?)
}
