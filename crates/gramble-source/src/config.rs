use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default configuration filename looked up by the command-line tool.
pub const CONFIG_FILE_NAME: &str = "gramble.toml";

/// The contents of a `gramble.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CompileConfig {
    /// Compilation settings
    #[serde(default)]
    pub compile: CompileSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    /// Keep info-level messages in the compiler output
    #[serde(default = "default_true")]
    pub report_info: bool,

    /// Treat warnings as failures when deciding the exit status
    #[serde(default)]
    pub fail_on_warnings: bool,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            report_info: true,
            fail_on_warnings: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl CompileConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// The options threaded into every pass of a compilation run.
    pub fn pass_options(&self) -> PassOptions {
        PassOptions {
            report_info: self.compile.report_info,
        }
    }
}

/// Options available to passes through their environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    /// Whether info-level messages should be recorded at all.
    pub report_info: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self { report_info: true }
    }
}
