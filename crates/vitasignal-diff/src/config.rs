use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, Result};
use crate::line_diff::MAX_DIFF_LINES;

/// Settings for the line diff algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Number of lines per side that take part in alignment. Lines past
    /// the cap are never compared.
    pub max_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_DIFF_LINES,
        }
    }
}

/// Settings for turning a diff into text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix each line with its line number.
    pub line_numbers: bool,
    /// When set, only changed regions are printed, each surrounded by
    /// this many unchanged lines.
    pub context: Option<usize>,
    /// Render old and new side by side instead of unified.
    pub side_by_side: bool,
    /// Emit ANSI colors. Only the CLI honors this.
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            context: None,
            side_by_side: false,
            color: true,
        }
    }
}

/// Top-level configuration, usually loaded from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diff: DiffConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), max_lines = config.diff.max_lines, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.diff.max_lines == 0 {
            return Err(DiffError::InvalidConfig(
                "diff.max_lines must be at least 1".into(),
            ));
        }
        if self.diff.max_lines > MAX_DIFF_LINES {
            return Err(DiffError::InvalidConfig(format!(
                "diff.max_lines must be at most {MAX_DIFF_LINES}, got {}",
                self.diff.max_lines
            )));
        }
        Ok(())
    }
}
