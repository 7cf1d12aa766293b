use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{ChoreError, ChoreResult};

/// File name looked up by [`ChoreConfig::load`]
pub const CONFIG_FILE_NAME: &str = "chore.yml";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChoreConfig {
    #[serde(default)]
    pub color: ColorChoice,
    #[serde(default)]
    pub http: HttpConfig,
}

/// When console output is coloured
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpConfig {
    pub user_agent: Option<String>,
    /// Request timeout. Unset means requests never time out.
    pub timeout_secs: Option<u64>,
}

pub fn parse_chore_config(yaml_str: &str) -> ChoreResult<ChoreConfig> {
    let config: ChoreConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

impl ChoreConfig {
    /// Read `chore.yml` from `dir`, falling back to defaults when it is absent
    pub fn load(dir: &Path) -> ChoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ChoreError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        parse_chore_config(&content).map_err(|e| {
            ChoreError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}
