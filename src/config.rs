//! Analysis session configuration, loadable from and savable to TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RoughResult};

/// Per-session configuration for a [`KnowledgeBase`](crate::knowledge::KnowledgeBase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Tag attached to granules by `set_granules_untagged`.
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Largest relation group accepted by reduct and core search.
    /// `None` leaves the power-set enumeration unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduct_search_limit: Option<usize>,
}

fn default_tag() -> String {
    "element".into()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_tag: default_tag(),
            reduct_search_limit: None,
        }
    }
}

impl AnalysisConfig {
    /// Cap reduct and core search at `limit` relations.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.reduct_search_limit = Some(limit);
        self
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> RoughResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> RoughResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}
