//! Configuration loading.
//!
//! Settings come from an optional YAML file (`riskprop.yaml` in the working
//! directory, or an explicit path). Every field has a default, so a missing
//! file or a partial file is fine. A relative `graph-file` is taken relative
//! to the directory of the config file.
//!
//! ```yaml
//! graph-file: graph.json
//! propagation:
//!   max-depth: 3
//!   visit-budget: 500
//! filter:
//!   type: all
//!   min-risk: 0
//! ```

use crate::domain::MAX_RISK_SCORE;
use crate::error::{Error, Result};
use crate::graph::{DEFAULT_MAX_DEPTH, PropagationOptions, TypeFilter, ViewFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "riskprop.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Graph file to load when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_file: Option<PathBuf>,

    /// Propagation defaults
    pub propagation: PropagationConfig,

    /// View filter defaults
    pub filter: FilterConfig,
}

/// Propagation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PropagationConfig {
    /// Depth used when `--depth` is not given
    pub max_depth: usize,

    /// Cap on nodes discovered per propagation call
    pub visit_budget: Option<usize>,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            visit_budget: None,
        }
    }
}

/// Filter section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Node type to keep (`all` or a single type)
    #[serde(rename = "type")]
    pub node_type: TypeFilter,

    /// Minimum risk score to keep
    pub min_risk: u8,
}

impl Config {
    /// Parse configuration from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// A relative `graph-file` is resolved against the directory holding
    /// the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        if let Some(dir) = path.parent() {
            config.graph_file = config.graph_file.map(|file| dir.join(file));
        }
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load an explicit config file, or `riskprop.yaml` from `dir` if present.
    ///
    /// An explicit path must exist; the implicit one is optional.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            tracing::debug!(dir = %dir.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check value ranges that the types alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.filter.min_risk > MAX_RISK_SCORE {
            return Err(Error::Config(format!(
                "filter.min-risk must be at most {MAX_RISK_SCORE}, got {}",
                self.filter.min_risk
            )));
        }
        if self.propagation.visit_budget == Some(0) {
            return Err(Error::Config(
                "propagation.visit-budget must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Propagation options from this config.
    #[must_use]
    pub fn propagation_options(&self) -> PropagationOptions {
        PropagationOptions {
            max_depth: self.propagation.max_depth,
            visit_budget: self.propagation.visit_budget,
        }
    }

    /// View filter from this config.
    pub fn view_filter(&self) -> Result<ViewFilter> {
        ViewFilter::new(self.filter.node_type, self.filter.min_risk)
    }
}
