//! Database configuration via `stratavec.toml`
//!
//! All fields are optional in the file; anything left out takes its default.
//! Values are validated eagerly on load, so a bad config fails at open time
//! rather than on the first operation that reads it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stratavec_core::{DistanceMetric, VectorError, VectorResult};

/// Config file name placed in the database data directory.
pub const CONFIG_FILE_NAME: &str = "stratavec.toml";

/// Default upper bound on collection dimension.
pub const DEFAULT_MAX_DIMENSION: usize = 65536;

/// Database configuration loaded from `stratavec.toml`.
///
/// # Example
///
/// ```toml
/// # Metric used when a collection is created without one: "cosine" or "l2"
/// default_metric = "cosine"
/// max_dimension = 65536
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratavecConfig {
    /// Metric for new collections: `"cosine"` or `"l2"`.
    #[serde(default = "default_metric_str")]
    pub default_metric: String,
    /// Largest dimension accepted by `create_collection`.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: usize,
}

fn default_metric_str() -> String {
    DistanceMetric::default().name().to_string()
}

fn default_max_dimension() -> usize {
    DEFAULT_MAX_DIMENSION
}

impl Default for StratavecConfig {
    fn default() -> Self {
        Self {
            default_metric: default_metric_str(),
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl StratavecConfig {
    /// Parse the metric string into a `DistanceMetric`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known metric name.
    pub fn metric(&self) -> VectorResult<DistanceMetric> {
        DistanceMetric::parse(&self.default_metric).ok_or_else(|| {
            VectorError::Config(format!(
                "Invalid default_metric '{}' in {}. Expected \"cosine\" or \"l2\".",
                self.default_metric, CONFIG_FILE_NAME
            ))
        })
    }

    /// Check every field.
    pub fn validate(&self) -> VectorResult<()> {
        self.metric()?;
        if self.max_dimension == 0 {
            return Err(VectorError::Config(
                "max_dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# stratavec configuration
#
# Distance metric for collections created without an explicit one.
#   "cosine" (default) = 1 - cosine similarity, range [0, 2]
#   "l2"               = Euclidean distance
default_metric = "cosine"

# Largest embedding dimension accepted when creating a collection.
max_dimension = 65536
"#
    }

    /// Parse and validate config from a TOML string.
    pub fn from_toml_str(content: &str) -> VectorResult<Self> {
        let config: StratavecConfig = toml::from_str(content)
            .map_err(|e| VectorError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> VectorResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VectorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StratavecConfig = toml::from_str(&content).map_err(|e| {
            VectorError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> VectorResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                VectorError::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> VectorResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VectorError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            VectorError::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
