//! Node configuration file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigLoadError;
use crate::codec::RasterFormat;
use crate::io::SaveOptions;
use crate::occupancy::Thresholds;

/// Default config file looked up by [`NodeConfig::load_default`]
pub const DEFAULT_CONFIG_PATH: &str = "naksha.toml";

/// Map serving section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSection {
    /// Descriptor to serve; may be given on the command line instead
    #[serde(default)]
    pub descriptor: Option<String>,

    /// Frame id stamped on served grids
    #[serde(default = "defaults::frame_id")]
    pub frame_id: String,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            descriptor: None,
            frame_id: defaults::frame_id(),
        }
    }
}

/// Map saving section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaverSection {
    /// Output base path, without extension
    #[serde(default = "defaults::output_base")]
    pub output: String,

    /// Raster format: "pgm" or "png"
    #[serde(default = "defaults::output_format")]
    pub format: RasterFormat,

    /// Occupied threshold written to the descriptor
    #[serde(default = "defaults::occupied_thresh")]
    pub occupied_thresh: f64,

    /// Free threshold written to the descriptor
    #[serde(default = "defaults::free_thresh")]
    pub free_thresh: f64,

    /// How long to wait for a map snapshot (seconds)
    #[serde(default = "defaults::wait_timeout_secs")]
    pub wait_timeout_secs: f64,
}

impl Default for SaverSection {
    fn default() -> Self {
        Self {
            output: defaults::output_base(),
            format: defaults::output_format(),
            occupied_thresh: defaults::occupied_thresh(),
            free_thresh: defaults::free_thresh(),
            wait_timeout_secs: defaults::wait_timeout_secs(),
        }
    }
}

impl SaverSection {
    /// Save options for this section
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            format: self.format,
            thresholds: Thresholds::new(self.occupied_thresh, self.free_thresh, false),
        }
    }

    /// Snapshot wait timeout
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.wait_timeout_secs)
    }
}

/// Full node configuration loaded from TOML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Map serving settings
    #[serde(default)]
    pub map: MapSection,

    /// Map saving settings
    #[serde(default)]
    pub saver: SaverSection,
}

impl NodeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Load from `naksha.toml` in the working directory, or use defaults
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML text
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Range checks
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.saver
            .save_options()
            .thresholds
            .validate()
            .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;

        let timeout = self.saver.wait_timeout_secs;
        if !(timeout.is_finite() && timeout > 0.0) {
            return Err(ConfigLoadError::Invalid(format!(
                "saver.wait_timeout_secs must be > 0, got {}",
                timeout
            )));
        }
        if self.map.frame_id.is_empty() {
            return Err(ConfigLoadError::Invalid("map.frame_id is empty".to_string()));
        }
        Ok(())
    }
}
