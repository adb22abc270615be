//! Map descriptor (ROS map_server YAML format).
//!
//! ```yaml
//! image: office.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! negate: 0
//! occupied_thresh: 0.65
//! free_thresh: 0.1
//! format: pgm          # optional, naksha extension
//! ```
//!
//! `image` is relative to the descriptor's directory unless absolute.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::RasterFormat;
use crate::core::{MapOrigin, OccupancyGrid, validate_resolution};
use crate::error::{Error, Result};
use crate::occupancy::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, Thresholds, check_unit_range};

/// Map descriptor fields
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    /// Raster filename
    pub image: String,

    /// Meters per pixel
    pub resolution: f64,

    /// Pose of the bottom-left pixel
    pub origin: MapOrigin,

    /// Light pixels are obstacles
    #[serde(
        default,
        serialize_with = "serialize_negate",
        deserialize_with = "deserialize_negate"
    )]
    pub negate: bool,

    /// Scores above this are occupied
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f64,

    /// Scores below this are free
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f64,

    /// Raster format; detected from file content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RasterFormat>,
}

fn default_occupied_thresh() -> f64 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f64 {
    DEFAULT_FREE_THRESH
}

/// `negate` is written as 0/1; booleans are accepted too.
fn serialize_negate<S: Serializer>(
    negate: &bool,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*negate))
}

fn deserialize_negate<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(n) => Err(D::Error::custom(format!("negate must be 0 or 1, got {}", n))),
    }
}

impl MapDescriptor {
    /// Descriptor for saving `grid` to the raster file `image`
    pub fn for_grid(
        grid: &OccupancyGrid,
        image: impl Into<String>,
        format: RasterFormat,
        thresholds: &Thresholds,
    ) -> Self {
        Self {
            image: image.into(),
            resolution: grid.resolution(),
            origin: grid.origin(),
            negate: thresholds.negate,
            occupied_thresh: thresholds.occupied,
            free_thresh: thresholds.free,
            format: Some(format),
        }
    }

    /// Parse and validate descriptor text.
    pub fn parse(text: &str) -> Result<Self> {
        let descriptor: Self =
            serde_yaml::from_str(text).map_err(|e| Error::Descriptor(e.to_string()))?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Read and parse a descriptor file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    /// Check field ranges. Threshold ordering is not enforced.
    pub fn validate(&self) -> Result<()> {
        validate_resolution(self.resolution)?;
        check_unit_range("occupied_thresh", self.occupied_thresh)?;
        check_unit_range("free_thresh", self.free_thresh)?;
        if self.image.trim().is_empty() {
            return Err(Error::validation("image", "filename is empty"));
        }
        if !self.origin.is_finite() {
            return Err(Error::validation("origin", "components must be finite"));
        }
        Ok(())
    }

    /// Serialize to descriptor text.
    ///
    /// Floats are written in their shortest exact form, so the output parses
    /// back to an equal descriptor.
    pub fn serialize(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Descriptor(e.to_string()))
    }

    /// Classification parameters
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.occupied_thresh, self.free_thresh, self.negate)
    }

    /// Raster path, resolved against the descriptor's directory
    pub fn image_path(&self, descriptor_path: &Path) -> PathBuf {
        let image = Path::new(&self.image);
        if image.is_absolute() {
            return image.to_path_buf();
        }
        descriptor_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(image)
    }
}
