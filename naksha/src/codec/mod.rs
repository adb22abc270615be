//! Raster file codecs.
//!
//! The supported formats are a closed set, dispatched by [`RasterFormat`]:
//!
//! | Format | Decode | Encode |
//! |--------|--------|--------|
//! | PGM    | `P2` (ASCII), `P5` (binary), 8 or 16 bit | `P5` gray, 8 or 16 bit |
//! | PNG    | gray, gray+alpha, RGB, RGBA; 8 or 16 bit | any layout, 8 or 16 bit |
//!
//! Decoding sniffs magic bytes, so the file extension does not matter.
//! Encoding is deterministic: the same raster always produces the same bytes.

pub mod pgm;
pub mod png;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::RasterImage;
use crate::error::{Error, Result};

/// Raster container format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// Portable graymap
    #[default]
    Pgm,
    /// Portable network graphics
    Png,
}

impl RasterFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Pgm => "pgm",
            RasterFormat::Png => "png",
        }
    }

    /// Identify a format from its leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&png::SIGNATURE) {
            Some(RasterFormat::Png)
        } else if bytes.starts_with(pgm::BINARY_MAGIC) || bytes.starts_with(pgm::ASCII_MAGIC) {
            Some(RasterFormat::Pgm)
        } else {
            None
        }
    }

    /// Guess a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RasterFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pgm" => Ok(RasterFormat::Pgm),
            "png" => Ok(RasterFormat::Png),
            other => Err(Error::validation(
                "format",
                format!("expected \"pgm\" or \"png\", got {:?}", other),
            )),
        }
    }
}

/// Decode raster bytes of any supported format.
pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
    match RasterFormat::detect(bytes) {
        Some(RasterFormat::Pgm) => pgm::decode(bytes),
        Some(RasterFormat::Png) => png::decode(bytes),
        None => {
            let head = &bytes[..bytes.len().min(8)];
            Err(Error::Format(format!("unrecognized magic bytes {:02x?}", head)))
        }
    }
}

/// Encode a raster in `format`.
pub fn encode(image: &RasterImage, format: RasterFormat) -> Result<Vec<u8>> {
    match format {
        RasterFormat::Pgm => pgm::encode(image),
        RasterFormat::Png => png::encode(image),
    }
}

/// Read and decode a raster file.
pub fn read_raster(path: &Path) -> Result<RasterImage> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    decode(&bytes)
}
