//! Map loading and saving.
//!
//! ## Loading
//!
//! ```rust,ignore
//! use naksha::io::{load_map, load_map_image, LoadParams};
//! use naksha::MapOrigin;
//! use std::path::Path;
//!
//! // Through a descriptor (resolution, origin, thresholds come from YAML)
//! let loaded = load_map(Path::new("maps/office.yaml"))?;
//!
//! // Or straight from a raster with explicit parameters
//! let params = LoadParams::new(0.05, MapOrigin::new(-10.0, -10.0, 0.0));
//! let grid = load_map_image(Path::new("maps/office.pgm"), &params)?;
//! ```
//!
//! ## Saving
//!
//! ```rust,ignore
//! use naksha::io::save_map;
//! use naksha::RasterFormat;
//!
//! // Creates office.png and office.yaml
//! let saved = save_map(&grid, Path::new("maps/office"), RasterFormat::Png)?;
//! ```
//!
//! Neither call holds state between invocations. Callers must not run two
//! saves against the same base path concurrently.

mod loader;
mod saver;

pub use loader::{LoadParams, LoadedMap, load_map, load_map_image};
pub use saver::{SaveOptions, SavedMap, save_map, save_map_with};
