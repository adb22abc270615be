//! # Naksha
//!
//! Occupancy grid map server: converts between raster map images with a YAML
//! descriptor and in-memory tri-state occupancy grids.
//!
//! ## Pipeline
//!
//! ```text
//! load:  raster bytes ─ codec::decode ─> RasterImage ─ occupancy::raster_to_cells ─> OccupancyGrid
//! save:  OccupancyGrid ─ occupancy::grid_to_raster ─> RasterImage ─ codec::encode ─> raster bytes
//!                                                                  + MapDescriptor ─> YAML
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use naksha::{load_map, save_map, RasterFormat};
//! use std::path::Path;
//!
//! let loaded = load_map(Path::new("maps/office.yaml"))?;
//! println!("{}x{} cells", loaded.grid.width(), loaded.grid.height());
//!
//! // Writes office_copy.png + office_copy.yaml
//! save_map(&loaded.grid, Path::new("maps/office_copy"), RasterFormat::Png)?;
//! ```
//!
//! ## Coordinate System
//!
//! Grid cell (0, 0) is the bottom-left corner of the map and sits at the
//! descriptor's `origin`. Raster row 0 is the top of the image, so the last
//! raster row becomes grid row 0.

#![warn(missing_docs)]

// Value types
pub mod core;

// Error taxonomy
pub mod error;

// Raster codecs (PGM, PNG)
pub mod codec;

// YAML map descriptor
pub mod descriptor;

// Pixel <-> occupancy mapping
pub mod occupancy;

// Load / save orchestration
pub mod io;

// In-process server, saver, topics
pub mod node;

// Node configuration
pub mod config;

pub use crate::core::{
    CellCounts, CellState, MapMetaData, MapOrigin, OccupancyGrid, PixelLayout, RasterImage,
};

pub use codec::RasterFormat;

pub use descriptor::MapDescriptor;

pub use error::{Error, Result};

pub use io::{
    LoadParams, LoadedMap, SaveOptions, SavedMap, load_map, load_map_image, save_map, save_map_with,
};

pub use node::{MapSaver, MapServer, Topic};

pub use occupancy::Thresholds;

pub use config::{ConfigLoadError, NodeConfig};
