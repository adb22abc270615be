//! Map loading.

use std::path::{Path, PathBuf};

use crate::codec;
use crate::core::{MapMetaData, MapOrigin, OccupancyGrid, validate_resolution};
use crate::descriptor::MapDescriptor;
use crate::error::Result;
use crate::occupancy::{Thresholds, raster_to_cells};

/// Parameters for turning a raster into a grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadParams {
    /// Meters per cell
    pub resolution: f64,
    /// Pose of cell (0, 0)
    pub origin: MapOrigin,
    /// Classification thresholds
    pub thresholds: Thresholds,
}

impl LoadParams {
    /// Default thresholds at the given resolution and origin
    pub fn new(resolution: f64, origin: MapOrigin) -> Self {
        Self {
            resolution,
            origin,
            thresholds: Thresholds::default(),
        }
    }

    /// Replace the thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Parameters recorded in a descriptor
    pub fn from_descriptor(descriptor: &MapDescriptor) -> Self {
        Self {
            resolution: descriptor.resolution,
            origin: descriptor.origin,
            thresholds: descriptor.thresholds(),
        }
    }

    /// Range checks, done before touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        validate_resolution(self.resolution)?;
        self.thresholds.validate()
    }
}

/// Grid loaded through its descriptor
#[derive(Clone, Debug)]
pub struct LoadedMap {
    /// Descriptor as read from disk
    pub descriptor: MapDescriptor,
    /// Resolved raster path
    pub image_path: PathBuf,
    /// Decoded grid
    pub grid: OccupancyGrid,
}

/// Load a raster file as an occupancy grid.
///
/// Parameters are validated before the file is opened.
pub fn load_map_image(path: &Path, params: &LoadParams) -> Result<OccupancyGrid> {
    params.validate()?;

    let image = codec::read_raster(path)?;
    let cells = raster_to_cells(&image, &params.thresholds);
    let info = MapMetaData::new(params.resolution, image.width(), image.height(), params.origin);
    let grid = OccupancyGrid::new(info, cells)?;

    let counts = grid.count_by_state();
    log::info!(
        "Loaded map {} ({}x{} @ {} m/cell): {} free, {} occupied, {} unknown",
        path.display(),
        grid.width(),
        grid.height(),
        grid.resolution(),
        counts.free,
        counts.occupied,
        counts.unknown
    );
    Ok(grid)
}

/// Load a map from its YAML descriptor.
pub fn load_map(descriptor_path: &Path) -> Result<LoadedMap> {
    let descriptor = MapDescriptor::read(descriptor_path)?;
    let image_path = descriptor.image_path(descriptor_path);
    log::debug!(
        "Descriptor {} points at {}",
        descriptor_path.display(),
        image_path.display()
    );

    let grid = load_map_image(&image_path, &LoadParams::from_descriptor(&descriptor))?;
    Ok(LoadedMap {
        descriptor,
        image_path,
        grid,
    })
}
