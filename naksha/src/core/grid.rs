//! Occupancy grid snapshot.

use serde::{Deserialize, Serialize};

use super::cell::{CellCounts, CellState};
use super::origin::MapOrigin;
use crate::error::{Error, Result};

/// Frame id attached to loaded grids unless overridden
pub const DEFAULT_FRAME_ID: &str = "map";

/// Grid geometry, published on its own as map metadata.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMetaData {
    /// Meters per cell
    pub resolution: f64,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Pose of cell (0, 0)
    pub origin: MapOrigin,
}

impl MapMetaData {
    /// Create metadata for a `width` x `height` grid
    pub fn new(resolution: f64, width: u32, height: u32, origin: MapOrigin) -> Self {
        Self {
            resolution,
            width,
            height,
            origin,
        }
    }

    /// Number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Check that `resolution` is a usable cell size.
pub(crate) fn validate_resolution(resolution: f64) -> Result<()> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(Error::validation(
            "resolution",
            format!("must be a finite value > 0, got {}", resolution),
        ));
    }
    Ok(())
}

/// Immutable tri-state occupancy grid.
///
/// Cells are row-major with row 0 at the bottom of the map (lowest world Y),
/// which is the last row of the raster it was decoded from.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    frame_id: String,
    info: MapMetaData,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Create a grid from its cells.
    ///
    /// Fails if the resolution is not positive, either dimension is zero, or
    /// the cell count does not match `info.width * info.height`.
    pub fn new(info: MapMetaData, cells: Vec<CellState>) -> Result<Self> {
        validate_resolution(info.resolution)?;
        if info.width == 0 {
            return Err(Error::validation("width", "grid must be at least one cell wide"));
        }
        if info.height == 0 {
            return Err(Error::validation("height", "grid must be at least one cell high"));
        }
        if !info.origin.is_finite() {
            return Err(Error::validation("origin", "components must be finite"));
        }
        if cells.len() != info.cell_count() {
            return Err(Error::validation(
                "cells",
                format!(
                    "{}x{} grid needs {} cells, got {}",
                    info.width,
                    info.height,
                    info.cell_count(),
                    cells.len()
                ),
            ));
        }
        Ok(Self {
            frame_id: DEFAULT_FRAME_ID.to_string(),
            info,
            cells,
        })
    }

    /// Create a grid with every cell set to `state`
    pub fn filled(info: MapMetaData, state: CellState) -> Result<Self> {
        Self::new(info, vec![state; info.cell_count()])
    }

    /// Create a grid from wire occupancy values (see [`CellState::from_occupancy`])
    pub fn from_occupancy_values(info: MapMetaData, values: &[i8]) -> Result<Self> {
        let cells = values.iter().map(|&v| CellState::from_occupancy(v)).collect();
        Self::new(info, cells)
    }

    /// Replace the frame id
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Coordinate frame the origin is expressed in
    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Grid geometry
    pub fn info(&self) -> &MapMetaData {
        &self.info
    }

    /// Width in cells
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Meters per cell
    pub fn resolution(&self) -> f64 {
        self.info.resolution
    }

    /// Pose of cell (0, 0)
    pub fn origin(&self) -> MapOrigin {
        self.info.origin
    }

    /// All cells, row-major, bottom row first
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Cell at grid coordinates, or `None` outside the grid
    pub fn get(&self, x: u32, y: u32) -> Option<CellState> {
        if x >= self.info.width || y >= self.info.height {
            return None;
        }
        self.cells
            .get(y as usize * self.info.width as usize + x as usize)
            .copied()
    }

    /// Cells as wire occupancy values
    pub fn occupancy_values(&self) -> Vec<i8> {
        self.cells.iter().map(|c| c.occupancy()).collect()
    }

    /// Count cells by state
    pub fn count_by_state(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell in &self.cells {
            counts.add(cell);
        }
        counts
    }
}
