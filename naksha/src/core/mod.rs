//! Core value types.
//!
//! - [`RasterImage`]: decoded pixel buffer, row 0 at the top
//! - [`OccupancyGrid`]: tri-state grid, row 0 at the bottom
//! - [`CellState`]: free / occupied / unknown
//! - [`MapOrigin`]: pose of cell (0, 0) in the world frame
//!
//! The two row conventions differ on purpose: image rows grow downward while
//! the map frame's Y axis grows upward, so grid row `y` is raster row
//! `height - 1 - y`.

mod cell;
mod grid;
mod origin;
mod raster;

pub use cell::{CellCounts, CellState, FREE_OCCUPANCY_MAX, OCCUPIED_OCCUPANCY_MIN};
pub use grid::{DEFAULT_FRAME_ID, MapMetaData, OccupancyGrid};
pub use origin::MapOrigin;
pub use raster::{PixelLayout, RasterImage};

pub(crate) use grid::validate_resolution;
pub(crate) use raster::sample_count;
