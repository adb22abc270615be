//! Pixel ⇄ occupancy mapping.
//!
//! ## Forward (raster → grid)
//!
//! For each pixel:
//! 1. Fully transparent (alpha = 0) → `Unknown`
//! 2. `mean` = average of the color channels, alpha excluded
//! 3. Occupancy score `o = (max - mean) / max`, or `mean / max` when negated
//! 4. `o > occupied` → `Occupied`, else `o < free` → `Free`, else `Unknown`
//!
//! Dark pixels are obstacles unless `negate` is set. A score exactly on a
//! threshold is `Unknown`.
//!
//! ## Inverse (grid → raster)
//!
//! | Cell       | Pixel |
//! |------------|-------|
//! | `Occupied` | 0     |
//! | `Free`     | 254   |
//! | `Unknown`  | 205   |
//!
//! Both directions flip rows: grid row `y` is raster row `height - 1 - y`.

use serde::{Deserialize, Serialize};

use crate::core::{CellState, OccupancyGrid, PixelLayout, RasterImage};
use crate::error::{Error, Result};

/// Occupied threshold written when none is supplied
pub const DEFAULT_OCCUPIED_THRESH: f64 = 0.65;

/// Free threshold written when none is supplied
pub const DEFAULT_FREE_THRESH: f64 = 0.1;

/// Pixel written for occupied cells
pub const OCCUPIED_PIXEL: u16 = 0;

/// Pixel written for free cells
pub const FREE_PIXEL: u16 = 254;

/// Pixel written for unknown cells
pub const UNKNOWN_PIXEL: u16 = 205;

/// Classification parameters for the forward mapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Scores strictly above this are occupied
    pub occupied: f64,
    /// Scores strictly below this are free
    pub free: f64,
    /// Light pixels are obstacles instead of dark ones
    pub negate: bool,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            occupied: DEFAULT_OCCUPIED_THRESH,
            free: DEFAULT_FREE_THRESH,
            negate: false,
        }
    }
}

impl Thresholds {
    /// Create thresholds
    pub fn new(occupied: f64, free: f64, negate: bool) -> Self {
        Self {
            occupied,
            free,
            negate,
        }
    }

    /// Both thresholds lie in `[0, 1]`.
    ///
    /// Ordering is not checked: with `free > occupied` every score is
    /// classified as occupied or free and no cell comes out unknown.
    pub fn validate(&self) -> Result<()> {
        check_unit_range("occupied_thresh", self.occupied)?;
        check_unit_range("free_thresh", self.free)?;
        if self.free > self.occupied {
            log::warn!(
                "free_thresh {} is above occupied_thresh {}",
                self.free,
                self.occupied
            );
        }
        Ok(())
    }

    /// Classify an occupancy score
    #[inline]
    pub fn classify(&self, score: f64) -> CellState {
        if score > self.occupied {
            CellState::Occupied
        } else if score < self.free {
            CellState::Free
        } else {
            CellState::Unknown
        }
    }
}

pub(crate) fn check_unit_range(field: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::validation(
            field,
            format!("must be within [0, 1], got {}", value),
        ));
    }
    Ok(())
}

/// Occupancy score of one pixel, or `None` if it is fully transparent.
#[inline]
pub fn occupancy_score(
    pixel: &[u16],
    layout: PixelLayout,
    max_value: u16,
    negate: bool,
) -> Option<f64> {
    if layout.has_alpha() && pixel[layout.channels() - 1] == 0 {
        return None;
    }

    let color = &pixel[..layout.color_channels()];
    let sum: u32 = color.iter().map(|&s| u32::from(s)).sum();
    let mean = sum as f64 / color.len() as f64;
    let max = f64::from(max_value);

    // Subtract before dividing so exact fractions stay exact
    Some(if negate { mean / max } else { (max - mean) / max })
}

/// Forward mapping: classify every pixel into grid order.
pub fn raster_to_cells(image: &RasterImage, thresholds: &Thresholds) -> Vec<CellState> {
    let (width, height) = (image.width(), image.height());
    let mut cells = Vec::with_capacity(width as usize * height as usize);

    for gy in 0..height {
        let ry = height - 1 - gy;
        for x in 0..width {
            let pixel = image.pixel(x, ry);
            let cell = occupancy_score(pixel, image.layout(), image.max_value(), thresholds.negate)
                .map_or(CellState::Unknown, |score| thresholds.classify(score));
            cells.push(cell);
        }
    }

    cells
}

/// Fixed palette value for a cell
#[inline]
pub fn cell_to_pixel(state: CellState) -> u16 {
    match state {
        CellState::Occupied => OCCUPIED_PIXEL,
        CellState::Free => FREE_PIXEL,
        CellState::Unknown => UNKNOWN_PIXEL,
    }
}

/// Inverse mapping: render a grid as an 8-bit gray raster.
pub fn grid_to_raster(grid: &OccupancyGrid) -> RasterImage {
    let (width, height) = (grid.width(), grid.height());
    let cells = grid.cells();
    let mut samples = Vec::with_capacity(cells.len());

    for ry in 0..height as usize {
        let gy = height as usize - 1 - ry;
        let row = &cells[gy * width as usize..(gy + 1) * width as usize];
        samples.extend(row.iter().map(|&c| cell_to_pixel(c)));
    }

    RasterImage::from_parts(width, height, PixelLayout::Gray, u8::MAX.into(), samples)
}
