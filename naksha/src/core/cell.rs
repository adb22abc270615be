//! Cell states for the occupancy grid.
//!
//! Loaded maps are tri-state: every cell is free, occupied, or unknown.
//! On the wire (map topics, `nav_msgs`-style consumers) the same states are
//! carried as signed occupancy values: `0`, `100` and `-1`.

use serde::{Deserialize, Serialize};

/// Occupancy value at or below which a wire cell counts as free.
pub const FREE_OCCUPANCY_MAX: i8 = 25;

/// Occupancy value at or above which a wire cell counts as occupied.
pub const OCCUPIED_OCCUPANCY_MIN: i8 = 65;

/// Tri-state cell occupancy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum CellState {
    /// Traversable space
    Free = 0,

    /// Obstacle
    Occupied = 100,

    /// Never observed, or between the two thresholds
    #[default]
    Unknown = -1,
}

impl CellState {
    /// Signed occupancy value used on the wire
    #[inline]
    pub fn occupancy(self) -> i8 {
        self as i8
    }

    /// Classify a wire occupancy value.
    ///
    /// Negative values are unknown; values in `0..=25` are free, values in
    /// `65..=100` occupied, and anything in between is unknown.
    #[inline]
    pub fn from_occupancy(value: i8) -> Self {
        match value {
            v if v < 0 => CellState::Unknown,
            v if v <= FREE_OCCUPANCY_MAX => CellState::Free,
            v if v >= OCCUPIED_OCCUPANCY_MIN => CellState::Occupied,
            _ => CellState::Unknown,
        }
    }

    /// Has this cell been classified?
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellState::Unknown
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Occupied => '#',
            CellState::Unknown => '?',
        }
    }
}

/// Cell counts by state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Free cells
    pub free: usize,
    /// Occupied cells
    pub occupied: usize,
    /// Unknown cells
    pub unknown: usize,
}

impl CellCounts {
    /// Total known cells.
    pub fn known(&self) -> usize {
        self.free + self.occupied
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.known() + self.unknown
    }

    pub(crate) fn add(&mut self, state: CellState) {
        match state {
            CellState::Free => self.free += 1,
            CellState::Occupied => self.occupied += 1,
            CellState::Unknown => self.unknown += 1,
        }
    }
}
