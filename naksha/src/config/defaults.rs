//! Default value functions for serde deserialization.

use crate::codec::RasterFormat;
use crate::occupancy::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH};

pub fn frame_id() -> String {
    crate::core::DEFAULT_FRAME_ID.to_string()
}

pub fn output_base() -> String {
    "map".to_string()
}

pub fn output_format() -> RasterFormat {
    RasterFormat::Pgm
}

pub fn occupied_thresh() -> f64 {
    DEFAULT_OCCUPIED_THRESH
}

pub fn free_thresh() -> f64 {
    DEFAULT_FREE_THRESH
}

pub fn wait_timeout_secs() -> f64 {
    5.0
}
