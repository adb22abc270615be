//! Map origin pose.

use serde::{Deserialize, Serialize};

/// Planar pose of cell (0, 0) in the world frame.
///
/// Serialized as a `[x, y, theta]` sequence, matching the map descriptor's
/// `origin` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct MapOrigin {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Rotation in radians, CCW positive
    pub theta: f64,
}

impl MapOrigin {
    /// Origin at (0, 0) with no rotation
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        theta: 0.0,
    };

    /// Create a new origin
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// All three components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

impl From<[f64; 3]> for MapOrigin {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<MapOrigin> for [f64; 3] {
    fn from(o: MapOrigin) -> Self {
        [o.x, o.y, o.theta]
    }
}
