//! Planar coordinate type shared by all geometries

use std::fmt;

/// A 2D map coordinate.
///
/// For Geographic layers `x` is positive-west longitude and `y` latitude, both
/// in degrees. For HRAP layers both are grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new coordinate
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Origin
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Component-wise minimum
    pub fn min(&self, other: &Vector2) -> Vector2 {
        Vector2::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    pub fn max(&self, other: &Vector2) -> Vector2 {
        Vector2::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Vector2::ZERO
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
