//! Axis-aligned bounding box for shapes and layers

use super::Vector2;
use std::fmt;

/// 2D bounding box
///
/// [`BoundingBox2D::EMPTY`] is the identity of [`merge`](Self::merge): its
/// minimum is `+inf` and its maximum `-inf`, so folding any box into it
/// yields that box unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    /// Minimum point (lower-left corner)
    pub min: Vector2,
    /// Maximum point (upper-right corner)
    pub max: Vector2,
}

impl BoundingBox2D {
    /// Extent of a geometry or layer with no vertices
    pub const EMPTY: BoundingBox2D = BoundingBox2D {
        min: Vector2::new(f64::INFINITY, f64::INFINITY),
        max: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Create a new bounding box from min and max points
    pub fn new(min: Vector2, max: Vector2) -> Self {
        BoundingBox2D { min, max }
    }

    /// Create a bounding box from a single point
    pub fn from_point(point: Vector2) -> Self {
        BoundingBox2D {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing all given points, `EMPTY` for no points
    pub fn from_points(points: &[Vector2]) -> Self {
        points.iter().fold(Self::EMPTY, |bbox, point| bbox.including(*point))
    }

    /// True when the box contains no point at all
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Option<Vector2> {
        if self.is_empty() {
            return None;
        }
        Some(Vector2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        ))
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Copy of this box grown to include a point
    pub fn including(&self, point: Vector2) -> BoundingBox2D {
        BoundingBox2D {
            min: self.min.min(&point),
            max: self.max.max(&point),
        }
    }

    /// Union with another bounding box
    pub fn merge(&self, other: &BoundingBox2D) -> BoundingBox2D {
        BoundingBox2D {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for BoundingBox2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "BBox2D[empty]")
        } else {
            write!(f, "BBox2D[{} -> {}]", self.min, self.max)
        }
    }
}
