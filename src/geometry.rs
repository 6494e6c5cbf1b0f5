//! Shape geometries produced by the layer readers

use crate::types::{BoundingBox2D, Vector2};
use once_cell::sync::OnceCell;
use std::fmt;

/// Geometry kind shared by every shape of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    Polyline,
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "Point"),
            Self::Polyline => write!(f, "Polyline"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

/// Vertex data of a single shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Point(Vector2),
    Polyline(Vec<Vector2>),
    /// Ring vertices in file order; the ring is not explicitly closed.
    Polygon(Vec<Vector2>),
}

impl ShapeGeometry {
    /// Build a geometry of the given kind from a vertex list.
    ///
    /// A point takes the first vertex; `None` if `kind` is `Point` and no
    /// vertex is given.
    pub fn from_vertices(kind: GeometryKind, vertices: Vec<Vector2>) -> Option<Self> {
        match kind {
            GeometryKind::Point => vertices.into_iter().next().map(ShapeGeometry::Point),
            GeometryKind::Polyline => Some(ShapeGeometry::Polyline(vertices)),
            GeometryKind::Polygon => Some(ShapeGeometry::Polygon(vertices)),
        }
    }

    /// The kind of this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::Polyline(_) => GeometryKind::Polyline,
            Self::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// All vertices in file order
    pub fn vertices(&self) -> &[Vector2] {
        match self {
            Self::Point(point) => std::slice::from_ref(point),
            Self::Polyline(vertices) | Self::Polygon(vertices) => vertices,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }
}

/// One feature of a layer
#[derive(Debug, Clone)]
pub struct Shape {
    index: usize,
    geometry: ShapeGeometry,
    bounds: OnceCell<BoundingBox2D>,
}

impl Shape {
    /// Create a shape with its position in the layer
    pub fn new(index: usize, geometry: ShapeGeometry) -> Self {
        Shape {
            index,
            geometry,
            bounds: OnceCell::new(),
        }
    }

    /// Zero-based position in the layer
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    pub fn vertices(&self) -> &[Vector2] {
        self.geometry.vertices()
    }

    /// Extent of this shape's own vertices, computed on first use.
    ///
    /// A shape without vertices reports [`BoundingBox2D::EMPTY`].
    pub fn bounds(&self) -> BoundingBox2D {
        *self
            .bounds
            .get_or_init(|| BoundingBox2D::from_points(self.geometry.vertices()))
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.geometry == other.geometry
    }
}
