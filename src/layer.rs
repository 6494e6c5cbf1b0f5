//! The decoded layer handed to downstream renderers

use crate::attributes::{AttributeRecord, AttributeTable, FieldValue};
use crate::geometry::{GeometryKind, Shape};
use crate::io::format::{DatasetKind, Encoding};
use crate::notification::NotificationCollection;
use crate::types::BoundingBox2D;
use std::fmt;

/// Coordinate reference a renderer must project a layer from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateReference {
    /// Latitude / positive-west longitude in degrees
    Geographic,
    /// Hydrologic Rainfall Analysis Project polar-stereographic grid
    Hrap,
}

impl fmt::Display for CoordinateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geographic => write!(f, "Geographic"),
            Self::Hrap => write!(f, "HRAP"),
        }
    }
}

/// Shapes, attributes and extent decoded from one dataset file.
///
/// A layer is built once by [`LayerReader`](crate::LayerReader) and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(crate) dataset: DatasetKind,
    pub(crate) encoding: Encoding,
    pub(crate) geometry_kind: GeometryKind,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) attributes: Option<AttributeTable>,
    pub(crate) bounds: BoundingBox2D,
    pub(crate) coordinate_reference: CoordinateReference,
    pub(crate) notifications: NotificationCollection,
}

impl Layer {
    pub fn dataset(&self) -> DatasetKind {
        self.dataset
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Geometry kind of every shape
    pub fn geometry_kind(&self) -> GeometryKind {
        self.geometry_kind
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Attribute table, `None` when attribute capture was disabled
    pub fn attributes(&self) -> Option<&AttributeTable> {
        self.attributes.as_ref()
    }

    /// Attribute record of a shape
    pub fn record(&self, index: usize) -> Option<&AttributeRecord> {
        self.attributes.as_ref()?.record(index)
    }

    /// Named attribute value of a shape
    pub fn value(&self, index: usize, field: &str) -> Option<&FieldValue> {
        self.attributes.as_ref()?.value(index, field)
    }

    /// Union of all shape extents, [`BoundingBox2D::EMPTY`] for no shapes
    pub fn bounds(&self) -> BoundingBox2D {
        self.bounds
    }

    pub fn coordinate_reference(&self) -> CoordinateReference {
        self.coordinate_reference
    }

    /// Malformations recovered while reading
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} layer ({}, {}): {} {} shape(s), {}",
            self.dataset,
            self.encoding,
            self.coordinate_reference,
            self.shapes.len(),
            self.geometry_kind,
            self.bounds
        )
    }
}
