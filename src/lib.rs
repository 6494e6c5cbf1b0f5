//! # hydrolayer
//!
//! A pure Rust decoder for the legacy hydrologic map layers used by river
//! forecast tooling: counties, states, rivers, basins, RFC boundaries,
//! forecast points and snow-water-equivalent stations.
//!
//! ## Features
//!
//! - Dataset and encoding chosen from the file name alone
//! - ASCII files (whitespace, fixed-column and comma-delimited layouts)
//! - Binary files with an explicit big- or little-endian byte order
//! - Per-shape and per-layer bounding boxes
//! - Lenient decoding: malformed lines are skipped and reported as
//!   notifications instead of failing the read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hydrolayer::{read_layer, FieldValue};
//!
//! let layer = read_layer("maps/river.dat", true)?;
//! println!("{}", layer);
//!
//! for shape in layer.shapes() {
//!     let name = layer.value(shape.index(), "NAME");
//!     println!("{:?}: {} vertices, {}", name, shape.vertices().len(), shape.bounds());
//! }
//! # Ok::<(), hydrolayer::LayerError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::format`] - file name registry and the static per-dataset table
//! - [`io::reader`] - record readers behind the `RecordSource` trait, and
//!   the `LayerReader` that assembles them into a [`Layer`]
//! - [`geometry`], [`attributes`], [`types`] - the decoded values

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod attributes;
pub mod error;
pub mod geometry;
pub mod io;
pub mod layer;
pub mod notification;
pub mod types;

pub use error::{LayerError, Result};
pub use types::{BoundingBox2D, Vector2};

pub use attributes::{AttributeRecord, AttributeTable, FieldDef, FieldType, FieldValue};
pub use geometry::{GeometryKind, Shape, ShapeGeometry};
pub use layer::{CoordinateReference, Layer};
pub use notification::{Notification, NotificationCollection, NotificationType};

pub use io::{
    classify, classify_with_byte_order, is_supported_file, read_layer, read_layers,
    BinaryByteOrder, DatasetKind, Encoding, LayerReader, LayerReaderConfiguration,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
