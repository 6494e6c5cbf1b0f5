//! Layer file reader

mod binary_reader;
mod forecast_point_reader;
mod multipoint_reader;
mod record;
mod swe_station_reader;
mod text_reader;

pub use binary_reader::BinaryRecordReader;
pub use forecast_point_reader::ForecastPointReader;
pub use multipoint_reader::MultiPointReader;
pub use record::{RawRecord, RecordFields, RecordSource};
pub use swe_station_reader::{split_elevation, SweStationReader};
pub use text_reader::{encoding_for_label, TextLineReader};

use crate::attributes::{AttributeRecord, AttributeTable};
use crate::error::{LayerError, Result};
use crate::geometry::{Shape, ShapeGeometry};
use crate::io::format::{
    classify_with_byte_order, BinaryByteOrder, DatasetSpec, Encoding, FieldSource, TextLayout,
};
use crate::layer::Layer;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::BoundingBox2D;
use byteorder::{BigEndian, LittleEndian};
use encoding_rs::Encoding as TextEncoding;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Configuration for the layer reader.
#[derive(Debug, Clone)]
pub struct LayerReaderConfiguration {
    /// When `false`, no attribute table is built and readers skip attribute
    /// extraction. Geometry is decoded the same either way.
    ///
    /// Default: `true`.
    pub capture_attributes: bool,

    /// Byte order of `.bin` files. Never taken from the running host.
    ///
    /// Default: big-endian.
    pub byte_order: BinaryByteOrder,

    /// Fallback for names that are not valid UTF-8. `None` means Latin-1.
    pub text_encoding: Option<&'static TextEncoding>,
}

impl Default for LayerReaderConfiguration {
    fn default() -> Self {
        Self {
            capture_attributes: true,
            byte_order: BinaryByteOrder::BigEndian,
            text_encoding: None,
        }
    }
}

impl LayerReaderConfiguration {
    /// Default configuration with attribute capture switched on or off
    pub fn with_attributes(capture_attributes: bool) -> Self {
        Self {
            capture_attributes,
            ..Self::default()
        }
    }

    /// Use the encoding named by `label` for non-UTF-8 text.
    ///
    /// Unknown labels leave the configuration unchanged and return `false`.
    pub fn set_text_encoding(&mut self, label: &str) -> bool {
        match encoding_for_label(label) {
            Some(encoding) => {
                self.text_encoding = encoding;
                true
            }
            None => {
                tracing::warn!(label, "Unknown text encoding label, keeping current fallback");
                false
            }
        }
    }
}

/// Decoder for one layer file
pub struct LayerReader {
    path: PathBuf,
    file_name: String,
    input: Box<dyn Read + Send>,
    config: LayerReaderConfiguration,
}

impl std::fmt::Debug for LayerReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerReader")
            .field("path", &self.path)
            .field("file_name", &self.file_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LayerReader {
    /// Open a layer file.
    ///
    /// The base file name is classified before the file is opened, so an
    /// unsupported name fails with [`LayerError::UnsupportedFormat`] without
    /// touching the file system.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = base_file_name(path)?;
        if !crate::io::format::is_supported_file(&file_name) {
            return Err(LayerError::UnsupportedFormat(file_name));
        }

        let file = File::open(path).map_err(|e| LayerError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            input: Box::new(file),
            config: LayerReaderConfiguration::default(),
        })
    }

    /// Decode from any reader; `file_name` selects the dataset
    pub fn from_reader<R: Read + Send + 'static>(file_name: &str, reader: R) -> Result<Self> {
        if !crate::io::format::is_supported_file(file_name) {
            return Err(LayerError::UnsupportedFormat(file_name.to_string()));
        }
        Ok(Self {
            path: PathBuf::from(file_name),
            file_name: file_name.to_string(),
            input: Box::new(reader),
            config: LayerReaderConfiguration::default(),
        })
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: LayerReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read every record and assemble the layer
    pub fn read(self) -> Result<Layer> {
        let LayerReader {
            path,
            file_name,
            input,
            config,
        } = self;
        let (dataset, encoding) = classify_with_byte_order(&file_name, config.byte_order)
            .ok_or(LayerError::UnsupportedFormat(file_name))?;
        let spec = dataset.spec();

        tracing::debug!(
            path = %path.display(),
            dataset = %dataset,
            encoding = %encoding,
            capture_attributes = config.capture_attributes,
            "Reading layer"
        );

        let mut source = record_source(input, spec, encoding, &config);
        let mut builder = LayerBuilder::new(spec, encoding, config.capture_attributes);
        let mut notifications = NotificationCollection::new();

        loop {
            match source.next_record(&mut notifications) {
                Ok(Some(record)) => builder.push(record),
                Ok(None) => break,
                Err(e) if builder.is_empty() => return Err(LayerError::io(path, e)),
                Err(e) => {
                    notifications.notify(
                        NotificationType::ReadError,
                        format!(
                            "{}: read failed after {} shape(s): {}",
                            path.display(),
                            builder.len(),
                            e
                        ),
                    );
                    break;
                }
            }
        }

        let layer = builder.finish(notifications);
        tracing::debug!(
            dataset = %dataset,
            shapes = layer.len(),
            notifications = layer.notifications().len(),
            "Layer decoded"
        );
        Ok(layer)
    }
}

/// Pick the record reader for a classified file
fn record_source(
    input: Box<dyn Read + Send>,
    spec: &'static DatasetSpec,
    encoding: Encoding,
    config: &LayerReaderConfiguration,
) -> Box<dyn RecordSource> {
    let capture = config.capture_attributes;
    let text_encoding = config.text_encoding;
    let stream = BufReader::new(input);

    match encoding {
        Encoding::BinaryBigEndian => Box::new(BinaryRecordReader::<_, BigEndian>::new(
            stream,
            spec,
            capture,
            text_encoding,
        )),
        Encoding::BinaryLittleEndian => Box::new(BinaryRecordReader::<_, LittleEndian>::new(
            stream,
            spec,
            capture,
            text_encoding,
        )),
        Encoding::Ascii => {
            let lines = TextLineReader::new(stream, text_encoding);
            match spec.text_layout {
                TextLayout::MultiPoint => Box::new(MultiPointReader::new(lines, spec, capture)),
                TextLayout::FixedColumnPoint => {
                    Box::new(ForecastPointReader::new(lines, spec, capture))
                }
                TextLayout::DelimitedPoint => Box::new(SweStationReader::new(lines, spec, capture)),
            }
        }
    }
}

fn base_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| LayerError::InvalidPath(path.to_path_buf()))
}

/// Folds raw records into shapes, attribute rows and the layer extent
struct LayerBuilder {
    spec: &'static DatasetSpec,
    encoding: Encoding,
    capture_attributes: bool,
    shapes: Vec<Shape>,
    attributes: Option<AttributeTable>,
    bounds: BoundingBox2D,
}

impl LayerBuilder {
    fn new(spec: &'static DatasetSpec, encoding: Encoding, capture_attributes: bool) -> Self {
        let attributes = if capture_attributes && !Self::schema_from_first_row(spec) {
            Some(AttributeTable::with_fields(
                spec.fields.iter().map(|f| f.to_field_def()),
            ))
        } else {
            None
        };

        Self {
            spec,
            encoding,
            capture_attributes,
            shapes: Vec::new(),
            attributes,
            bounds: BoundingBox2D::EMPTY,
        }
    }

    /// Datasets whose elevation column is named by the first data row
    fn schema_from_first_row(spec: &DatasetSpec) -> bool {
        spec.field_for(FieldSource::Elevation).is_some()
    }

    /// Schema of a deferred dataset, named after the unit of `first`
    fn inferred_schema(spec: &'static DatasetSpec, first: &RecordFields) -> AttributeTable {
        AttributeTable::with_fields(spec.fields.iter().map(|f| {
            if f.source == FieldSource::Elevation && !first.elevation_unit.is_empty() {
                f.to_field_def_named(format!(
                    "{}_{}",
                    f.name,
                    first.elevation_unit.to_uppercase()
                ))
            } else {
                f.to_field_def()
            }
        }))
    }

    fn len(&self) -> usize {
        self.shapes.len()
    }

    fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn push(&mut self, record: RawRecord) {
        let geometry = match ShapeGeometry::from_vertices(self.spec.geometry_kind, record.vertices) {
            Some(geometry) => geometry,
            None => return,
        };
        let shape = Shape::new(self.shapes.len(), geometry);
        self.bounds = self.bounds.merge(&shape.bounds());
        self.shapes.push(shape);

        if self.capture_attributes {
            let fields = record.fields.unwrap_or_default();
            let spec = self.spec;
            let table = self
                .attributes
                .get_or_insert_with(|| Self::inferred_schema(spec, &fields));
            let values = spec.fields.iter().map(|f| fields.value(f.source)).collect();
            table.push_record(AttributeRecord::new(values));
        }
    }

    fn finish(self, notifications: NotificationCollection) -> Layer {
        let spec = self.spec;
        let attributes = if self.capture_attributes {
            Some(self.attributes.unwrap_or_else(|| {
                AttributeTable::with_fields(spec.fields.iter().map(|f| f.to_field_def()))
            }))
        } else {
            None
        };

        Layer {
            dataset: spec.kind,
            encoding: self.encoding,
            geometry_kind: spec.geometry_kind,
            shapes: self.shapes,
            attributes,
            bounds: self.bounds,
            coordinate_reference: self.encoding.coordinate_reference(),
            notifications,
        }
    }
}

/// Read one layer file with the default configuration
pub fn read_layer<P: AsRef<Path>>(path: P, capture_attributes: bool) -> Result<Layer> {
    LayerReader::from_file(path)?
        .with_configuration(LayerReaderConfiguration::with_attributes(capture_attributes))
        .read()
}

/// Read several layer files in parallel.
///
/// Each file is decoded independently; results keep the order of `paths`.
pub fn read_layers<P>(paths: &[P], config: &LayerReaderConfiguration) -> Vec<Result<Layer>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            LayerReader::from_file(path)?
                .with_configuration(config.clone())
                .read()
        })
        .collect()
}
