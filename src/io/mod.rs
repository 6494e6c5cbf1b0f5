//! I/O module for reading legacy hydrologic layer files in ASCII and binary form

pub mod format;
pub mod reader;

pub use format::{
    classify, classify_with_byte_order, is_supported_file, BinaryByteOrder, DatasetKind,
    DatasetSpec, Encoding,
};
pub use reader::{
    encoding_for_label, read_layer, read_layers, LayerReader, LayerReaderConfiguration,
};
