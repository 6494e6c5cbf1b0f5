//! File-name registry of the supported layer datasets.
//!
//! Every per-dataset fact (file names, geometry kind, coordinate convention,
//! text layout and attribute schema) lives in the static [`DatasetSpec`]
//! table below, so the readers stay generic across datasets.

use crate::attributes::{FieldDef, FieldType};
use crate::geometry::GeometryKind;
use crate::layer::CoordinateReference;
use crate::types::Vector2;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::fmt;

/// The family of legacy map datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    County,
    ForecastGroupBasin,
    ForecastPoint,
    MapBasin,
    RfcBoundary,
    River,
    State,
    SweStation,
}

impl DatasetKind {
    /// Every dataset kind
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::County,
        DatasetKind::ForecastGroupBasin,
        DatasetKind::ForecastPoint,
        DatasetKind::MapBasin,
        DatasetKind::RfcBoundary,
        DatasetKind::River,
        DatasetKind::State,
        DatasetKind::SweStation,
    ];

    /// Static description of this dataset
    pub fn spec(self) -> &'static DatasetSpec {
        match self {
            DatasetKind::County => &COUNTY,
            DatasetKind::ForecastGroupBasin => &FG_BASIN,
            DatasetKind::ForecastPoint => &FORECAST_POINT,
            DatasetKind::MapBasin => &MAP_BASIN,
            DatasetKind::RfcBoundary => &RFC_BOUNDARY,
            DatasetKind::River => &RIVER,
            DatasetKind::State => &STATE,
            DatasetKind::SweStation => &SWE_STATION,
        }
    }

    /// File name of this dataset in the given encoding, if it exists
    pub fn file_name(self, encoding: Encoding) -> Option<&'static str> {
        let spec = self.spec();
        if encoding.is_binary() {
            spec.binary_name
        } else {
            Some(spec.ascii_name)
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatasetKind::County => "County",
            DatasetKind::ForecastGroupBasin => "ForecastGroupBasin",
            DatasetKind::ForecastPoint => "ForecastPoint",
            DatasetKind::MapBasin => "MapBasin",
            DatasetKind::RfcBoundary => "RfcBoundary",
            DatasetKind::River => "River",
            DatasetKind::State => "State",
            DatasetKind::SweStation => "SweStation",
        };
        write!(f, "{}", name)
    }
}

/// Physical encoding of a layer file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    BinaryBigEndian,
    BinaryLittleEndian,
}

impl Encoding {
    pub fn is_binary(self) -> bool {
        !matches!(self, Encoding::Ascii)
    }

    /// Coordinate reference of layers stored in this encoding
    pub fn coordinate_reference(self) -> CoordinateReference {
        match self {
            Encoding::Ascii => CoordinateReference::Geographic,
            Encoding::BinaryBigEndian | Encoding::BinaryLittleEndian => CoordinateReference::Hrap,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Ascii => write!(f, "ASCII"),
            Encoding::BinaryBigEndian => write!(f, "Binary (big-endian)"),
            Encoding::BinaryLittleEndian => write!(f, "Binary (little-endian)"),
        }
    }
}

/// Declared byte order of binary layer files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinaryByteOrder {
    /// Order the legacy files were produced with
    #[default]
    BigEndian,
    LittleEndian,
}

impl From<BinaryByteOrder> for Encoding {
    fn from(order: BinaryByteOrder) -> Self {
        match order {
            BinaryByteOrder::BigEndian => Encoding::BinaryBigEndian,
            BinaryByteOrder::LittleEndian => Encoding::BinaryLittleEndian,
        }
    }
}

/// How the two coordinate tokens of a text vertex map to `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateConvention {
    /// `x y`
    XY,
    /// `lat long`, with `x = -long`
    LatNegatedLong,
    /// `lat long` used as-is
    LatLong,
}

impl CoordinateConvention {
    /// Map the two tokens of a vertex, in file order, to a coordinate
    pub fn to_vector(self, first: f64, second: f64) -> Vector2 {
        match self {
            CoordinateConvention::XY => Vector2::new(first, second),
            CoordinateConvention::LatNegatedLong => Vector2::new(-second, first),
            CoordinateConvention::LatLong => Vector2::new(second, first),
        }
    }
}

/// Record structure of the text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLayout {
    /// Header line `tok0 tok1 tok2 count` followed by `count` vertex lines
    MultiPoint,
    /// Fixed columns for the names, then two coordinate tokens
    FixedColumnPoint,
    /// Six comma-separated fields per line, `#` comments
    DelimitedPoint,
}

/// Where a column's value comes from in a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// Header token 0 / binary ID
    Id,
    /// Header token 1 / binary NAME / point name
    Name,
    /// Header token 2 / binary ORDER
    Order,
    State,
    BaseStation,
    Elevation,
}

/// Static column description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub width: u16,
    pub precision: u8,
    pub source: FieldSource,
}

impl FieldSpec {
    const fn string(name: &'static str, width: u16, source: FieldSource) -> Self {
        FieldSpec {
            name,
            field_type: FieldType::String,
            width,
            precision: 0,
            source,
        }
    }

    const fn number(name: &'static str, width: u16, precision: u8, source: FieldSource) -> Self {
        FieldSpec {
            name,
            field_type: FieldType::Number,
            width,
            precision,
            source,
        }
    }

    /// Column definition under its own name
    pub fn to_field_def(&self) -> FieldDef {
        self.to_field_def_named(self.name)
    }

    /// Column definition under another name
    pub fn to_field_def_named(&self, name: impl Into<String>) -> FieldDef {
        match self.field_type {
            FieldType::String => FieldDef::string(name, self.width),
            FieldType::Number => FieldDef::number(name, self.width, self.precision),
        }
    }
}

/// Everything the readers need to know about one dataset
#[derive(Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    pub kind: DatasetKind,
    pub ascii_name: &'static str,
    pub binary_name: Option<&'static str>,
    pub geometry_kind: GeometryKind,
    pub text_layout: TextLayout,
    /// Coordinate mapping of the text encoding; binary coordinates are as-is
    pub text_convention: CoordinateConvention,
    pub fields: &'static [FieldSpec],
}

impl DatasetSpec {
    /// Field whose value comes from the given source
    pub fn field_for(&self, source: FieldSource) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.source == source)
    }
}

const ID_NAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("ID", 9, FieldSource::Id),
    FieldSpec::string("NAME", 21, FieldSource::Name),
];

const RFC_FIELDS: &[FieldSpec] = &[FieldSpec::string("NAME", 9, FieldSource::Id)];

const RIVER_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("REACH", 9, FieldSource::Id),
    FieldSpec::string("NAME", 21, FieldSource::Name),
    FieldSpec::number("ORDER", 4, 0, FieldSource::Order),
];

const FORECAST_POINT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("NAME", 20, FieldSource::Name),
    FieldSpec::string("STATE", 7, FieldSource::State),
    FieldSpec::string("ID", 20, FieldSource::Id),
];

/// `ELEV` is renamed from the first data row's unit suffix.
const SWE_STATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("ID", 10, FieldSource::Id),
    FieldSpec::number("ELEV", 8, 0, FieldSource::Elevation),
    FieldSpec::string("BASE_ID", 10, FieldSource::BaseStation),
    FieldSpec::string("NAME", 40, FieldSource::Name),
];

static COUNTY: DatasetSpec = DatasetSpec {
    kind: DatasetKind::County,
    ascii_name: "county.dat",
    binary_name: Some("county.bin"),
    geometry_kind: GeometryKind::Polyline,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::XY,
    fields: ID_NAME_FIELDS,
};

static FG_BASIN: DatasetSpec = DatasetSpec {
    kind: DatasetKind::ForecastGroupBasin,
    ascii_name: "fg_basin.dat",
    binary_name: Some("fg_basin.bin"),
    geometry_kind: GeometryKind::Polygon,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: ID_NAME_FIELDS,
};

static MAP_BASIN: DatasetSpec = DatasetSpec {
    kind: DatasetKind::MapBasin,
    ascii_name: "map_basin.dat",
    binary_name: Some("map_basin.bin"),
    geometry_kind: GeometryKind::Polygon,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: ID_NAME_FIELDS,
};

static RFC_BOUNDARY: DatasetSpec = DatasetSpec {
    kind: DatasetKind::RfcBoundary,
    ascii_name: "rfc_boundary.dat",
    binary_name: Some("rfc_boundary.bin"),
    geometry_kind: GeometryKind::Polygon,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: RFC_FIELDS,
};

static RIVER: DatasetSpec = DatasetSpec {
    kind: DatasetKind::River,
    ascii_name: "river.dat",
    binary_name: Some("river.bin"),
    geometry_kind: GeometryKind::Polyline,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: RIVER_FIELDS,
};

static STATE: DatasetSpec = DatasetSpec {
    kind: DatasetKind::State,
    ascii_name: "state.dat",
    binary_name: Some("state.bin"),
    geometry_kind: GeometryKind::Polyline,
    text_layout: TextLayout::MultiPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: ID_NAME_FIELDS,
};

static FORECAST_POINT: DatasetSpec = DatasetSpec {
    kind: DatasetKind::ForecastPoint,
    ascii_name: "forecastpt.dat",
    binary_name: None,
    geometry_kind: GeometryKind::Point,
    text_layout: TextLayout::FixedColumnPoint,
    text_convention: CoordinateConvention::LatNegatedLong,
    fields: FORECAST_POINT_FIELDS,
};

static SWE_STATION: DatasetSpec = DatasetSpec {
    kind: DatasetKind::SweStation,
    ascii_name: "swe_stations.dat",
    binary_name: None,
    geometry_kind: GeometryKind::Point,
    text_layout: TextLayout::DelimitedPoint,
    text_convention: CoordinateConvention::LatLong,
    fields: SWE_STATION_FIELDS,
};

/// Base file name → (dataset, is binary)
static FILE_NAMES: Lazy<AHashMap<&'static str, (DatasetKind, bool)>> = Lazy::new(|| {
    let mut names = AHashMap::new();
    for kind in DatasetKind::ALL {
        let spec = kind.spec();
        names.insert(spec.ascii_name, (kind, false));
        if let Some(binary_name) = spec.binary_name {
            names.insert(binary_name, (kind, true));
        }
    }
    names
});

/// Classify a base file name, reading binary files as big-endian.
///
/// Matching is exact and case-sensitive. The file is never opened.
pub fn classify(filename: &str) -> Option<(DatasetKind, Encoding)> {
    classify_with_byte_order(filename, BinaryByteOrder::default())
}

/// Classify a base file name with an explicit byte order for binary files
pub fn classify_with_byte_order(
    filename: &str,
    byte_order: BinaryByteOrder,
) -> Option<(DatasetKind, Encoding)> {
    let (kind, binary) = *FILE_NAMES.get(filename)?;
    let encoding = if binary {
        Encoding::from(byte_order)
    } else {
        Encoding::Ascii
    };
    Some((kind, encoding))
}

/// True when `filename` names a supported layer file
pub fn is_supported_file(filename: &str) -> bool {
    classify(filename).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_names() {
        assert_eq!(classify("county.dat"), Some((DatasetKind::County, Encoding::Ascii)));
        assert_eq!(
            classify("county.bin"),
            Some((DatasetKind::County, Encoding::BinaryBigEndian))
        );
        assert_eq!(
            classify_with_byte_order("river.bin", BinaryByteOrder::LittleEndian),
            Some((DatasetKind::River, Encoding::BinaryLittleEndian))
        );
        assert_eq!(
            classify_with_byte_order("river.dat", BinaryByteOrder::LittleEndian),
            Some((DatasetKind::River, Encoding::Ascii))
        );
        assert_eq!(
            classify("swe_stations.dat"),
            Some((DatasetKind::SweStation, Encoding::Ascii))
        );
    }

    #[test]
    fn test_classify_unknown_names() {
        assert_eq!(classify("unknown.dat"), None);
        assert_eq!(classify("County.dat"), None);
        assert_eq!(classify("forecastpt.bin"), None);
        assert_eq!(classify("swe_stations.bin"), None);
        assert_eq!(classify("data/county.dat"), None);
        assert!(!is_supported_file(""));
    }

    #[test]
    fn test_registry_has_fourteen_names() {
        assert_eq!(FILE_NAMES.len(), 14);
        for kind in DatasetKind::ALL {
            assert_eq!(kind.spec().kind, kind);
            assert!(is_supported_file(kind.spec().ascii_name));
        }
    }

    #[test]
    fn test_file_name_round_trip() {
        for kind in DatasetKind::ALL {
            for encoding in [Encoding::Ascii, Encoding::BinaryBigEndian] {
                if let Some(name) = kind.file_name(encoding) {
                    assert_eq!(classify(name), Some((kind, encoding)));
                }
            }
        }
        assert_eq!(DatasetKind::ForecastPoint.file_name(Encoding::BinaryLittleEndian), None);
    }

    #[test]
    fn test_geometry_kinds() {
        assert_eq!(DatasetKind::River.spec().geometry_kind, GeometryKind::Polyline);
        assert_eq!(DatasetKind::State.spec().geometry_kind, GeometryKind::Polyline);
        assert_eq!(DatasetKind::County.spec().geometry_kind, GeometryKind::Polyline);
        assert_eq!(DatasetKind::MapBasin.spec().geometry_kind, GeometryKind::Polygon);
        assert_eq!(DatasetKind::ForecastGroupBasin.spec().geometry_kind, GeometryKind::Polygon);
        assert_eq!(DatasetKind::RfcBoundary.spec().geometry_kind, GeometryKind::Polygon);
        assert_eq!(DatasetKind::ForecastPoint.spec().geometry_kind, GeometryKind::Point);
        assert_eq!(DatasetKind::SweStation.spec().geometry_kind, GeometryKind::Point);
    }

    #[test]
    fn test_coordinate_conventions() {
        let v = CoordinateConvention::LatNegatedLong.to_vector(40.0, -105.0);
        assert_eq!(v, Vector2::new(105.0, 40.0));
        let v = CoordinateConvention::XY.to_vector(1.5, 2.5);
        assert_eq!(v, Vector2::new(1.5, 2.5));
        let v = CoordinateConvention::LatLong.to_vector(39.5, -106.2);
        assert_eq!(v, Vector2::new(-106.2, 39.5));
    }

    #[test]
    fn test_coordinate_reference_by_encoding() {
        assert_eq!(Encoding::Ascii.coordinate_reference(), CoordinateReference::Geographic);
        assert_eq!(Encoding::BinaryBigEndian.coordinate_reference(), CoordinateReference::Hrap);
        assert_eq!(Encoding::BinaryLittleEndian.coordinate_reference(), CoordinateReference::Hrap);
    }
}
