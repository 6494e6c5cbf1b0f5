//! Raw record type shared by the text and binary readers

use crate::attributes::FieldValue;
use crate::io::format::FieldSource;
use crate::notification::NotificationCollection;
use crate::types::Vector2;
use std::io;

/// Attribute values of one raw record, keyed by where they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFields {
    pub id: Option<String>,
    pub name: Option<String>,
    pub order: Option<f64>,
    pub state: Option<String>,
    pub base_station: Option<String>,
    pub elevation: Option<f64>,
    /// Unit suffix of the elevation token, empty when there was none
    pub elevation_unit: String,
}

impl RecordFields {
    /// Attribute value for a column source.
    ///
    /// Missing strings become empty strings, missing numbers `Null`.
    pub fn value(&self, source: FieldSource) -> FieldValue {
        let text = |s: &Option<String>| FieldValue::String(s.clone().unwrap_or_default());
        match source {
            FieldSource::Id => text(&self.id),
            FieldSource::Name => text(&self.name),
            FieldSource::State => text(&self.state),
            FieldSource::BaseStation => text(&self.base_station),
            FieldSource::Order => FieldValue::from(self.order),
            FieldSource::Elevation => FieldValue::from(self.elevation),
        }
    }
}

/// One shape's worth of decoded data, before indexing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Vertices in file order, already in `(x, y)` convention
    pub vertices: Vec<Vector2>,
    /// `None` when attribute capture is disabled
    pub fields: Option<RecordFields>,
}

/// Lazy sequence of raw records from one layer file
pub trait RecordSource {
    /// Read the next record, `Ok(None)` at the end of the data.
    ///
    /// Malformed input is skipped and recorded in `notifications`; only
    /// failures of the underlying stream are returned as errors.
    fn next_record(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<RawRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        let fields = RecordFields::default();
        assert_eq!(fields.value(FieldSource::Name), FieldValue::String(String::new()));
        assert_eq!(fields.value(FieldSource::Order), FieldValue::Null);
    }

    #[test]
    fn test_present_values() {
        let fields = RecordFields {
            id: Some("R1".to_string()),
            order: Some(3.0),
            ..Default::default()
        };
        assert_eq!(fields.value(FieldSource::Id), FieldValue::from("R1"));
        assert_eq!(fields.value(FieldSource::Order), FieldValue::Number(3.0));
    }
}
