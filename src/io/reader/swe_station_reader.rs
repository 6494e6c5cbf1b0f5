//! Comma-delimited reader for `swe_stations.dat`.
//!
//! ```text
//! # ID,Lat,Lon,Elev,Base,Name
//! S1,39.5,-106.2,4200FT,BASE1,Station One
//! ```

use super::record::{RawRecord, RecordFields, RecordSource};
use super::text_reader::TextLineReader;
use crate::io::format::DatasetSpec;
use crate::notification::{NotificationCollection, NotificationType};
use std::io::{self, BufRead};

const FIELD_COUNT: usize = 6;

/// Split an elevation token into its numeric prefix and unit suffix.
///
/// The split is at the first character that is not an ASCII digit:
/// `"4200FT"` gives `(Some(4200.0), "FT")`, `"4200"` gives `(Some(4200.0), "")`.
/// An empty prefix yields `None`.
pub fn split_elevation(token: &str) -> (Option<f64>, &str) {
    let token = token.trim();
    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (magnitude, unit) = token.split_at(split);
    (magnitude.parse::<f64>().ok(), unit.trim())
}

/// Snow-water-equivalent station reader
pub struct SweStationReader<R: BufRead> {
    lines: TextLineReader<R>,
    spec: &'static DatasetSpec,
    capture_attributes: bool,
}

impl<R: BufRead> SweStationReader<R> {
    pub fn new(lines: TextLineReader<R>, spec: &'static DatasetSpec, capture_attributes: bool) -> Self {
        Self {
            lines,
            spec,
            capture_attributes,
        }
    }

    fn skip(&self, notifications: &mut NotificationCollection, reason: &str) {
        notifications.notify(
            NotificationType::SkippedLine,
            format!(
                "{} line {}: {}",
                self.spec.ascii_name,
                self.lines.line_number(),
                reason
            ),
        );
    }
}

impl<R: BufRead> RecordSource for SweStationReader<R> {
    fn next_record(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<RawRecord>> {
        while let Some(line) = self.lines.read_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != FIELD_COUNT {
                self.skip(
                    notifications,
                    &format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
                );
                continue;
            }

            let (latitude, longitude) =
                match (fields[1].parse::<f64>(), fields[2].parse::<f64>()) {
                    (Ok(latitude), Ok(longitude)) => (latitude, longitude),
                    _ => {
                        self.skip(notifications, "invalid latitude or longitude");
                        continue;
                    }
                };

            let record_fields = if self.capture_attributes {
                let (elevation, unit) = split_elevation(fields[3]);
                Some(RecordFields {
                    id: Some(fields[0].to_string()),
                    elevation,
                    elevation_unit: unit.to_string(),
                    base_station: Some(fields[4].to_string()),
                    name: Some(fields[5].to_string()),
                    ..Default::default()
                })
            } else {
                None
            };

            return Ok(Some(RawRecord {
                vertices: vec![self.spec.text_convention.to_vector(latitude, longitude)],
                fields: record_fields,
            }));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::DatasetKind;
    use crate::types::Vector2;
    use std::io::Cursor;

    fn read_all(data: &str) -> (Vec<RawRecord>, NotificationCollection) {
        let lines = TextLineReader::new(Cursor::new(data.as_bytes().to_vec()), None);
        let mut reader = SweStationReader::new(lines, DatasetKind::SweStation.spec(), true);
        let mut notifications = NotificationCollection::new();
        let mut records = Vec::new();
        while let Some(record) = reader.next_record(&mut notifications).unwrap() {
            records.push(record);
        }
        (records, notifications)
    }

    #[test]
    fn test_split_elevation() {
        assert_eq!(split_elevation("4200FT"), (Some(4200.0), "FT"));
        assert_eq!(split_elevation(" 1280 m "), (Some(1280.0), "m"));
        assert_eq!(split_elevation("4200"), (Some(4200.0), ""));
        assert_eq!(split_elevation("FT"), (None, "FT"));
        assert_eq!(split_elevation(""), (None, ""));
    }

    #[test]
    fn test_station_line() {
        let (records, notifications) = read_all("S1,39.5,-106.2,4200FT,BASE1,Station One\n");
        assert!(notifications.is_empty());
        assert_eq!(records[0].vertices, vec![Vector2::new(-106.2, 39.5)]);
        let fields = records[0].fields.as_ref().unwrap();
        assert_eq!(fields.id.as_deref(), Some("S1"));
        assert_eq!(fields.elevation, Some(4200.0));
        assert_eq!(fields.elevation_unit, "FT");
        assert_eq!(fields.base_station.as_deref(), Some("BASE1"));
        assert_eq!(fields.name.as_deref(), Some("Station One"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let data = "# header comment\n\n   # indented comment\nS2,40,-105,5000,B,Two\n";
        let (records, notifications) = read_all(data);
        assert_eq!(records.len(), 1);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_wrong_field_count_skipped() {
        let data = "S1,39.5,-106.2,4200FT,BASE1\nS2,39.5,-106.2,4200FT,BASE1,Two,extra\nS3,39,-106,1,B,Three\n";
        let (records, notifications) = read_all(data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields.as_ref().unwrap().id.as_deref(), Some("S3"));
        assert_eq!(notifications.count_of(NotificationType::SkippedLine), 2);
    }

    #[test]
    fn test_bad_coordinates_skipped() {
        let (records, notifications) = read_all("S1,north,-106.2,4200FT,BASE1,One\n");
        assert!(records.is_empty());
        assert_eq!(notifications.len(), 1);
    }
}
