//! Header + vertex-list reader for the ASCII polyline and polygon datasets.
//!
//! ```text
//! R1 MainStem 3 4
//! 40.0 -105.0
//! 40.1 -105.1
//! 40.2 -105.2
//! 40.3 -105.3
//! ```
//!
//! A header needs at least four whitespace tokens, the fourth being the
//! vertex count. A bad header loses its whole shape; a bad vertex line loses
//! only that vertex.

use super::record::{RawRecord, RecordFields, RecordSource};
use super::text_reader::{parse_coordinate_pair, TextLineReader};
use crate::io::format::DatasetSpec;
use crate::notification::{NotificationCollection, NotificationType};
use std::io::{self, BufRead};

/// Upper bound on the vertex capacity reserved from a header's count
const MAX_PREALLOCATED_VERTICES: usize = 1 << 16;

struct ShapeHeader<'a> {
    tokens: Vec<&'a str>,
    vertex_count: usize,
}

fn parse_header(line: &str) -> Option<ShapeHeader<'_>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }
    let vertex_count = tokens[3].parse::<usize>().ok()?;
    Some(ShapeHeader {
        tokens,
        vertex_count,
    })
}

/// Reader for County, ForecastGroupBasin, MapBasin, RfcBoundary, River and
/// State text files
pub struct MultiPointReader<R: BufRead> {
    lines: TextLineReader<R>,
    spec: &'static DatasetSpec,
    capture_attributes: bool,
}

impl<R: BufRead> MultiPointReader<R> {
    pub fn new(lines: TextLineReader<R>, spec: &'static DatasetSpec, capture_attributes: bool) -> Self {
        Self {
            lines,
            spec,
            capture_attributes,
        }
    }

    fn header_fields(header: &ShapeHeader<'_>) -> RecordFields {
        RecordFields {
            id: Some(header.tokens[0].to_string()),
            name: Some(header.tokens[1].to_string()),
            order: header.tokens[2].parse::<f64>().ok(),
            ..Default::default()
        }
    }
}

impl<R: BufRead> RecordSource for MultiPointReader<R> {
    fn next_record(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<RawRecord>> {
        loop {
            let line = match self.lines.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            let header = match parse_header(&line) {
                Some(header) => header,
                None => {
                    if !line.trim().is_empty() {
                        notifications.notify(
                            NotificationType::SkippedLine,
                            format!(
                                "{} line {}: invalid shape header '{}'",
                                self.spec.ascii_name,
                                self.lines.line_number(),
                                line.trim()
                            ),
                        );
                    }
                    continue;
                }
            };

            let fields = if self.capture_attributes {
                Some(Self::header_fields(&header))
            } else {
                None
            };
            let vertex_count = header.vertex_count;
            let header_line = self.lines.line_number();

            let mut vertices = Vec::with_capacity(vertex_count.min(MAX_PREALLOCATED_VERTICES));
            for read in 0..vertex_count {
                let line = match self.lines.read_line()? {
                    Some(line) => line,
                    None => {
                        notifications.notify(
                            NotificationType::TruncatedShape,
                            format!(
                                "{} line {}: input ended after {} of {} vertices",
                                self.spec.ascii_name, header_line, read, vertex_count
                            ),
                        );
                        break;
                    }
                };
                match parse_coordinate_pair(&line) {
                    Some((first, second)) => {
                        vertices.push(self.spec.text_convention.to_vector(first, second));
                    }
                    None => notifications.notify(
                        NotificationType::DroppedVertex,
                        format!(
                            "{} line {}: invalid vertex '{}'",
                            self.spec.ascii_name,
                            self.lines.line_number(),
                            line.trim()
                        ),
                    ),
                }
            }

            return Ok(Some(RawRecord { vertices, fields }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::DatasetKind;
    use crate::types::Vector2;
    use std::io::Cursor;

    fn read_all(kind: DatasetKind, data: &str) -> (Vec<RawRecord>, NotificationCollection) {
        let lines = TextLineReader::new(Cursor::new(data.as_bytes().to_vec()), None);
        let mut reader = MultiPointReader::new(lines, kind.spec(), true);
        let mut notifications = NotificationCollection::new();
        let mut records = Vec::new();
        while let Some(record) = reader.next_record(&mut notifications).unwrap() {
            records.push(record);
        }
        (records, notifications)
    }

    #[test]
    fn test_river_record() {
        let data = "R1 MainStem 3 4\n40.0 -105.0\n40.1 -105.1\n40.2 -105.2\n40.3 -105.3\n";
        let (records, notifications) = read_all(DatasetKind::River, data);
        assert_eq!(records.len(), 1);
        assert!(notifications.is_empty());

        let record = &records[0];
        assert_eq!(record.vertices.len(), 4);
        assert_eq!(record.vertices[0], Vector2::new(105.0, 40.0));
        let fields = record.fields.as_ref().unwrap();
        assert_eq!(fields.id.as_deref(), Some("R1"));
        assert_eq!(fields.name.as_deref(), Some("MainStem"));
        assert_eq!(fields.order, Some(3.0));
    }

    #[test]
    fn test_county_reads_xy_directly() {
        let data = "08031 Denver x 2\n-104.9 39.7\n-105.0 39.8\n";
        let (records, _) = read_all(DatasetKind::County, data);
        assert_eq!(records[0].vertices[0], Vector2::new(-104.9, 39.7));
        assert_eq!(records[0].vertices[1], Vector2::new(-105.0, 39.8));
    }

    #[test]
    fn test_bad_vertex_drops_one_point() {
        let data = "A B C 3\n1 2\nnot a vertex\n3 4\nD E F 1\n5 6\n";
        let (records, notifications) = read_all(DatasetKind::State, data);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].vertices.len(), 2);
        assert_eq!(records[1].vertices.len(), 1);
        assert_eq!(notifications.count_of(NotificationType::DroppedVertex), 1);
    }

    #[test]
    fn test_bad_header_skips_shape_and_continues() {
        let data = "short header 2\nA B C 1\n1 2\n";
        let (records, notifications) = read_all(DatasetKind::MapBasin, data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vertices, vec![Vector2::new(-2.0, 1.0)]);
        assert_eq!(notifications.count_of(NotificationType::SkippedLine), 1);
    }

    #[test]
    fn test_non_integer_count_is_bad_header() {
        let data = "A B C four\nA B C -1\n";
        let (records, notifications) = read_all(DatasetKind::RfcBoundary, data);
        assert!(records.is_empty());
        assert_eq!(notifications.count_of(NotificationType::SkippedLine), 2);
    }

    #[test]
    fn test_truncated_vertex_list() {
        let data = "A B C 3\n1 2\n";
        let (records, notifications) = read_all(DatasetKind::ForecastGroupBasin, data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vertices.len(), 1);
        assert!(notifications.has_type(NotificationType::TruncatedShape));
    }

    #[test]
    fn test_non_numeric_order_is_null() {
        let data = "R2 Fork upper 1\n1 2\n";
        let (records, _) = read_all(DatasetKind::River, data);
        assert_eq!(records[0].fields.as_ref().unwrap().order, None);
    }

    #[test]
    fn test_no_fields_without_capture() {
        let lines = TextLineReader::new(Cursor::new(b"A B C 1\n1 2\n".to_vec()), None);
        let mut reader = MultiPointReader::new(lines, DatasetKind::State.spec(), false);
        let mut notifications = NotificationCollection::new();
        let record = reader.next_record(&mut notifications).unwrap().unwrap();
        assert!(record.fields.is_none());
        assert_eq!(record.vertices.len(), 1);
    }
}
