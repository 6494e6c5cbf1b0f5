//! Fixed-column reader for `forecastpt.dat`.
//!
//! ```text
//! Denver              CO     DENC2               39.74  104.99
//! |0                  |20    |27                 |47
//! ```

use super::record::{RawRecord, RecordFields, RecordSource};
use super::text_reader::{column_offset, column_slice, parse_coordinate_pair, TextLineReader};
use crate::io::format::DatasetSpec;
use crate::notification::{NotificationCollection, NotificationType};
use std::io::{self, BufRead};

const NAME_COLUMNS: (usize, usize) = (0, 20);
const STATE_COLUMNS: (usize, usize) = (20, 27);
const ID_COLUMNS: (usize, usize) = (27, 47);
/// First column of the coordinate tokens
const COORDINATE_COLUMN: usize = 47;

/// One point per line; lines without exactly two coordinates are skipped
pub struct ForecastPointReader<R: BufRead> {
    lines: TextLineReader<R>,
    spec: &'static DatasetSpec,
    capture_attributes: bool,
}

impl<R: BufRead> ForecastPointReader<R> {
    pub fn new(lines: TextLineReader<R>, spec: &'static DatasetSpec, capture_attributes: bool) -> Self {
        Self {
            lines,
            spec,
            capture_attributes,
        }
    }

    fn line_fields(line: &str) -> RecordFields {
        let column = |(start, end): (usize, usize)| column_slice(line, start, end).trim().to_string();
        RecordFields {
            name: Some(column(NAME_COLUMNS)),
            state: Some(column(STATE_COLUMNS)),
            id: Some(column(ID_COLUMNS)),
            ..Default::default()
        }
    }
}

impl<R: BufRead> RecordSource for ForecastPointReader<R> {
    fn next_record(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<RawRecord>> {
        while let Some(line) = self.lines.read_line()? {
            let coordinates = &line[column_offset(&line, COORDINATE_COLUMN)..];
            let (latitude, longitude) = match parse_coordinate_pair(coordinates) {
                Some(pair) => pair,
                None => {
                    if !line.trim().is_empty() {
                        notifications.notify(
                            NotificationType::SkippedLine,
                            format!(
                                "{} line {}: expected two coordinates after column {}",
                                self.spec.ascii_name,
                                self.lines.line_number(),
                                COORDINATE_COLUMN
                            ),
                        );
                    }
                    continue;
                }
            };

            let fields = if self.capture_attributes {
                Some(Self::line_fields(&line))
            } else {
                None
            };
            return Ok(Some(RawRecord {
                vertices: vec![self.spec.text_convention.to_vector(latitude, longitude)],
                fields,
            }));
        }
        Ok(None)
    }
}
