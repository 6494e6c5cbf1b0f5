//! Fixed-layout reader for the binary (`.bin`) layer files.
//!
//! Each record is
//!
//! | Offset | Size | Content |
//! |---|---|---|
//! | 0 | 9 | ID, space padded |
//! | 9 | 21 | NAME, space padded |
//! | 30 | 4 | ORDER, `i32` |
//! | 34 | 4 | vertex count N, `i32` |
//! | 38 | 8 × N | N pairs of `f32` (x, y) |
//!
//! All numbers use the byte order `B` the file was declared with.

use super::record::{RawRecord, RecordFields, RecordSource};
use super::text_reader::decode_text;
use crate::io::format::DatasetSpec;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::Vector2;
use byteorder::{ByteOrder, ReadBytesExt};
use encoding_rs::Encoding as TextEncoding;
use std::io::{self, Cursor, Read};
use std::marker::PhantomData;

const ID_LEN: usize = 9;
const NAME_LEN: usize = 21;
const HEADER_LEN: usize = ID_LEN + NAME_LEN + 4 + 4;
const MAX_PREALLOCATED_VERTICES: usize = 1 << 16;

/// Read until `buf` is full or the stream ends; returns the bytes read
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Strip trailing space and NUL padding
fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |last| last + 1);
    &bytes[..end]
}

struct BinaryHeader {
    id: String,
    name: String,
    order: i32,
    vertex_count: i32,
}

/// Binary record reader, generic over the declared byte order
pub struct BinaryRecordReader<R: Read, B: ByteOrder> {
    reader: R,
    spec: &'static DatasetSpec,
    capture_attributes: bool,
    encoding: Option<&'static TextEncoding>,
    record_number: usize,
    finished: bool,
    /// Non-EOF failure hit inside a vertex list, reported on the next call
    pending_error: Option<io::Error>,
    _byte_order: PhantomData<B>,
}

impl<R: Read, B: ByteOrder> BinaryRecordReader<R, B> {
    pub fn new(
        reader: R,
        spec: &'static DatasetSpec,
        capture_attributes: bool,
        encoding: Option<&'static TextEncoding>,
    ) -> Self {
        Self {
            reader,
            spec,
            capture_attributes,
            encoding,
            record_number: 0,
            finished: false,
            pending_error: None,
            _byte_order: PhantomData,
        }
    }

    fn file_name(&self) -> &'static str {
        self.spec.binary_name.unwrap_or(self.spec.ascii_name)
    }

    /// Read one record header, `None` when no complete header remains
    fn read_header(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<BinaryHeader>> {
        let mut buf = [0u8; HEADER_LEN];
        let read = read_fully(&mut self.reader, &mut buf)?;
        if read < HEADER_LEN {
            if read > 0 {
                notifications.notify(
                    NotificationType::TruncatedShape,
                    format!(
                        "{} record {}: ignored {} trailing byte(s)",
                        self.file_name(),
                        self.record_number,
                        read
                    ),
                );
            }
            return Ok(None);
        }

        let mut numbers = Cursor::new(&buf[ID_LEN + NAME_LEN..]);
        let order = numbers.read_i32::<B>()?;
        let vertex_count = numbers.read_i32::<B>()?;

        let (id, name) = if self.capture_attributes {
            (
                decode_text(trim_padding(&buf[..ID_LEN]), self.encoding),
                decode_text(trim_padding(&buf[ID_LEN..ID_LEN + NAME_LEN]), self.encoding),
            )
        } else {
            (String::new(), String::new())
        };

        Ok(Some(BinaryHeader {
            id,
            name,
            order,
            vertex_count,
        }))
    }

    fn read_vertex(&mut self) -> io::Result<Vector2> {
        let x = self.reader.read_f32::<B>()?;
        let y = self.reader.read_f32::<B>()?;
        Ok(Vector2::new(f64::from(x), f64::from(y)))
    }
}

impl<R: Read, B: ByteOrder> RecordSource for BinaryRecordReader<R, B> {
    fn next_record(
        &mut self,
        notifications: &mut NotificationCollection,
    ) -> io::Result<Option<RawRecord>> {
        if let Some(error) = self.pending_error.take() {
            self.finished = true;
            return Err(error);
        }
        if self.finished {
            return Ok(None);
        }

        let header = match self.read_header(notifications)? {
            Some(header) => header,
            None => {
                self.finished = true;
                return Ok(None);
            }
        };
        self.record_number += 1;

        let vertex_count = match usize::try_from(header.vertex_count) {
            Ok(count) => count,
            Err(_) => {
                notifications.notify(
                    NotificationType::ReadError,
                    format!(
                        "{} record {}: negative vertex count {}, stopping",
                        self.file_name(),
                        self.record_number,
                        header.vertex_count
                    ),
                );
                self.finished = true;
                return Ok(None);
            }
        };

        let mut vertices = Vec::with_capacity(vertex_count.min(MAX_PREALLOCATED_VERTICES));
        for _ in 0..vertex_count {
            match self.read_vertex() {
                Ok(vertex) => vertices.push(vertex),
                Err(e) => {
                    notifications.notify(
                        NotificationType::TruncatedShape,
                        format!(
                            "{} record {} ('{}'): read {} of {} vertices",
                            self.file_name(),
                            self.record_number,
                            header.id,
                            vertices.len(),
                            vertex_count
                        ),
                    );
                    if e.kind() != io::ErrorKind::UnexpectedEof {
                        self.pending_error = Some(e);
                    }
                    break;
                }
            }
        }

        let fields = if self.capture_attributes {
            Some(RecordFields {
                id: Some(header.id),
                name: Some(header.name),
                order: Some(f64::from(header.order)),
                ..Default::default()
            })
        } else {
            None
        };

        Ok(Some(RawRecord { vertices, fields }))
    }
}
