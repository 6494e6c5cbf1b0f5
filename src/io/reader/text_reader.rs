//! Line reader and tokenizers for the ASCII layer files

use encoding_rs::Encoding as TextEncoding;
use std::io::{self, BufRead};

/// Line-oriented reader over an ASCII layer file
pub struct TextLineReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    /// Non-UTF8 fallback encoding.  `None` means use Latin-1 (byte-to-char).
    encoding: Option<&'static TextEncoding>,
}

impl<R: BufRead> TextLineReader<R> {
    pub fn new(reader: R, encoding: Option<&'static TextEncoding>) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
            encoding,
        }
    }

    /// Number of the last line returned, starting at 1
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line without its terminator, `None` at end of input.
    ///
    /// Leading and inner whitespace is kept; fixed-column layouts rely on it.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }

        Ok(Some(decode_text(&self.buffer, self.encoding)))
    }
}

/// Look up a fallback text encoding by its WHATWG label (`"windows-1252"`,
/// `"cp1252"`, `"utf-16le"`, ...).
///
/// `"latin1"` and `"iso-8859-1"` map to `None`, the byte-to-char fallback,
/// since WHATWG folds those labels into windows-1252.
pub fn encoding_for_label(label: &str) -> Option<Option<&'static TextEncoding>> {
    match label.trim().to_ascii_lowercase().as_str() {
        "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Some(None),
        other => TextEncoding::for_label(other.as_bytes()).map(Some),
    }
}

/// Decode bytes as UTF-8, falling back to `encoding` or Latin-1
pub fn decode_text(bytes: &[u8], encoding: Option<&'static TextEncoding>) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            if let Some(enc) = encoding {
                let (decoded, _, _) = enc.decode(bytes);
                decoded.into_owned()
            } else {
                // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
                bytes.iter().map(|&b| b as char).collect()
            }
        }
    }
}

/// Parse a line holding exactly two numeric whitespace-separated tokens
pub fn parse_coordinate_pair(text: &str) -> Option<(f64, f64)> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?.parse::<f64>().ok()?;
    let second = tokens.next()?.parse::<f64>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((first, second))
}

/// Byte offset of the character at `column`, or the line length past its end
pub fn column_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}

/// Characters `start..end` of a line, clipped to the line
pub fn column_slice(line: &str, start: usize, end: usize) -> &str {
    let from = column_offset(line, start);
    let to = column_offset(line, end);
    &line[from..to.max(from)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &[u8]) -> TextLineReader<Cursor<Vec<u8>>> {
        TextLineReader::new(Cursor::new(data.to_vec()), None)
    }

    #[test]
    fn test_read_lines() {
        let mut lines = reader(b"first\r\n  second  \nlast");
        assert_eq!(lines.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(lines.read_line().unwrap().as_deref(), Some("  second  "));
        assert_eq!(lines.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(lines.line_number(), 3);
        assert_eq!(lines.read_line().unwrap(), None);
    }

    #[test]
    fn test_blank_line_is_not_end_of_input() {
        let mut lines = reader(b"\nx\n");
        assert_eq!(lines.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(lines.read_line().unwrap().as_deref(), Some("x"));
        assert_eq!(lines.read_line().unwrap(), None);
    }

    #[test]
    fn test_latin1_fallback() {
        let mut lines = reader(b"Ca\xf1on\n");
        assert_eq!(lines.read_line().unwrap().as_deref(), Some("Cañon"));
    }

    #[test]
    fn test_configured_fallback() {
        let decoded = decode_text(b"\x80", Some(encoding_rs::WINDOWS_1252));
        assert_eq!(decoded, "€");
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(encoding_for_label("cp1252"), Some(Some(encoding_rs::WINDOWS_1252)));
        assert_eq!(encoding_for_label(" Shift_JIS "), Some(Some(encoding_rs::SHIFT_JIS)));
        assert_eq!(encoding_for_label("ISO-8859-1"), Some(None));
        assert_eq!(encoding_for_label("klingon"), None);
    }

    #[test]
    fn test_coordinate_pair() {
        assert_eq!(parse_coordinate_pair("40.0 -105.0"), Some((40.0, -105.0)));
        assert_eq!(parse_coordinate_pair("  40\t-105  "), Some((40.0, -105.0)));
        assert_eq!(parse_coordinate_pair("40.0"), None);
        assert_eq!(parse_coordinate_pair("40.0 -105.0 7"), None);
        assert_eq!(parse_coordinate_pair("40.0 west"), None);
        assert_eq!(parse_coordinate_pair(""), None);
    }

    #[test]
    fn test_column_slice() {
        assert_eq!(column_slice("abcdef", 1, 3), "bc");
        assert_eq!(column_slice("abc", 2, 10), "c");
        assert_eq!(column_slice("abc", 5, 10), "");
        assert_eq!(column_slice("ñandú", 1, 4), "and");
    }
}
