//! Builders for the text and binary record layouts.

#![allow(dead_code)]

use byteorder::{ByteOrder, WriteBytesExt};

/// One header line plus `(first, second)` vertex lines of a multi-point text file
pub fn multipoint_shape(tokens: [&str; 3], vertices: &[(f64, f64)]) -> String {
    let mut out = format!("{} {} {} {}\n", tokens[0], tokens[1], tokens[2], vertices.len());
    for (first, second) in vertices {
        out.push_str(&format!("{} {}\n", first, second));
    }
    out
}

/// One `forecastpt.dat` line
pub fn forecast_point_line(name: &str, state: &str, id: &str, coordinates: &str) -> String {
    format!("{:<20}{:<7}{:<20}{}\n", name, state, id, coordinates)
}

/// One binary record in byte order `B`
pub fn binary_record<B: ByteOrder>(
    id: &str,
    name: &str,
    order: i32,
    points: &[(f32, f32)],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("{:<9}", id).as_bytes());
    out.extend_from_slice(format!("{:<21}", name).as_bytes());
    out.write_i32::<B>(order).unwrap();
    out.write_i32::<B>(points.len() as i32).unwrap();
    for &(x, y) in points {
        out.write_f32::<B>(x).unwrap();
        out.write_f32::<B>(y).unwrap();
    }
    out
}
