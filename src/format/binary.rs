//! Little-endian binary layout of the `.path` format.
//!
//! ```text
//! width f64, height f64, path_count i32,
//! per path: point_count i32, (x f64, y f64) * point_count, a u8, r u8, g u8, b u8, thickness f64
//! ```
//!
//! The exchange buffer uses the per-path record alone, repeated, with no header.

use std::io::{self, Read, Write};

use super::{Drawing, PathData};
use crate::color::Color;
use crate::geometry::{Point, Size};

pub fn save(drawing: &Drawing, out: &mut dyn Write, _name: &str) -> io::Result<()> {
    out.write_all(&drawing.canvas_size.width.to_le_bytes())?;
    out.write_all(&drawing.canvas_size.height.to_le_bytes())?;
    write_count(out, drawing.paths.len())?;
    for path in &drawing.paths {
        write_path(out, path)?;
    }
    out.flush()
}

/// `None` on truncated input, a negative count or a path without points.
pub fn load(input: &mut dyn Read) -> Option<Drawing> {
    let width = read_f64(input)?;
    let height = read_f64(input)?;
    let count = read_count(input)?;
    let paths = (0..count).map(|_| read_path(input)).collect::<Option<Vec<_>>>()?;
    Some(Drawing { paths, canvas_size: Size::new(width, height) })
}

pub fn write_path(out: &mut dyn Write, path: &PathData) -> io::Result<()> {
    write_count(out, path.points.len())?;
    for point in &path.points {
        out.write_all(&point.x.to_le_bytes())?;
        out.write_all(&point.y.to_le_bytes())?;
    }
    let Color { a, r, g, b } = path.stroke_color;
    out.write_all(&[a, r, g, b])?;
    out.write_all(&path.stroke_thickness.to_le_bytes())
}

pub fn read_path(input: &mut dyn Read) -> Option<PathData> {
    let count = read_count(input)?;
    if count == 0 {
        return None;
    }
    let points = (0..count)
        .map(|_| Some(Point::new(read_f64(input)?, read_f64(input)?)))
        .collect::<Option<Vec<_>>>()?;
    let mut argb = [0u8; 4];
    input.read_exact(&mut argb).ok()?;
    let [a, r, g, b] = argb;
    let stroke_thickness = read_f64(input)?;
    Some(PathData { points, stroke_color: Color::argb(a, r, g, b), stroke_thickness })
}

/// Reads path records until `bytes` is used up. `None` if any record is malformed.
pub fn read_paths(bytes: &[u8]) -> Option<Vec<PathData>> {
    let mut input = bytes;
    let mut paths = Vec::new();
    while !input.is_empty() {
        paths.push(read_path(&mut input)?);
    }
    Some(paths)
}

fn write_count(out: &mut dyn Write, count: usize) -> io::Result<()> {
    let count = i32::try_from(count)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many items for the path format"))?;
    out.write_all(&count.to_le_bytes())
}

fn read_count(input: &mut dyn Read) -> Option<usize> {
    let mut bytes = [0u8; 4];
    input.read_exact(&mut bytes).ok()?;
    usize::try_from(i32::from_le_bytes(bytes)).ok()
}

fn read_f64(input: &mut dyn Read) -> Option<f64> {
    let mut bytes = [0u8; 8];
    input.read_exact(&mut bytes).ok()?;
    Some(f64::from_le_bytes(bytes))
}
