//! SVG export and a tolerant import of the subset this editor writes.
//!
//! Import only looks at `svg` elements (for the canvas size) and `polyline` elements, matched
//! by local name. A polyline missing `points`, `stroke` or `stroke-width`, with a stroke that is
//! not `#RRGGBB`, or with fewer than two parsable points is skipped. Every other element is
//! ignored.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Drawing, PathData};
use crate::color::Color;
use crate::geometry::{Point, Size};

pub fn save(drawing: &Drawing, out: &mut dyn Write, _name: &str) -> io::Result<()> {
    let Size { width, height } = drawing.canvas_size;
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    for path in &drawing.paths {
        let points = path
            .points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            r#"  <polyline points="{points}" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" fill="none" />"#,
            path.stroke_color.to_hex_rgb(),
            path.stroke_thickness,
        )?;
    }
    writeln!(out, "</svg>")?;
    out.flush()
}

/// `None` if the input is not well-formed UTF-8 XML or no `svg` element carries a numeric
/// width and height.
pub fn load(input: &mut dyn Read) -> Option<Drawing> {
    let mut text = String::new();
    input.read_to_string(&mut text).ok()?;

    let mut reader = Reader::from_str(&text);
    let mut canvas_size = None;
    let mut paths = Vec::new();
    loop {
        match reader.read_event().ok()? {
            Event::Start(element) | Event::Empty(element) => {
                let name = element.local_name();
                if name.as_ref().eq_ignore_ascii_case(b"svg") {
                    let attributes = attributes(&element);
                    let width = attributes.get("width").and_then(|w| parse_number(w));
                    let height = attributes.get("height").and_then(|h| parse_number(h));
                    if let (Some(width), Some(height)) = (width, height) {
                        canvas_size = Some(Size::new(width, height));
                    }
                } else if name.as_ref().eq_ignore_ascii_case(b"polyline") {
                    if let Some(path) = polyline(&attributes(&element)) {
                        paths.push(path);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Some(Drawing { paths, canvas_size: canvas_size? })
}

/// Unescaped attribute values by local name. Malformed attributes are dropped.
fn attributes(element: &BytesStart<'_>) -> HashMap<String, String> {
    element
        .attributes()
        .filter_map(Result::ok)
        .filter_map(|attribute| {
            let key = String::from_utf8(attribute.key.local_name().as_ref().to_vec()).ok()?;
            let value = attribute.unescape_value().ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

fn polyline(attributes: &HashMap<String, String>) -> Option<PathData> {
    let stroke_color = Color::from_hex_rgb(attributes.get("stroke")?)?;
    let stroke_thickness = parse_number(attributes.get("stroke-width")?)?;
    let points: Vec<Point> = attributes
        .get("points")?
        .split_whitespace()
        .filter_map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Point::new(parse_number(x)?, parse_number(y)?))
        })
        .collect();
    (points.len() >= 2).then_some(PathData { points, stroke_color, stroke_thickness })
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}
