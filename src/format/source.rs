//! The picture as a C# `DrawnPaths` initializer, for pasting into source code.
//!
//! ```text
//! // Created by Path Editor
//! DrawnPaths picture =
//!     new(
//!         [
//!             new([new(1, 2), new(3, 4)], new() { A = 255, R = 0, G = 0, B = 0 }, StrokeThickness: 2),
//!         ],
//!         new(640, 480));
//! ```
//!
//! Loading goes line by line. Lines before the `DrawnPaths` declaration are skipped; from
//! there on every line must have exactly the shape above, or nothing loads.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use super::{Drawing, PathData};
use crate::color::Color;
use crate::geometry::{Point, Size};

const NUMBER: &str = r"-?\d+(?:\.\d+)?";

static GRAMMAR: LazyLock<Option<Grammar>> = LazyLock::new(|| {
    Grammar::new()
        .map_err(|e| error!("bad source-literal grammar: {e}"))
        .ok()
});

struct Grammar {
    declaration: Regex,
    open: Regex,
    list_start: Regex,
    path: Regex,
    point: Regex,
    list_end: Regex,
    canvas: Regex,
}

impl Grammar {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            declaration: Regex::new(r"^\s*DrawnPaths\s+\w+\s*=\s*$")?,
            open: Regex::new(r"^\s*new\s*\(\s*$")?,
            list_start: Regex::new(r"^\s*\[\s*$")?,
            path: Regex::new(&format!(
                r"^\s*new\s*\(\s*\[\s*(?P<points>.+?)\]\s*,\s*new\s*\(\s*\)\s*\{{\s*A\s*=\s*(?P<a>\d+)\s*,\s*R\s*=\s*(?P<r>\d+)\s*,\s*G\s*=\s*(?P<g>\d+)\s*,\s*B\s*=\s*(?P<b>\d+)\s*\}}\s*,\s*StrokeThickness:\s*(?P<thickness>{NUMBER})\s*\)\s*,?\s*$"
            ))?,
            point: Regex::new(&format!(r"new\s*\(\s*(?P<x>{NUMBER})\s*,\s*(?P<y>{NUMBER})\s*\)"))?,
            list_end: Regex::new(r"^\s*\]\s*,\s*$")?,
            canvas: Regex::new(&format!(
                r"^\s*new\s*\(\s*(?P<width>{NUMBER})\s*,\s*(?P<height>{NUMBER})\s*\)\s*\)\s*;\s*$"
            ))?,
        })
    }

    fn path_data(&self, captures: &Captures<'_>) -> Option<PathData> {
        let byte = |name: &str| captures.name(name)?.as_str().parse::<u8>().ok();
        let stroke_color = Color::argb(byte("a")?, byte("r")?, byte("g")?, byte("b")?);
        let stroke_thickness = captures.name("thickness")?.as_str().parse().ok()?;
        let points = self
            .point
            .captures_iter(captures.name("points")?.as_str())
            .map(|point| Some(Point::new(number(&point, "x")?, number(&point, "y")?)))
            .collect::<Option<Vec<_>>>()?;
        (!points.is_empty()).then_some(PathData { points, stroke_color, stroke_thickness })
    }
}

fn number(captures: &Captures<'_>, name: &str) -> Option<f64> {
    captures.name(name)?.as_str().parse().ok()
}

/// `name` with every character that cannot appear in an identifier replaced by `_`.
fn identifier(name: &str) -> String {
    let mut identifier: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if identifier.is_empty() {
        identifier.push_str("picture");
    } else if identifier.starts_with(|c: char| c.is_numeric()) {
        identifier.insert(0, '_');
    }
    identifier
}

pub fn save(drawing: &Drawing, out: &mut dyn Write, name: &str) -> io::Result<()> {
    writeln!(out, "// Created by Path Editor")?;
    writeln!(out, "DrawnPaths {} =", identifier(name))?;
    writeln!(out, "    new(")?;
    writeln!(out, "        [")?;
    for path in &drawing.paths {
        let points = path
            .points
            .iter()
            .map(|p| format!("new({}, {})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(", ");
        let Color { a, r, g, b } = path.stroke_color;
        writeln!(
            out,
            "            new([{points}], new() {{ A = {a}, R = {r}, G = {g}, B = {b} }}, StrokeThickness: {}),",
            path.stroke_thickness,
        )?;
    }
    writeln!(out, "        ],")?;
    let Size { width, height } = drawing.canvas_size;
    writeln!(out, "        new({width}, {height}));")?;
    out.flush()
}

/// `None` if there is no declaration, a line after it is out of place, a path has no points,
/// or the input ends early.
pub fn load(input: &mut dyn Read) -> Option<Drawing> {
    let grammar = GRAMMAR.as_ref()?;
    let mut lines = BufReader::new(input).lines();
    let mut next_line = || lines.next()?.ok();

    while !grammar.declaration.is_match(&next_line()?) {}
    if !grammar.open.is_match(&next_line()?) || !grammar.list_start.is_match(&next_line()?) {
        return None;
    }

    let mut paths = Vec::new();
    loop {
        let line = next_line()?;
        match grammar.path.captures(&line) {
            Some(captures) => paths.push(grammar.path_data(&captures)?),
            None if grammar.list_end.is_match(&line) => break,
            None => return None,
        }
    }

    let line = next_line()?;
    let captures = grammar.canvas.captures(&line)?;
    let canvas_size = Size::new(number(&captures, "width")?, number(&captures, "height")?);
    Some(Drawing { paths, canvas_size })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_sanitized() {
        assert_eq!(identifier("my picture-2"), "my_picture_2");
        assert_eq!(identifier("3d"), "_3d");
        assert_eq!(identifier(""), "picture");
    }

    #[test]
    fn grammar_compiles() {
        assert!(GRAMMAR.is_some());
    }
}
