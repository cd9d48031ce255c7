//! The data contract between the editor and file formats.
//!
//! Loaders return `None` for input they cannot make sense of; the editor turns that into a
//! user-facing error. Savers report I/O failures through `io::Result`.

pub mod binary;
pub mod source;
pub mod svg;

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{Point, Size};

/// One stroke as stored on disk or in the exchange buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub points: Vec<Point>,
    pub stroke_color: Color,
    pub stroke_thickness: f64,
}

/// A whole picture: its strokes in drawing order and the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub paths: Vec<PathData>,
    pub canvas_size: Size,
}

pub type SaveFn = fn(&Drawing, &mut dyn Write, &str) -> io::Result<()>;
pub type LoadFn = fn(&mut dyn Read) -> Option<Drawing>;

/// A named file format. Formats without a loader are export-only.
#[derive(Clone, Copy)]
pub struct FileFormat {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub save: SaveFn,
    pub load: Option<LoadFn>,
}

impl fmt::Debug for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileFormat")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("can_load", &self.load.is_some())
            .finish()
    }
}

pub const PATHS_FORMAT: FileFormat = FileFormat {
    name: "Paths Files",
    extensions: &["path"],
    save: binary::save,
    load: Some(binary::load),
};

pub const SVG_FORMAT: FileFormat = FileFormat {
    name: "SVG Files",
    extensions: &["svg"],
    save: svg::save,
    load: Some(svg::load),
};

pub const SOURCE_FORMAT: FileFormat = FileFormat {
    name: "C# Source Files",
    extensions: &["cs"],
    save: source::save,
    load: Some(source::load),
};

pub fn native_formats() -> &'static [FileFormat] {
    &[PATHS_FORMAT, SVG_FORMAT, SOURCE_FORMAT]
}

impl FileFormat {
    /// Picks a native format by the (case-insensitive) extension of `path`.
    pub fn for_path(path: &Path) -> Option<FileFormat> {
        let extension = path.extension()?.to_str()?;
        native_formats()
            .iter()
            .find(|format| format.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .copied()
    }

    pub fn can_load(&self) -> bool {
        self.load.is_some()
    }
}

/// Where the current picture lives and how it was last written.
#[derive(Clone)]
pub struct FileInformation {
    pub path: PathBuf,
    pub save: SaveFn,
}

impl FileInformation {
    pub fn new(path: impl Into<PathBuf>, save: SaveFn) -> Self {
        Self { path: path.into(), save }
    }

    /// Associates `path` with the native format its extension names.
    pub fn for_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = FileFormat::for_path(&path)?;
        Some(Self::new(path, format.save))
    }

    /// The file stem, used as the picture's display name.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Debug for FileInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInformation").field("path", &self.path).finish_non_exhaustive()
    }
}
