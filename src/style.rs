use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::PersistenceError;

/// A named stroke preset. A `None` field leaves the current setting alone when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default)]
    pub stroke_color: Option<Color>,
    #[serde(default)]
    pub stroke_thickness: Option<f64>,
}

impl Style {
    pub fn new(name: impl Into<String>, stroke_color: Option<Color>, stroke_thickness: Option<f64>) -> Self {
        Self { name: name.into(), stroke_color, stroke_thickness }
    }

    /// Whether applying this style would leave the given settings unchanged.
    pub fn is_active(&self, stroke_color: Color, stroke_thickness: f64) -> bool {
        self.stroke_color.is_none_or(|c| c == stroke_color)
            && self.stroke_thickness.is_none_or(|t| t == stroke_thickness)
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Styles kept sorted by name, ignoring case. Names are unique under that comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBook {
    styles: Vec<Style>,
}

impl StyleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_styles(styles: impl IntoIterator<Item = Style>) -> Self {
        let mut book = Self::new();
        for style in styles {
            book.add_or_update(style);
        }
        book
    }

    /// Inserts `style`, replacing any style with the same name.
    pub fn add_or_update(&mut self, style: Style) {
        match self.styles.binary_search_by(|s| compare_names(&s.name, &style.name)) {
            Ok(index) => self.styles[index] = style,
            Err(index) => self.styles.insert(index, style),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Style> {
        let index = self.styles.binary_search_by(|s| compare_names(&s.name, name)).ok()?;
        Some(self.styles.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        let index = self.styles.binary_search_by(|s| compare_names(&s.name, name)).ok()?;
        self.styles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Writes the book as JSON, creating the parent directory.
    pub fn try_save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.styles)?)?;
        Ok(())
    }

    /// Like [`try_save`](Self::try_save), but a failure is only logged.
    pub fn save(&self, path: &Path) {
        if let Err(e) = self.try_save(path) {
            warn!("failed to save styles to {}: {e}", path.display());
        }
    }

    pub fn try_open(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        let styles: Vec<Style> = serde_json::from_str(&text)
            .map_err(|_| PersistenceError::Malformed(PathBuf::from(path)))?;
        Ok(Self::from_styles(styles))
    }

    /// `None` if the file is missing or unreadable.
    pub fn open(path: &Path) -> Option<Self> {
        Self::try_open(path)
            .inspect_err(|e| warn!("could not open styles: {e}"))
            .ok()
    }
}
