use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::geometry::Size;

pub const DEFAULT_CANVAS_SIZE: Size = Size::new(1920.0, 1080.0);
pub const DEFAULT_STROKE_THICKNESS: f64 = 50.0;

/// Editor settings. Every field has a default, so partial files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas size of a new picture.
    pub canvas_size: Size,
    pub stroke_color: Color,
    pub stroke_thickness: f64,
    /// How long a press on a selected path must be held before it drags.
    pub move_arm_delay_ms: u64,
    /// A release closer than `canvas_size / no_move_divisor` on both axes counts as a click.
    pub no_move_divisor: f64,
    pub autosave_interval_secs: u64,
    /// Where the auto-save and the style book live.
    pub data_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            stroke_color: Color::BLUE,
            stroke_thickness: DEFAULT_STROKE_THICKNESS,
            move_arm_delay_ms: 500,
            no_move_divisor: 500.0,
            autosave_interval_secs: 60,
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::temp_dir().join("Path Editor")
}

impl EditorConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.validated())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replaces unusable values with their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !self.canvas_size.is_positive() {
            warn!("ignoring configured canvas size {:?}", self.canvas_size);
            self.canvas_size = defaults.canvas_size;
        }
        if !(self.stroke_thickness > 0.0 && self.stroke_thickness.is_finite()) {
            warn!("ignoring configured stroke thickness {}", self.stroke_thickness);
            self.stroke_thickness = defaults.stroke_thickness;
        }
        if !(self.no_move_divisor > 0.0 && self.no_move_divisor.is_finite()) {
            warn!("ignoring configured click divisor {}", self.no_move_divisor);
            self.no_move_divisor = defaults.no_move_divisor;
        }
        if self.autosave_interval_secs == 0 {
            warn!("ignoring zero auto-save interval");
            self.autosave_interval_secs = defaults.autosave_interval_secs;
        }
        self
    }

    pub fn move_arm_delay(&self) -> Duration {
        Duration::from_millis(self.move_arm_delay_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn autosave_path(&self) -> PathBuf {
        self.data_dir.join("AutoSave.path")
    }

    pub fn styles_path(&self) -> PathBuf {
        self.data_dir.join("Styles.json")
    }
}
