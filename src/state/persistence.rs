use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::EditorConfig;
use crate::editor::EditorModel;
use crate::error::PersistenceError;
use crate::format::{binary, Drawing};

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Periodically writes the current picture to a fixed file so it survives a crash.
///
/// Failures are logged and otherwise ignored: losing an auto-save must never interrupt editing.
#[derive(Debug, Clone)]
pub struct AutoSaver {
    /// File the picture is written to, in the binary path format
    path: PathBuf,
    /// Minimum time between two periodic saves
    interval: Duration,
    /// When the last save was attempted
    last_save: Instant,
}

impl AutoSaver {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            last_save: Instant::now(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.autosave_path(), config.autosave_interval())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the next periodic save is due.
    pub fn next_due(&self) -> Instant {
        self.last_save + self.interval
    }

    /// Writes `drawing`, creating the data directory if needed.
    pub fn try_save(&self, drawing: &Drawing) -> PersistenceResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut out = BufWriter::new(File::create(&self.path)?);
        binary::save(drawing, &mut out, "AutoSave")?;
        out.flush()?;
        Ok(())
    }

    /// Saves now; a failure is only logged.
    pub fn save(&mut self, drawing: &Drawing, now: Instant) {
        self.last_save = now;
        match self.try_save(drawing) {
            Ok(()) => debug!("auto-saved to {}", self.path.display()),
            Err(e) => warn!("auto-save to {} failed: {e}", self.path.display()),
        }
    }

    /// Saves the editor's picture if the interval has elapsed. Returns whether it saved.
    pub fn tick(&mut self, now: Instant, editor: &EditorModel) -> bool {
        if now < self.next_due() {
            return false;
        }
        self.save(&editor.drawing(), now);
        true
    }

    /// Final save when the editor closes.
    pub fn shutdown(&mut self, editor: &EditorModel) {
        self.save(&editor.drawing(), Instant::now());
    }

    pub fn try_open(&self) -> PersistenceResult<Drawing> {
        let mut input = BufReader::new(File::open(&self.path)?);
        binary::load(&mut input).ok_or_else(|| PersistenceError::Malformed(self.path.clone()))
    }

    /// The last auto-saved picture, if there is a readable one.
    pub fn open(&self) -> Option<Drawing> {
        self.try_open()
            .inspect_err(|e| debug!("no auto-save restored: {e}"))
            .ok()
    }
}
