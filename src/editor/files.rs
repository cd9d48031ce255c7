use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::{error, info, warn};

use super::{paths_from_drawing, EditorModel};
use crate::error::EditorError;
use crate::format::{Drawing, FileFormat, FileInformation};
use crate::state::EditorMode;

impl EditorModel {
    /// Empties the canvas and forgets the file association, as one undo entry.
    pub fn new_picture(&mut self) {
        let canvas_size = self.config.canvas_size;
        self.change("New Picture", |after| {
            after.paths.clear();
            after.selection.clear();
            after.file_info = Some(None);
            after.canvas_size = canvas_size;
            after.mode = Some(EditorMode::Draw);
        });
    }

    /// Loads `path` with the native format its extension names.
    ///
    /// Nothing changes and no undo entry is recorded unless the whole file loads.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        let malformed = || EditorError::Malformed { path: path.to_path_buf() };
        let format = FileFormat::for_path(path).ok_or_else(malformed)?;
        let load = format.load.ok_or_else(malformed)?;
        let mut input = BufReader::new(File::open(path)?);
        let Some(drawing) = load(&mut input).filter(|d| d.canvas_size.is_positive()) else {
            warn!("could not load {}", path.display());
            return Err(malformed());
        };
        self.open_drawing(drawing, Some(FileInformation::new(path, format.save)));
        Ok(())
    }

    /// Replaces the picture with `drawing`, as one undo entry.
    pub fn open_drawing(&mut self, drawing: Drawing, file_info: Option<FileInformation>) {
        let paths = paths_from_drawing(&drawing);
        info!("opened picture with {} paths", paths.len());
        self.change("Open Picture", |after| {
            after.paths = paths;
            after.selection.clear();
            after.canvas_size = drawing.canvas_size;
            after.file_info = Some(file_info);
        });
    }

    /// Saves to the associated file.
    ///
    /// `retry` is asked after each failure whether to try again; once it declines, the error
    /// is returned and the association is left as it was.
    pub fn save(&mut self, retry: impl FnMut(&EditorError) -> bool) -> Result<(), EditorError> {
        let file_info = self.file_info().cloned().ok_or(EditorError::NoFileAssociated)?;
        self.save_as(file_info, retry)
    }

    /// Saves to `file_info` and, on success, makes it the file association.
    pub fn save_as(
        &mut self,
        file_info: FileInformation,
        mut retry: impl FnMut(&EditorError) -> bool,
    ) -> Result<(), EditorError> {
        let drawing = self.drawing();
        loop {
            match write_drawing(&file_info, &drawing) {
                Ok(()) => break,
                Err(e) => {
                    error!("{e}");
                    if !retry(&e) {
                        return Err(e);
                    }
                }
            }
        }
        info!("saved {}", file_info.path.display());
        self.document.file_info = Some(file_info);
        Ok(())
    }
}

fn write_drawing(file_info: &FileInformation, drawing: &Drawing) -> Result<(), EditorError> {
    let path = &file_info.path;
    let save_error = |source: io::Error| EditorError::Save { path: path.clone(), source };
    let mut out = BufWriter::new(File::create(path).map_err(save_error)?);
    (file_info.save)(drawing, &mut out, &file_info.name()).map_err(save_error)?;
    out.flush().map_err(save_error)
}
