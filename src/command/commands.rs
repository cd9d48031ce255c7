use std::fmt;
use std::path::PathBuf;

use crate::editor::EditorModel;
use crate::error::EditorError;
use crate::format::FileInformation;
use crate::geometry::Size;

/// Commands the presentation layer can bind to menus and shortcuts.
#[derive(Clone)]
pub enum Command {
    /// Start an empty picture
    New,
    /// Load a picture from a file
    Open { path: PathBuf },
    /// Write to the associated file.
    ///
    /// Fails with [`EditorError::NoFileAssociated`] when the picture has no file yet; hosts
    /// route that to their Save As flow.
    Save,
    /// Write to a new file and associate it
    SaveAs(FileInformation),
    Delete,
    Duplicate,
    Cut,
    Copy,
    Paste,
    SelectAll,
    DeselectAll,
    InvertSelection,
    CropToPaths,
    ResizeCanvas { size: Size, keep_proportional: bool },
    FitToCanvas,
    CenterOnCanvas,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Open { path } => write!(f, "Open({})", path.display()),
            Command::SaveAs(info) => write!(f, "SaveAs({})", info.path.display()),
            Command::ResizeCanvas { size, keep_proportional } => {
                write!(f, "ResizeCanvas({}x{}, proportional: {keep_proportional})", size.width, size.height)
            }
            other => f.write_str(other.name()),
        }
    }
}

impl Command {
    /// Human-readable name, as shown in menus.
    pub fn name(&self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open { .. } => "Open",
            Command::Save => "Save",
            Command::SaveAs(_) => "Save As",
            Command::Delete => "Delete",
            Command::Duplicate => "Duplicate",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::DeselectAll => "Deselect All",
            Command::InvertSelection => "Invert Selection",
            Command::CropToPaths => "Crop to Paths",
            Command::ResizeCanvas { .. } => "Resize Canvas",
            Command::FitToCanvas => "Fit to Canvas",
            Command::CenterOnCanvas => "Center on Canvas",
        }
    }

    /// Whether running the command records an undo entry.
    pub fn can_undo(&self) -> bool {
        !matches!(self, Command::Save | Command::SaveAs(_) | Command::Copy)
    }

    pub fn can_execute(&self, editor: &EditorModel) -> bool {
        match self {
            Command::New | Command::Open { .. } | Command::SaveAs(_) => true,
            Command::Save => editor.file_info().is_some(),
            Command::Delete
            | Command::Duplicate
            | Command::Cut
            | Command::Copy
            | Command::DeselectAll => editor.is_something_selected(),
            Command::Paste => editor.can_paste(),
            Command::SelectAll => editor.can_select_all(),
            Command::InvertSelection => editor.can_invert_selection(),
            Command::CropToPaths | Command::FitToCanvas | Command::CenterOnCanvas => {
                editor.bounds_arent_empty()
            }
            Command::ResizeCanvas { size, .. } => size.is_positive(),
        }
    }

    /// Runs the command. Saving does not retry on failure.
    pub fn execute(self, editor: &mut EditorModel) -> Result<(), EditorError> {
        if !self.can_execute(editor) {
            return Err(match self {
                Command::Save => EditorError::NoFileAssociated,
                Command::ResizeCanvas { .. } => EditorError::InvalidCanvasSize,
                other => EditorError::CannotExecute(other.name()),
            });
        }
        match self {
            Command::New => editor.new_picture(),
            Command::Open { path } => editor.open(path)?,
            Command::Save => editor.save(|_| false)?,
            Command::SaveAs(info) => editor.save_as(info, |_| false)?,
            Command::Delete => editor.delete(),
            Command::Duplicate => editor.duplicate(),
            Command::Cut => editor.cut()?,
            Command::Copy => editor.copy()?,
            Command::Paste => editor.paste()?,
            Command::SelectAll => editor.select_all(),
            Command::DeselectAll => editor.deselect_all(),
            Command::InvertSelection => editor.invert_selection(),
            Command::CropToPaths => editor.crop_to_paths()?,
            Command::ResizeCanvas { size, keep_proportional } => editor.resize_canvas(size, keep_proportional)?,
            Command::FitToCanvas => editor.fit_to_canvas()?,
            Command::CenterOnCanvas => editor.center_on_canvas()?,
        }
        Ok(())
    }
}

impl EditorModel {
    pub fn can_execute(&self, command: &Command) -> bool {
        command.can_execute(self)
    }

    pub fn execute(&mut self, command: Command) -> Result<(), EditorError> {
        log::debug!("executing {command:?}");
        command.execute(self)
    }
}
