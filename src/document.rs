use std::collections::HashMap;

use crate::format::{Drawing, FileInformation};
use crate::geometry::{Rectangle, Size};
use crate::observable::{ObservableList, ObservableSet};
use crate::path::PathRef;
use crate::state::{EditorMode, EditorState};

/// Everything the undo history acts on.
///
/// Undo closures receive a `&mut Document`. The editor keeps its history next to the
/// document rather than inside it, so a closure can never reach the stack that runs it.
#[derive(Debug)]
pub struct Document {
    pub(crate) canvas_size: Size,
    pub(crate) paths: ObservableList<PathRef>,
    pub(crate) selected_paths: ObservableSet<PathRef>,
    pub(crate) file_info: Option<FileInformation>,
    pub(crate) state: EditorState,
}

impl Document {
    pub fn new(canvas_size: Size) -> Self {
        Self {
            canvas_size,
            paths: ObservableList::new(),
            selected_paths: ObservableSet::new(),
            file_info: None,
            state: EditorState::default(),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// Paths in drawing order; the last one is on top.
    pub fn paths(&self) -> &ObservableList<PathRef> {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut ObservableList<PathRef> {
        &mut self.paths
    }

    pub fn selected_paths(&self) -> &ObservableSet<PathRef> {
        &self.selected_paths
    }

    pub fn selected_paths_mut(&mut self) -> &mut ObservableSet<PathRef> {
        &mut self.selected_paths
    }

    pub fn file_info(&self) -> Option<&FileInformation> {
        self.file_info.as_ref()
    }

    pub fn set_file_info(&mut self, file_info: Option<FileInformation>) {
        self.file_info = file_info;
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> EditorMode {
        self.state.mode()
    }

    /// Selected paths in canvas order.
    pub fn selection_in_order(&self) -> Vec<PathRef> {
        self.paths
            .iter()
            .filter(|path| self.selected_paths.contains(path))
            .cloned()
            .collect()
    }

    /// Union of all path bounds; `None` for an empty canvas.
    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::union_all(self.paths.iter().map(PathRef::bounds))
    }

    pub fn to_drawing(&self) -> Drawing {
        Drawing {
            paths: self.paths.iter().map(|path| path.borrow().to_data()).collect(),
            canvas_size: self.canvas_size,
        }
    }
}

/// The observable state of a document at one moment.
///
/// Paths are held by reference, so restoring a snapshot brings back the very same path
/// objects, not copies.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub paths: Vec<PathRef>,
    pub selection: Vec<PathRef>,
    pub canvas_size: Size,
    /// File association to put back. `None` leaves the document's association alone.
    pub file_info: Option<Option<FileInformation>>,
    /// Mode to put back. `None` leaves the current mode alone.
    pub mode: Option<EditorMode>,
}

impl Snapshot {
    pub fn capture(document: &Document) -> Self {
        Self {
            paths: document.paths.to_vec(),
            selection: document.selection_in_order(),
            canvas_size: document.canvas_size,
            file_info: None,
            mode: None,
        }
    }

    /// Records the document's current mode and file association for whichever of them
    /// `after` changes, so that undoing restores only what the entry touched.
    pub fn cover(&mut self, after: &Snapshot, document: &Document) {
        if after.mode.is_some() {
            self.mode = Some(document.mode());
        }
        if after.file_info.is_some() {
            self.file_info = Some(document.file_info.clone());
        }
    }

    /// Puts `document` back into this state. Any gesture in progress is abandoned.
    pub fn restore(&self, document: &mut Document) {
        document.state.abandon_gestures();
        if let Some(mode) = self.mode.filter(|&mode| mode != document.mode()) {
            document.state = EditorState::for_mode(mode);
        }
        document.paths.reset_to(self.paths.iter().cloned());
        document.selected_paths.reset_to(self.selection.iter().cloned());
        document.canvas_size = self.canvas_size;
        if let Some(file_info) = &self.file_info {
            document.file_info = file_info.clone();
        }
    }

    /// A copy in which each path is replaced by its image under `replace`, keeping canvas
    /// order and carrying the selection over to the replacements.
    pub fn map_paths(&self, mut replace: impl FnMut(&PathRef) -> Option<PathRef>) -> Self {
        let replacements: HashMap<PathRef, PathRef> = self
            .paths
            .iter()
            .filter_map(|path| Some((path.clone(), replace(path)?)))
            .collect();
        let image = |path: &PathRef| replacements.get(path).unwrap_or(path).clone();
        Self {
            paths: self.paths.iter().map(image).collect(),
            selection: self.selection.iter().map(image).collect(),
            ..self.clone()
        }
    }
}
