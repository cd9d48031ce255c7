//! The editing state machine.
//!
//! [`EditorModel`] turns pointer events into strokes, selections and moves, and wraps every
//! change to the picture in exactly one undo entry. Gesture handling lives in `gestures`, the
//! selection and clipboard commands in `selection`, whole-canvas transforms in `canvas` and
//! file handling in `files`.

mod canvas;
mod files;
mod gestures;
mod selection;

use std::fmt;

use log::debug;

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::color::Color;
use crate::command::UndoStack;
use crate::config::EditorConfig;
use crate::document::{Document, Snapshot};
use crate::format::{Drawing, FileInformation};
use crate::geometry::{Rectangle, Size};
use crate::observable::{ObservableList, ObservableSet};
use crate::path::{DrawablePath, PathRef};
use crate::state::{AutoSaver, EditorMode, EditorState};
use crate::style::Style;

const UNTITLED: &str = "[Untitled]";

pub struct EditorModel {
    document: Document,
    undo_stack: UndoStack<Document>,
    config: EditorConfig,
    clipboard: Box<dyn Clipboard>,
    stroke_color: Color,
    stroke_thickness: f64,
}

impl fmt::Debug for EditorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorModel")
            .field("document", &self.document)
            .field("undo_stack", &self.undo_stack)
            .field("stroke_color", &self.stroke_color)
            .field("stroke_thickness", &self.stroke_thickness)
            .finish_non_exhaustive()
    }
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorModel {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let config = config.validated();
        Self {
            document: Document::new(config.canvas_size),
            undo_stack: UndoStack::new(),
            stroke_color: config.stroke_color,
            stroke_thickness: config.stroke_thickness,
            clipboard: Box::new(MemoryClipboard::new()),
            config,
        }
    }

    /// Starts from the last auto-saved picture, if any. Restoring it is not an undo entry.
    pub fn with_autosave(config: EditorConfig) -> Self {
        let mut editor = Self::with_config(config);
        if let Some(drawing) = AutoSaver::from_config(&editor.config).open() {
            if drawing.canvas_size.is_positive() {
                debug!("restoring auto-saved picture with {} paths", drawing.paths.len());
                editor.document.canvas_size = drawing.canvas_size;
                editor.document.paths.reset_to(paths_from_drawing(&drawing));
            }
        }
        editor
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn canvas_size(&self) -> Size {
        self.document.canvas_size
    }

    pub fn paths(&self) -> &ObservableList<PathRef> {
        &self.document.paths
    }

    pub fn selected_paths(&self) -> &ObservableSet<PathRef> {
        &self.document.selected_paths
    }

    pub fn is_selected(&self, path: &PathRef) -> bool {
        path.is_selected(&self.document.selected_paths)
    }

    pub fn state(&self) -> &EditorState {
        &self.document.state
    }

    pub fn mode(&self) -> EditorMode {
        self.document.mode()
    }

    /// Switching to Select drops strokes still being drawn; switching to Draw clears the
    /// selection. Neither is an undo entry.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode() == mode {
            return;
        }
        self.document.state.abandon_gestures();
        if mode == EditorMode::Draw && !self.document.selected_paths.is_empty() {
            self.document.selected_paths.clear();
        }
        self.document.state = EditorState::for_mode(mode);
        debug!("mode changed to {mode:?}");
    }

    pub fn file_info(&self) -> Option<&FileInformation> {
        self.document.file_info.as_ref()
    }

    /// Display name of the picture: the file stem, or `[Untitled]`.
    pub fn file_name(&self) -> String {
        self.file_info()
            .map(FileInformation::name)
            .unwrap_or_else(|| UNTITLED.to_owned())
    }

    /// The picture in exchange form.
    pub fn drawing(&self) -> Drawing {
        self.document.to_drawing()
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        self.document.bounds()
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    pub fn stroke_thickness(&self) -> f64 {
        self.stroke_thickness
    }

    /// Non-positive or non-finite thicknesses are ignored.
    pub fn set_stroke_thickness(&mut self, thickness: f64) {
        if thickness > 0.0 && thickness.is_finite() {
            self.stroke_thickness = thickness;
        }
    }

    /// Copies the style's settings into the current stroke settings.
    pub fn apply_style(&mut self, style: &Style) {
        if let Some(color) = style.stroke_color {
            self.set_stroke_color(color);
        }
        if let Some(thickness) = style.stroke_thickness {
            self.set_stroke_thickness(thickness);
        }
    }

    pub fn is_style_active(&self, style: &Style) -> bool {
        style.is_active(self.stroke_color, self.stroke_thickness)
    }

    pub fn undo_stack(&self) -> &UndoStack<Document> {
        &self.undo_stack
    }

    /// Records a custom reversible action on the document.
    pub fn do_action(
        &mut self,
        name: impl Into<String>,
        redo: impl FnMut(&mut Document) + 'static,
        undo: impl FnMut(&mut Document) + 'static,
    ) {
        self.undo_stack.do_action(name, redo, undo, &mut self.document);
    }

    pub fn undo(&mut self) -> bool {
        self.undo_stack.undo(&mut self.document)
    }

    pub fn redo(&mut self) -> bool {
        self.undo_stack.redo(&mut self.document)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    /// Records the change from `before` to `after` as one undo entry and applies it.
    fn commit(&mut self, name: &'static str, before: Snapshot, after: Snapshot) {
        self.undo_stack.do_action(
            name,
            move |document: &mut Document| after.restore(document),
            move |document: &mut Document| before.restore(document),
            &mut self.document,
        );
    }

    /// Snapshots the document, lets `edit` describe the target state, and commits it.
    fn change(&mut self, name: &'static str, edit: impl FnOnce(&mut Snapshot)) {
        let mut before = Snapshot::capture(&self.document);
        let mut after = before.clone();
        edit(&mut after);
        before.cover(&after, &self.document);
        self.commit(name, before, after);
    }
}

pub(crate) fn paths_from_drawing(drawing: &Drawing) -> Vec<PathRef> {
    drawing
        .paths
        .iter()
        .filter_map(|data| DrawablePath::from_data(data).ok())
        .map(PathRef::new)
        .collect()
}
