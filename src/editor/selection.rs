use log::{debug, warn};

use super::EditorModel;
use crate::error::EditorError;
use crate::format::binary;
use crate::path::{DrawablePath, PathRef};
use crate::state::EditorMode;

impl EditorModel {
    pub fn is_something_selected(&self) -> bool {
        !self.document.selected_paths.is_empty()
    }

    pub fn can_select_all(&self) -> bool {
        self.document.selected_paths.len() < self.document.paths.len()
    }

    pub fn can_invert_selection(&self) -> bool {
        !self.document.paths.is_empty()
    }

    pub fn can_paste(&self) -> bool {
        self.clipboard.has_data()
    }

    /// Selects every path and switches to Select mode.
    pub fn select_all(&mut self) {
        self.change("Select All", |after| {
            after.selection = after.paths.clone();
            after.mode = Some(EditorMode::Select);
        });
    }

    pub fn deselect_all(&mut self) {
        self.change("Deselect All", |after| after.selection.clear());
    }

    /// Selects exactly the unselected paths; switches to Select mode if any end up selected.
    pub fn invert_selection(&mut self) {
        self.change("Invert Selection", |after| {
            let inverted: Vec<PathRef> = after
                .paths
                .iter()
                .filter(|path| !after.selection.contains(path))
                .cloned()
                .collect();
            if !inverted.is_empty() {
                after.mode = Some(EditorMode::Select);
            }
            after.selection = inverted;
        });
    }

    pub fn delete(&mut self) {
        self.remove_selected("Delete");
    }

    fn remove_selected(&mut self, name: &'static str) {
        self.change(name, |after| {
            let selection = std::mem::take(&mut after.selection);
            after.paths.retain(|path| !selection.contains(path));
        });
    }

    /// Adds a copy of each selected path on top and selects the copies.
    pub fn duplicate(&mut self) {
        let copies: Vec<PathRef> = self
            .document
            .selection_in_order()
            .iter()
            .map(|path| PathRef::new(path.borrow().duplicate()))
            .collect();
        self.change("Duplicate", |after| {
            after.paths.extend(copies.iter().cloned());
            after.selection = copies;
        });
    }

    /// Writes the selected paths, in canvas order, to the clipboard. Not an undo entry.
    pub fn copy(&mut self) -> Result<(), EditorError> {
        let mut buffer = Vec::new();
        for path in self.document.selection_in_order() {
            binary::write_path(&mut buffer, &path.borrow().to_data())?;
        }
        debug!("copied {} bytes", buffer.len());
        self.clipboard.set_data(buffer);
        Ok(())
    }

    pub fn cut(&mut self) -> Result<(), EditorError> {
        self.copy()?;
        self.remove_selected("Cut");
        Ok(())
    }

    /// Adds the clipboard's paths on top, selects them and switches to Select mode.
    ///
    /// A clipboard without a well-formed path buffer fails with [`EditorError::Clipboard`]
    /// and changes nothing.
    pub fn paste(&mut self) -> Result<(), EditorError> {
        let records = self
            .clipboard
            .data()
            .and_then(|bytes| binary::read_paths(&bytes))
            .filter(|records| !records.is_empty())
            .ok_or_else(|| {
                warn!("clipboard holds no path data");
                EditorError::Clipboard
            })?;
        let pasted = records
            .iter()
            .map(|data| DrawablePath::from_data(data).map(PathRef::new))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| EditorError::Clipboard)?;
        self.change("Paste", |after| {
            after.paths.extend(pasted.iter().cloned());
            after.selection = pasted;
            after.mode = Some(EditorMode::Select);
        });
        Ok(())
    }
}
