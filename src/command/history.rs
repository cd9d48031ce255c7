use std::fmt;

use log::debug;

type Action<S> = Box<dyn FnMut(&mut S)>;

/// One reversible, named operation.
struct Entry<S> {
    name: String,
    redo: Action<S>,
    undo: Action<S>,
}

/// Undo/redo history of closures over a target `S`.
///
/// The stack does not own the target; each call receives it, which keeps the history and the
/// state it edits as disjoint borrows of the owner. Closures must be infallible in-memory
/// mutations: anything that can fail happens before `do_action` is called.
pub struct UndoStack<S> {
    /// Entries that can be undone, most recent last.
    done: Vec<Entry<S>>,
    /// Entries that can be redone, most recently undone last.
    undone: Vec<Entry<S>>,
}

impl<S> Default for UndoStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for UndoStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |entries: &[Entry<S>]| entries.iter().map(|e| e.name.clone()).collect::<Vec<_>>();
        f.debug_struct("UndoStack")
            .field("done", &names(&self.done))
            .field("undone", &names(&self.undone))
            .finish()
    }
}

impl<S> UndoStack<S> {
    pub fn new() -> Self {
        Self {
            done: Vec::new(),
            undone: Vec::new(),
        }
    }

    /// Runs `redo` on `target` and records the pair. Any available redos are discarded.
    pub fn do_action(
        &mut self,
        name: impl Into<String>,
        mut redo: impl FnMut(&mut S) + 'static,
        undo: impl FnMut(&mut S) + 'static,
        target: &mut S,
    ) {
        let name = name.into();
        redo(target);
        debug!("did {name}");
        self.undone.clear();
        self.done.push(Entry {
            name,
            redo: Box::new(redo),
            undo: Box::new(undo),
        });
    }

    /// Reverts the most recent entry. Returns false if there was nothing to undo.
    pub fn undo(&mut self, target: &mut S) -> bool {
        let Some(mut entry) = self.done.pop() else {
            return false;
        };
        (entry.undo)(target);
        debug!("undid {}", entry.name);
        self.undone.push(entry);
        true
    }

    /// Replays the most recently undone entry. Returns false if there was nothing to redo.
    pub fn redo(&mut self, target: &mut S) -> bool {
        let Some(mut entry) = self.undone.pop() else {
            return false;
        };
        (entry.redo)(target);
        debug!("redid {}", entry.name);
        self.done.push(entry);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Name of the entry [`undo`](Self::undo) would revert.
    pub fn next_undo_name(&self) -> Option<&str> {
        self.done.last().map(|e| e.name.as_str())
    }

    pub fn next_redo_name(&self) -> Option<&str> {
        self.undone.last().map(|e| e.name.as_str())
    }

    pub fn undo_len(&self) -> usize {
        self.done.len()
    }

    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}
