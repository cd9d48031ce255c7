mod editor_state;
mod persistence;

pub use editor_state::{EditorMode, EditorState, MoveInfo};
pub use persistence::{AutoSaver, PersistenceResult};
