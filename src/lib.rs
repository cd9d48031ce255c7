#![warn(clippy::all, rust_2018_idioms)]

pub mod clipboard;
pub mod color;
pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod format;
pub mod geometry;
pub mod input;
pub mod observable;
pub mod path;
pub mod state;
pub mod style;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use color::Color;
pub use command::{Command, UndoStack};
pub use config::EditorConfig;
pub use document::Document;
pub use editor::EditorModel;
pub use error::{CollectionError, ConfigError, EditorError, PathError, PersistenceError};
pub use format::{Drawing, FileFormat, FileInformation, PathData};
pub use geometry::{Matrix, Point, Rectangle, Size, Vector};
pub use input::{DeviceId, InputEvent};
pub use observable::{Change, ObservableList, ObservableSet, Pending};
pub use path::{DrawablePath, PathRef};
pub use state::{AutoSaver, EditorMode, EditorState};
pub use style::{Style, StyleBook};
