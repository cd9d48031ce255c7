use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Misuse of an ordered observable collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path needs at least one point.
    #[error("a path must contain at least one point")]
    Empty,
}

/// Errors surfaced by editor commands.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The loader produced no result for this file.
    #[error("could not load {}: the file is malformed or not supported", path.display())]
    Malformed { path: PathBuf },

    #[error("could not save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("the picture has no associated file")]
    NoFileAssociated,

    #[error("canvas size must be positive and finite")]
    InvalidCanvasSize,

    #[error("{0} cannot be executed in the current state")]
    CannotExecute(&'static str),

    #[error("the clipboard does not contain valid path data")]
    Clipboard,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the background stores (auto-save, style book).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("stored data in {} is malformed", .0.display())]
    Malformed(PathBuf),
}
