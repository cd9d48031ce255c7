//! Gesture state of the editor, one variant per mode.
//!
//! ```text
//!   Drawing { current_paths }  ──set_mode(Select)──►  Selecting { press, deadline, move }
//!            ▲                                                   │
//!            └───────────────set_mode(Draw)──────────────────────┘
//! ```
//!
//! Each variant carries only what its mode needs. Switching modes replaces the variant, so
//! in-progress strokes and pending moves of the old mode cannot leak into the new one.

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Vector};
use crate::input::DeviceId;
use crate::path::PathRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    Draw,
    Select,
}

/// A drag of the selected paths that has started but is not committed yet.
#[derive(Debug, Clone)]
pub struct MoveInfo {
    /// Where the press that armed the move happened.
    pub start: Point,
    /// Every path on the canvas when the move began, in canvas order.
    pub original_paths: Vec<PathRef>,
    /// The paths being dragged.
    pub moving: Vec<PathRef>,
}

impl MoveInfo {
    pub fn delta_to(&self, point: Point) -> Vector {
        point - self.start
    }
}

#[derive(Debug, Clone)]
pub enum EditorState {
    Drawing {
        /// The stroke each device is currently drawing.
        current_paths: HashMap<DeviceId, PathRef>,
    },
    Selecting {
        /// Where the current press went down; cleared once a move starts.
        press_point: Option<Point>,
        /// When a press on a selected path turns into a move.
        move_deadline: Option<Instant>,
        move_info: Option<MoveInfo>,
    },
}

impl Default for EditorState {
    fn default() -> Self {
        Self::for_mode(EditorMode::Draw)
    }
}

impl EditorState {
    /// Fresh state for `mode`, with no gesture in progress.
    pub fn for_mode(mode: EditorMode) -> Self {
        match mode {
            EditorMode::Draw => EditorState::Drawing {
                current_paths: HashMap::new(),
            },
            EditorMode::Select => EditorState::Selecting {
                press_point: None,
                move_deadline: None,
                move_info: None,
            },
        }
    }

    pub fn mode(&self) -> EditorMode {
        match self {
            EditorState::Drawing { .. } => EditorMode::Draw,
            EditorState::Selecting { .. } => EditorMode::Select,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, EditorState::Selecting { .. })
    }

    pub fn is_moving(&self) -> bool {
        self.move_info().is_some()
    }

    pub fn current_path(&self, device: DeviceId) -> Option<&PathRef> {
        match self {
            EditorState::Drawing { current_paths } => current_paths.get(&device),
            _ => None,
        }
    }

    /// Strokes being drawn right now, including those not yet on the canvas.
    pub fn current_paths(&self) -> impl Iterator<Item = &PathRef> {
        let paths = match self {
            EditorState::Drawing { current_paths } => Some(current_paths.values()),
            _ => None,
        };
        paths.into_iter().flatten()
    }

    pub fn move_info(&self) -> Option<&MoveInfo> {
        match self {
            EditorState::Selecting { move_info, .. } => move_info.as_ref(),
            _ => None,
        }
    }

    pub fn move_deadline(&self) -> Option<Instant> {
        match self {
            EditorState::Selecting { move_deadline, .. } => *move_deadline,
            _ => None,
        }
    }

    /// Stops tracking `path` as an in-progress stroke.
    pub fn forget_path(&mut self, path: &PathRef) {
        if let EditorState::Drawing { current_paths } = self {
            current_paths.retain(|_, current| current != path);
        }
    }

    /// Drops any gesture in progress, clearing drag offsets, while staying in the same mode.
    pub fn abandon_gestures(&mut self) {
        if let Some(info) = self.move_info() {
            for path in &info.moving {
                path.borrow_mut().set_movement(Vector::ZERO);
            }
        }
        *self = Self::for_mode(self.mode());
    }
}
