use serde::{Deserialize, Serialize};

/// Phase of a pointer gesture, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Button pressed or finger placed.
    Down,
    Move,
    /// Button released or finger lifted.
    Up,
}

/// Identifies one input source (the mouse, a stylus, or a single touch contact).
///
/// Each device owns its own gesture, so two fingers can draw two strokes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub u64);

impl DeviceId {
    pub const MOUSE: Self = Self(0);
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::MOUSE
    }
}
