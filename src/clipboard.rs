use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Exchange buffer used by Cut, Copy and Paste.
///
/// The editor only moves opaque bytes through it; hosts plug in the OS clipboard here.
pub trait Clipboard {
    fn set_data(&mut self, data: Vec<u8>);

    fn data(&self) -> Option<Vec<u8>>;

    fn has_data(&self) -> bool {
        self.data().is_some()
    }
}

/// In-process clipboard. Clones share one buffer, so two editors built with clones of the same
/// `MemoryClipboard` can copy and paste between each other.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    buffer: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_data(&mut self, data: Vec<u8>) {
        *self.buffer.borrow_mut() = Some(data);
    }

    fn data(&self) -> Option<Vec<u8>> {
        self.buffer.borrow().clone()
    }

    fn has_data(&self) -> bool {
        self.buffer.borrow().is_some()
    }
}

impl fmt::Debug for MemoryClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.buffer.borrow().as_ref().map(Vec::len);
        f.debug_struct("MemoryClipboard").field("bytes", &len).finish()
    }
}
