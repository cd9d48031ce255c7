/// A mutation that is about to happen. Handed to validators, which may veto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pending<'a, T> {
    Add(&'a T),
    Remove(&'a T),
    Insert { index: usize, item: &'a T },
    RemoveAt { index: usize, item: &'a T },
    Replace { index: usize, old: &'a T, new: &'a T },
}

/// A mutation that has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change<'a, T> {
    Added(&'a T),
    Removed(&'a T),
    Inserted { index: usize, item: &'a T },
    RemovedAt { index: usize, item: &'a T },
    Replaced { index: usize, old: &'a T, new: &'a T },
    /// The whole content was swapped out; observers should re-read the collection.
    Reset,
}
