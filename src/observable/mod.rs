//! Collections that announce their mutations.
//!
//! Every single-item mutation runs in two phases. Validators see a [`Pending`] description first
//! and any of them can veto it; if none does, the storage is changed and observers receive the
//! matching [`Change`]. Bulk replacement ([`ObservableCollection::reset_to`] and `clear`) skips the
//! validators and emits a single [`Change::Reset`].

mod bus;
mod collection;
mod events;
mod storage;

pub use bus::SubscriptionId;
pub use collection::{ObservableCollection, ObservableList, ObservableSet};
pub use events::{Change, Pending};
pub use storage::Storage;
