use std::collections::HashSet;
use std::fmt;

use super::bus::ListenerBus;
use super::{Change, Pending, Storage, SubscriptionId};
use crate::error::CollectionError;

/// A container wrapper that lets listeners veto and observe each mutation.
pub struct ObservableCollection<T, S = Vec<T>> {
    items: S,
    bus: ListenerBus<S, T>,
}

/// Ordered variant, with index-based operations.
pub type ObservableList<T> = ObservableCollection<T, Vec<T>>;

/// Unordered variant holding each item at most once.
pub type ObservableSet<T> = ObservableCollection<T, HashSet<T>>;

impl<T, S: Storage<T>> Default for ObservableCollection<T, S> {
    fn default() -> Self {
        Self {
            items: S::default(),
            bus: ListenerBus::default(),
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for ObservableCollection<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &self.items)
            .field("listeners", &self.bus)
            .finish()
    }
}

impl<T: Clone, S: Storage<T>> ObservableCollection<T, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection with initial content; nobody is listening yet, so nothing fires.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for item in items {
            collection.items.put(item);
        }
        collection
    }

    /// Registers a validator. Returning `false` vetoes the pending mutation.
    pub fn guard(&self, validator: impl FnMut(&S, &Pending<'_, T>) -> bool + 'static) -> SubscriptionId {
        self.bus.guard(Box::new(validator))
    }

    /// Registers an observer of applied mutations.
    pub fn subscribe(&self, observer: impl FnMut(&S, &Change<'_, T>) + 'static) -> SubscriptionId {
        self.bus.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    /// Returns whether the collection changed. A set that already holds `item` changes nothing
    /// and consults no listener.
    pub fn add(&mut self, item: T) -> bool {
        if !self.items.accepts(&item) || !self.bus.allows(&self.items, &Pending::Add(&item)) {
            return false;
        }
        self.items.put(item.clone());
        self.bus.emit(&self.items, &Change::Added(&item));
        true
    }

    pub fn remove(&mut self, item: &T) -> bool {
        if !self.items.has(item) || !self.bus.allows(&self.items, &Pending::Remove(item)) {
            return false;
        }
        match self.items.take(item) {
            Some(removed) => {
                self.bus.emit(&self.items, &Change::Removed(&removed));
                true
            }
            None => false,
        }
    }

    /// Adds each item in turn; returns how many were accepted.
    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut accepted = 0;
        for item in items {
            if self.add(item) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn remove_range<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: 'a,
    {
        let mut removed = 0;
        for item in items {
            if self.remove(item) {
                removed += 1;
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.wipe();
        self.bus.emit(&self.items, &Change::Reset);
    }

    /// Replaces the whole content with one [`Change::Reset`] notification.
    pub fn reset_to(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.wipe();
        for item in items {
            self.items.put(item);
        }
        self.bus.emit(&self.items, &Change::Reset);
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.has(item)
    }

    pub fn len(&self) -> usize {
        self.items.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> S::Iter<'_> {
        self.items.items()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn as_inner(&self) -> &S {
        &self.items
    }
}

impl<'a, T: Clone, S: Storage<T>> IntoIterator for &'a ObservableCollection<T, S> {
    type Item = &'a T;
    type IntoIter = S::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + PartialEq> ObservableCollection<T, Vec<T>> {
    fn check_index(&self, index: usize, len: usize) -> Result<(), CollectionError> {
        if index < len {
            Ok(())
        } else {
            Err(CollectionError::IndexOutOfRange { index, len: self.items.len() })
        }
    }

    /// `index` may equal `len()` to append.
    pub fn insert(&mut self, index: usize, item: T) -> Result<bool, CollectionError> {
        self.check_index(index, self.items.len() + 1)?;
        if !self.bus.allows(&self.items, &Pending::Insert { index, item: &item }) {
            return Ok(false);
        }
        self.items.insert(index, item);
        self.bus.emit(&self.items, &Change::Inserted { index, item: &self.items[index] });
        Ok(true)
    }

    /// `Ok(None)` when a validator vetoed the removal.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<T>, CollectionError> {
        self.check_index(index, self.items.len())?;
        if !self.bus.allows(&self.items, &Pending::RemoveAt { index, item: &self.items[index] }) {
            return Ok(None);
        }
        let removed = self.items.remove(index);
        self.bus.emit(&self.items, &Change::RemovedAt { index, item: &removed });
        Ok(Some(removed))
    }

    /// Replaces the item at `index`. Writing an equal value is a no-op that fires nothing.
    pub fn set(&mut self, index: usize, value: T) -> Result<bool, CollectionError> {
        self.check_index(index, self.items.len())?;
        if self.items[index] == value {
            return Ok(false);
        }
        let pending = Pending::Replace { index, old: &self.items[index], new: &value };
        if !self.bus.allows(&self.items, &pending) {
            return Ok(false);
        }
        let old = std::mem::replace(&mut self.items[index], value);
        self.bus.emit(
            &self.items,
            &Change::Replaced { index, old: &old, new: &self.items[index] },
        );
        Ok(true)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
