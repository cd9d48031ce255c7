use std::collections::HashSet;
use std::hash::Hash;

/// Backing container of an [`ObservableCollection`](super::ObservableCollection).
pub trait Storage<T>: Default {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// False if adding `item` would not change the container (a set that already holds it).
    fn accepts(&self, item: &T) -> bool;

    fn put(&mut self, item: T);

    /// Removes the first item equal to `item`.
    fn take(&mut self, item: &T) -> Option<T>;

    fn has(&self, item: &T) -> bool;

    fn count(&self) -> usize;

    fn items(&self) -> Self::Iter<'_>;

    fn wipe(&mut self);
}

impl<T: PartialEq> Storage<T> for Vec<T> {
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        T: 'a;

    fn accepts(&self, _item: &T) -> bool {
        true
    }

    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self, item: &T) -> Option<T> {
        let index = self.iter().position(|x| x == item)?;
        Some(self.remove(index))
    }

    fn has(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn wipe(&mut self) {
        self.clear();
    }
}

impl<T: Eq + Hash> Storage<T> for HashSet<T> {
    type Iter<'a>
        = std::collections::hash_set::Iter<'a, T>
    where
        T: 'a;

    fn accepts(&self, item: &T) -> bool {
        !self.contains(item)
    }

    fn put(&mut self, item: T) {
        self.insert(item);
    }

    fn take(&mut self, item: &T) -> Option<T> {
        HashSet::take(self, item)
    }

    fn has(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn wipe(&mut self) {
        self.clear();
    }
}
