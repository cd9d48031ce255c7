use std::cell::RefCell;
use std::fmt;

use super::{Change, Pending};

/// Handle returned by `subscribe`/`guard`; pass it back to `unsubscribe` on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) type Validator<S, T> = Box<dyn FnMut(&S, &Pending<'_, T>) -> bool>;
pub(crate) type Observer<S, T> = Box<dyn FnMut(&S, &Change<'_, T>)>;

struct Registry<S, T> {
    next_id: u64,
    validators: Vec<(SubscriptionId, Validator<S, T>)>,
    observers: Vec<(SubscriptionId, Observer<S, T>)>,
}

/// Listener registry shared by every observable collection.
///
/// Registration goes through `&self` so several views can attach to a collection they only
/// borrow. Callbacks must not (un)subscribe on the bus that is currently invoking them.
pub(crate) struct ListenerBus<S, T> {
    registry: RefCell<Registry<S, T>>,
}

impl<S, T> Default for ListenerBus<S, T> {
    fn default() -> Self {
        Self {
            registry: RefCell::new(Registry {
                next_id: 0,
                validators: Vec::new(),
                observers: Vec::new(),
            }),
        }
    }
}

impl<S, T> fmt::Debug for ListenerBus<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("ListenerBus")
            .field("validators", &registry.validators.len())
            .field("observers", &registry.observers.len())
            .finish()
    }
}

impl<S, T> ListenerBus<S, T> {
    fn next_id(registry: &mut Registry<S, T>) -> SubscriptionId {
        registry.next_id += 1;
        SubscriptionId(registry.next_id)
    }

    pub fn guard(&self, validator: Validator<S, T>) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = Self::next_id(&mut registry);
        registry.validators.push((id, validator));
        id
    }

    pub fn subscribe(&self, observer: Observer<S, T>) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        let id = Self::next_id(&mut registry);
        registry.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.validators.len() + registry.observers.len();
        registry.validators.retain(|(other, _)| *other != id);
        registry.observers.retain(|(other, _)| *other != id);
        before != registry.validators.len() + registry.observers.len()
    }

    /// Runs validators in registration order; the first veto wins and the rest are skipped.
    pub fn allows(&self, storage: &S, pending: &Pending<'_, T>) -> bool {
        let mut registry = self.registry.borrow_mut();
        registry
            .validators
            .iter_mut()
            .all(|(_, validator)| validator(storage, pending))
    }

    pub fn emit(&self, storage: &S, change: &Change<'_, T>) {
        let mut registry = self.registry.borrow_mut();
        for (_, observer) in registry.observers.iter_mut() {
            observer(storage, change);
        }
    }

    pub fn listener_count(&self) -> usize {
        let registry = self.registry.borrow();
        registry.validators.len() + registry.observers.len()
    }
}
