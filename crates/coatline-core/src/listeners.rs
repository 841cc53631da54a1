use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::Dispose;

new_key_type! {
    pub struct ListenerKey;
}

type Callback<E> = Rc<dyn Fn(&E)>;

/// Fan-out for one kind of host event (keydown, scroll, resize).
///
/// Every registration hands back a key or a `Dispose`; a registry with
/// entries left after its owner unmounted is a leak.
pub struct Listeners<E> {
    slots: Rc<RefCell<SlotMap<ListenerKey, Callback<E>>>>,
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    pub fn add(&self, f: impl Fn(&E) + 'static) -> ListenerKey {
        self.slots.borrow_mut().insert(Rc::new(f))
    }

    pub fn remove(&self, key: ListenerKey) -> bool {
        self.slots.borrow_mut().remove(key).is_some()
    }

    /// Registers `f` and returns the guard that removes it.
    pub fn listen(&self, f: impl Fn(&E) + 'static) -> Dispose {
        let key = self.add(f);
        let slots = Rc::downgrade(&self.slots);
        Dispose::new(move || {
            if let Some(slots) = slots.upgrade() {
                slots.borrow_mut().remove(key);
            }
        })
    }

    /// Delivers `event` to every listener registered at call time. A listener
    /// removed by an earlier one during the same dispatch is skipped.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(ListenerKey, Callback<E>)> = self
            .slots
            .borrow()
            .iter()
            .map(|(k, f)| (k, f.clone()))
            .collect();
        for (key, f) in snapshot {
            if self.slots.borrow().contains_key(key) {
                f(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}
