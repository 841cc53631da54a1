use std::cell::RefCell;
use std::rc::Rc;

use crate::Dispose;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Signal<T>(Rc<Inner<T>>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: RefCell<T>,
    // Slots are tombstoned on unsubscribe so ids stay stable.
    subs: RefCell<Vec<Option<Subscriber<T>>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            subs: RefCell::new(Vec::new()),
        }))
    }
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }
    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }
    /// Stores `v` and notifies only when it differs from the current value.
    pub fn set_if_changed(&self, v: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut value = self.0.value.borrow_mut();
            if *value == v {
                return false;
            }
            *value = v;
        }
        self.notify();
        true
    }
    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut subs = self.0.subs.borrow_mut();
        subs.push(Some(Rc::new(f)));
        subs.len() - 1
    }
    pub fn unsubscribe(&self, id: SubId) {
        if let Some(slot) = self.0.subs.borrow_mut().get_mut(id) {
            *slot = None;
        }
    }
    /// Subscribe and get a guard that unsubscribes when run.
    pub fn watch(&self, f: impl Fn(&T) + 'static) -> Dispose {
        let id = self.subscribe(f);
        let sig = self.clone();
        Dispose::new(move || sig.unsubscribe(id))
    }
    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().iter().filter(|s| s.is_some()).count()
    }

    // Subscribers may read this signal and (un)subscribe; writing to the signal
    // they observe from inside the callback is a borrow panic.
    fn notify(&self) {
        let subs: Vec<Subscriber<T>> = self.0.subs.borrow().iter().flatten().cloned().collect();
        let value = self.0.value.borrow();
        for s in subs {
            s(&value);
        }
    }
}

pub fn signal<T: 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}
