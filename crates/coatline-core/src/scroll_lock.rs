use std::cell::Cell;
use std::rc::Rc;

use crate::{Signal, signal};

/// Document scroll lock (`overflow: hidden` on the body).
///
/// Owners acquire a guard instead of toggling a flag; the page stays locked
/// while any guard is alive and unlocks when the last one is released or
/// dropped. The renderer binds to `locked()`.
#[derive(Clone)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
    locked: Signal<bool>,
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        Self {
            holders: Rc::new(Cell::new(0)),
            locked: signal(false),
        }
    }

    pub fn acquire(&self, owner: &'static str) -> ScrollLockGuard {
        let n = self.holders.get() + 1;
        self.holders.set(n);
        log::debug!("scroll lock acquired by {owner} (holders: {n})");
        self.locked.set_if_changed(true);
        ScrollLockGuard {
            lock: self.clone(),
            owner,
            released: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.get()
    }

    pub fn locked(&self) -> Signal<bool> {
        self.locked.clone()
    }

    fn release_one(&self, owner: &'static str) {
        let n = self.holders.get().saturating_sub(1);
        self.holders.set(n);
        log::debug!("scroll lock released by {owner} (holders: {n})");
        if n == 0 {
            self.locked.set_if_changed(false);
        }
    }
}

/// Outstanding hold on a `ScrollLock`. Released exactly once.
#[must_use = "dropping the guard releases the scroll lock immediately"]
pub struct ScrollLockGuard {
    lock: ScrollLock,
    owner: &'static str,
    released: bool,
}

impl ScrollLockGuard {
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.lock.release_one(self.owner);
        }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("owner", &self.owner)
            .field("released", &self.released)
            .finish()
    }
}
