//! # Lightbox
//!
//! Full-screen viewer over the currently displayed (post-filter) list. State
//! is a single optional index, so at most one image is ever open.
//!
//! Opening acquires the document scroll lock and installs the keyboard
//! bindings (`Escape`, `ArrowLeft`, `ArrowRight`). Both live in one
//! `OpenSession`; closing drops the session, and so does dropping the
//! controller, so an unmount while open cannot leave the page locked or a
//! key handler behind.
//!
//! ```rust
//! use coatline_core::*;
//! use coatline_gallery::*;
//!
//! let lock = ScrollLock::new();
//! let keys: Listeners<KeyEvent> = Listeners::new();
//! let lb = Lightbox::new(Catalog::bundled()?.items(), lock.clone(), keys.clone());
//!
//! lb.open(19)?;
//! assert!(lock.is_locked());
//! keys.emit(&KeyEvent::new(Key::ArrowRight));
//! assert_eq!(lb.index(), Some(0));
//! keys.emit(&KeyEvent::new(Key::Escape));
//! assert!(!lock.is_locked() && keys.is_empty());
//! # Ok::<(), coatline_core::Error>(())
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use coatline_core::{
    Dispose, Error, Key, KeyEvent, Listeners, Result, Scope, ScrollLock, ScrollLockGuard,
    Signal, SwipeDirection, signal,
};

use crate::item::GalleryItem;

/// Resources held only while the lightbox is open.
struct OpenSession {
    _lock: ScrollLockGuard,
    keys: Dispose,
}

impl Drop for OpenSession {
    fn drop(&mut self) {
        self.keys.run();
    }
}

struct LightboxInner {
    items: RefCell<Rc<[GalleryItem]>>,
    open: Signal<Option<usize>>,
    lock: ScrollLock,
    keys: Listeners<KeyEvent>,
    session: RefCell<Option<OpenSession>>,
}

#[derive(Clone)]
pub struct Lightbox {
    inner: Rc<LightboxInner>,
}

impl Lightbox {
    pub fn new(items: Rc<[GalleryItem]>, lock: ScrollLock, keys: Listeners<KeyEvent>) -> Self {
        Self {
            inner: Rc::new(LightboxInner {
                items: RefCell::new(items),
                open: signal(None),
                lock,
                keys,
                session: RefCell::new(None),
            }),
        }
    }

    /// Closes the lightbox when `scope` is torn down.
    pub fn bind_to(&self, scope: &Scope) {
        let weak = Rc::downgrade(&self.inner);
        scope.add_disposer(move || {
            if let Some(inner) = weak.upgrade() {
                Lightbox { inner }.close();
            }
        });
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> Option<usize> {
        self.inner.open.get()
    }

    pub fn is_open(&self) -> bool {
        self.index().is_some()
    }

    /// The item being shown, if open.
    pub fn current(&self) -> Option<GalleryItem> {
        let i = self.index()?;
        self.inner.items.borrow().get(i).cloned()
    }

    /// Observable open index for the renderer.
    pub fn signal(&self) -> Signal<Option<usize>> {
        self.inner.open.clone()
    }

    pub fn open(&self, index: usize) -> Result<()> {
        let len = self.len();
        if len == 0 {
            return Err(Error::EmptyCollection("gallery"));
        }
        if index >= len {
            log::warn!("lightbox: refusing to open index {index} of {len}");
            return Err(Error::IndexOutOfBounds { index, len });
        }

        let needs_session = self.inner.session.borrow().is_none();
        if needs_session {
            let session = OpenSession {
                _lock: self.inner.lock.acquire("lightbox"),
                keys: self.install_keys(),
            };
            *self.inner.session.borrow_mut() = Some(session);
        }

        log::debug!("lightbox: open {index}/{len}");
        self.inner.open.set_if_changed(Some(index));
        Ok(())
    }

    /// Idempotent.
    pub fn close(&self) {
        let session = self.inner.session.borrow_mut().take();
        if session.is_some() {
            log::debug!("lightbox: close");
        }
        drop(session);
        self.inner.open.set_if_changed(None);
    }

    /// Wraps from the last item to the first. No-op while closed.
    pub fn next(&self) -> Option<usize> {
        self.step(|i, len| (i + 1) % len)
    }

    /// Wraps from the first item to the last. No-op while closed.
    pub fn previous(&self) -> Option<usize> {
        self.step(|i, len| (i + len - 1) % len)
    }

    fn step(&self, f: impl FnOnce(usize, usize) -> usize) -> Option<usize> {
        let i = self.index()?;
        let len = self.len();
        if len == 0 {
            return None;
        }
        let n = f(i, len);
        self.inner.open.set_if_changed(Some(n));
        Some(n)
    }

    /// Replaces the displayed list (filter change). An open lightbox closes
    /// instead of pointing at an unrelated or missing image.
    pub fn set_items(&self, items: Rc<[GalleryItem]>) {
        if self.is_open() {
            log::debug!("lightbox: list changed while open; closing");
            self.close();
        }
        *self.inner.items.borrow_mut() = items;
    }

    /// Returns whether the key was consumed.
    pub fn handle_key(&self, ev: &KeyEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        match ev.key {
            Key::Escape => self.close(),
            Key::ArrowRight => {
                self.next();
            }
            Key::ArrowLeft => {
                self.previous();
            }
            _ => return false,
        }
        true
    }

    /// Swiping left shows the next image, right the previous, down closes.
    pub fn handle_swipe(&self, dir: SwipeDirection) -> bool {
        if !self.is_open() {
            return false;
        }
        match dir {
            SwipeDirection::Left => {
                self.next();
            }
            SwipeDirection::Right => {
                self.previous();
            }
            SwipeDirection::Down => self.close(),
            SwipeDirection::Up => return false,
        }
        true
    }

    fn install_keys(&self) -> Dispose {
        let weak: Weak<LightboxInner> = Rc::downgrade(&self.inner);
        self.inner.keys.listen(move |ev| {
            if let Some(inner) = weak.upgrade() {
                Lightbox { inner }.handle_key(ev);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Rc<[GalleryItem]> {
        (0..n)
            .map(|i| GalleryItem {
                src: format!("/g/{i}.jpg"),
                alt: format!("item {i}"),
                category: None,
            })
            .collect()
    }

    fn lightbox(n: usize) -> (Lightbox, ScrollLock, Listeners<KeyEvent>) {
        let lock = ScrollLock::new();
        let keys = Listeners::new();
        (Lightbox::new(items(n), lock.clone(), keys.clone()), lock, keys)
    }

    #[test]
    fn wraparound_scenario() {
        let (lb, _, _) = lightbox(20);
        lb.open(19).unwrap();
        assert_eq!(lb.next(), Some(0));
        lb.previous();
        assert_eq!(lb.previous(), Some(18));
    }

    #[test]
    fn next_length_times_returns_to_start() {
        let (lb, _, _) = lightbox(7);
        for start in 0..7 {
            lb.open(start).unwrap();
            for _ in 0..7 {
                lb.next();
            }
            assert_eq!(lb.index(), Some(start));
        }
    }

    #[test]
    fn previous_matches_direct_open() {
        let (lb, _, _) = lightbox(5);
        lb.open(0).unwrap();
        assert_eq!(lb.previous(), Some(4));
    }

    #[test]
    fn close_restores_lock_and_is_idempotent() {
        let (lb, lock, keys) = lightbox(3);
        assert!(!lock.is_locked());
        lb.open(1).unwrap();
        lb.open(2).unwrap();
        assert_eq!(lock.holders(), 1);
        assert_eq!(keys.len(), 1);

        lb.close();
        assert!(!lock.is_locked());
        assert!(keys.is_empty());
        lb.close();
        assert!(!lock.is_locked());
        assert_eq!(lb.index(), None);
    }

    #[test]
    fn close_keeps_a_lock_held_by_someone_else() {
        let (lb, lock, _) = lightbox(3);
        let menu = lock.acquire("mobile menu");

        lb.open(0).unwrap();
        assert_eq!(lock.holders(), 2);
        lb.close();
        assert!(lock.is_locked());
        assert_eq!(lock.holders(), 1);

        drop(menu);
        assert!(!lock.is_locked());
    }

    #[test]
    fn navigation_while_closed_is_noop() {
        let (lb, lock, _) = lightbox(3);
        assert_eq!(lb.next(), None);
        assert_eq!(lb.previous(), None);
        assert!(!lb.handle_key(&KeyEvent::new(Key::ArrowRight)));
        assert!(!lock.is_locked());
    }

    #[test]
    fn bad_indices_are_rejected() {
        let (lb, lock, _) = lightbox(3);
        assert!(matches!(
            lb.open(3),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
        let (empty, _, _) = lightbox(0);
        assert!(matches!(empty.open(0), Err(Error::EmptyCollection(_))));
        assert!(!lock.is_locked());
    }

    #[test]
    fn keyboard_bindings() {
        let (lb, lock, keys) = lightbox(4);
        lb.open(0).unwrap();
        keys.emit(&KeyEvent::new(Key::ArrowLeft));
        assert_eq!(lb.index(), Some(3));
        keys.emit(&KeyEvent::new(Key::ArrowRight));
        assert_eq!(lb.index(), Some(0));
        keys.emit(&KeyEvent::new(Key::Character('x')));
        assert_eq!(lb.index(), Some(0));
        keys.emit(&KeyEvent::new(Key::Escape));
        assert!(!lb.is_open());
        assert!(!lock.is_locked());
        assert!(keys.is_empty());
    }

    #[test]
    fn list_change_while_open_closes() {
        let (lb, lock, _) = lightbox(10);
        lb.open(8).unwrap();
        lb.set_items(items(2));
        assert!(!lb.is_open());
        assert!(!lock.is_locked());
        assert_eq!(lb.len(), 2);
    }

    #[test]
    fn drop_while_open_releases_everything() {
        let (lb, lock, keys) = lightbox(3);
        lb.open(0).unwrap();
        drop(lb);
        assert!(!lock.is_locked());
        assert!(keys.is_empty());
    }

    #[test]
    fn scope_teardown_closes() {
        let (lb, lock, _) = lightbox(3);
        let scope = Scope::new();
        lb.bind_to(&scope);
        lb.open(2).unwrap();
        scope.dispose();
        assert!(!lb.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn swipes_navigate() {
        let (lb, _, _) = lightbox(3);
        lb.open(0).unwrap();
        assert!(lb.handle_swipe(SwipeDirection::Left));
        assert_eq!(lb.index(), Some(1));
        assert!(lb.handle_swipe(SwipeDirection::Right));
        assert_eq!(lb.index(), Some(0));
        assert!(!lb.handle_swipe(SwipeDirection::Up));
        assert!(lb.handle_swipe(SwipeDirection::Down));
        assert!(!lb.is_open());
    }
}
