use std::cell::RefCell;
use std::rc::Rc;

use coatline_core::{KeyEvent, Listeners, Result, ScrollLock, Signal, signal};

use crate::item::{Catalog, Filter, GalleryItem};
use crate::lightbox::Lightbox;

/// Gallery page state: active filter, displayed grid, and the lightbox over it.
pub struct Gallery {
    catalog: Catalog,
    filter: Signal<Filter>,
    visible: RefCell<Rc<[GalleryItem]>>,
    lightbox: Lightbox,
}

impl Gallery {
    pub fn new(catalog: Catalog, lock: ScrollLock, keys: Listeners<KeyEvent>) -> Self {
        let visible = catalog.items();
        Self {
            lightbox: Lightbox::new(visible.clone(), lock, keys),
            visible: RefCell::new(visible),
            filter: signal(Filter::All),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> Filter {
        self.filter.get()
    }

    pub fn filter_signal(&self) -> Signal<Filter> {
        self.filter.clone()
    }

    pub fn visible(&self) -> Rc<[GalleryItem]> {
        self.visible.borrow().clone()
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Returns whether the filter changed. A change closes an open lightbox.
    ///
    /// Filter subscribers are notified last and see the new grid.
    pub fn set_filter(&self, filter: Filter) -> bool {
        if self.filter.with(|f| *f == filter) {
            return false;
        }
        let visible = self.catalog.filtered(&filter);
        log::debug!("gallery filter {:?}: {} items", filter, visible.len());
        self.lightbox.set_items(visible.clone());
        *self.visible.borrow_mut() = visible;
        self.filter.set(filter);
        true
    }

    /// Opens the lightbox on the `index`th displayed tile.
    pub fn open(&self, index: usize) -> Result<()> {
        self.lightbox.open(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> (Gallery, ScrollLock) {
        let lock = ScrollLock::new();
        let g = Gallery::new(Catalog::bundled().unwrap(), lock.clone(), Listeners::new());
        (g, lock)
    }

    #[test]
    fn filter_change_closes_lightbox() {
        let (g, lock) = gallery();
        g.open(17).unwrap();
        assert!(lock.is_locked());

        assert!(g.set_filter(Filter::Category("preparation".into())));
        assert!(!g.lightbox().is_open());
        assert!(!lock.is_locked());
        assert_eq!(g.visible().len(), 2);

        g.open(1).unwrap();
        assert_eq!(g.lightbox().next(), Some(0));
    }

    #[test]
    fn filter_subscribers_see_the_new_grid() {
        let (g, _) = gallery();
        let g = Rc::new(g);
        let seen = Rc::new(RefCell::new(None));
        let _watch = {
            let weak = Rc::downgrade(&g);
            let seen = seen.clone();
            g.filter_signal().watch(move |_| {
                if let Some(g) = weak.upgrade() {
                    *seen.borrow_mut() = Some((g.visible().len(), g.lightbox().is_open()));
                }
            })
        };

        g.open(17).unwrap();
        g.set_filter(Filter::Category("preparation".into()));
        assert_eq!(*seen.borrow(), Some((2, false)));
    }

    #[test]
    fn same_filter_is_not_a_change() {
        let (g, _) = gallery();
        g.open(3).unwrap();
        assert!(!g.set_filter(Filter::All));
        assert_eq!(g.lightbox().index(), Some(3));
    }
}
