use coatline_core::{Key, KeyEvent, Listeners, Scope, ScrollLock};
use coatline_gallery::{Catalog, Filter, Gallery};

#[test]
fn gallery_page_lifecycle() {
    let lock = ScrollLock::new();
    let keys: Listeners<KeyEvent> = Listeners::new();
    let scope = Scope::new();

    let gallery = Gallery::new(Catalog::bundled().unwrap(), lock.clone(), keys.clone());
    gallery.lightbox().bind_to(&scope);

    gallery.open(19).unwrap();
    keys.emit(&KeyEvent::new(Key::ArrowRight));
    assert_eq!(gallery.lightbox().index(), Some(0));
    keys.emit(&KeyEvent::new(Key::ArrowLeft));
    keys.emit(&KeyEvent::new(Key::ArrowLeft));
    assert_eq!(gallery.lightbox().index(), Some(18));
    assert_eq!(
        gallery.lightbox().current().map(|i| i.src),
        Some("/gallery/loading-dock.jpg".to_string())
    );

    gallery.set_filter(Filter::Category("powder".into()));
    assert!(!lock.is_locked());
    assert!(keys.is_empty());

    gallery.open(0).unwrap();
    assert!(lock.is_locked());

    // Navigating away from the page with the viewer still open.
    scope.dispose();
    assert!(!lock.is_locked());
    assert!(keys.is_empty());
}
