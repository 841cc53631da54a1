//! # Header
//!
//! The fixed header follows the active section: its background and text
//! colors animate toward the active theme's palette and the matching nav
//! entry is highlighted. On narrow screens the nav collapses into a menu that
//! locks document scroll while open.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use coatline_core::{
    AnimatedValue, AnimationSpec, Color, Dispose, Easing, Key, KeyEvent, ScrollLock,
    ScrollLockGuard, Signal, signal,
};
use serde::{Deserialize, Serialize};

use crate::sections::{ActiveSection, HeaderTheme, SectionObserver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderPalette {
    pub background: Color,
    pub text: Color,
}

impl HeaderTheme {
    pub fn palette(self) -> HeaderPalette {
        match self {
            HeaderTheme::Light => HeaderPalette {
                background: Color::from_hex("#F5F3EE").with_alpha(235),
                text: Color::from_hex("#16191D"),
            },
            HeaderTheme::Dark => HeaderPalette {
                background: Color::from_hex("#0D1117").with_alpha(190),
                text: Color::WHITE,
            },
        }
    }
}

/// A link in the header, pointing at a section of the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Section id this entry highlights for.
    pub id: String,
    pub label: String,
    pub href: String,
}

impl NavEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            href: format!("#{id}"),
            label: label.into(),
            id,
        }
    }
}

/// Render-ready nav entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub active: bool,
}

struct HeaderColors {
    background: AnimatedValue<Color>,
    text: AnimatedValue<Color>,
}

impl HeaderColors {
    fn new(palette: HeaderPalette, spec: AnimationSpec) -> Self {
        Self {
            background: AnimatedValue::new(palette.background, spec),
            text: AnimatedValue::new(palette.text, spec),
        }
    }

    fn retarget(&mut self, palette: HeaderPalette, reduced_motion: bool) {
        if reduced_motion {
            self.background.snap_to(palette.background);
            self.text.snap_to(palette.text);
        } else {
            self.background.set_target(palette.background);
            self.text.set_target(palette.text);
        }
    }

    fn current(&self) -> HeaderPalette {
        HeaderPalette {
            background: *self.background.get(),
            text: *self.text.get(),
        }
    }
}

/// Header state driven by a `SectionObserver`.
pub struct Header {
    entries: Vec<NavEntry>,
    theme: Signal<HeaderTheme>,
    active: Signal<Option<String>>,
    colors: Rc<RefCell<HeaderColors>>,
    menu: MobileMenu,
    follow: Dispose,
}

impl Header {
    /// Colors fade over 400 ms unless `reduced_motion` is set, in which case
    /// they switch instantly.
    pub fn new(
        entries: Vec<NavEntry>,
        observer: &SectionObserver,
        lock: ScrollLock,
        reduced_motion: bool,
    ) -> Self {
        let spec = AnimationSpec::tween(Duration::from_millis(400), Easing::EaseInOut);
        let initial = observer.active();
        let theme = initial.as_ref().map(|a| a.theme).unwrap_or_default();

        let header_theme = signal(theme);
        let active = signal(initial.map(|a| a.id));
        let colors = Rc::new(RefCell::new(HeaderColors::new(theme.palette(), spec)));

        let follow = {
            let header_theme = header_theme.clone();
            let active = active.clone();
            let colors = colors.clone();
            observer.signal().watch(move |a: &Option<ActiveSection>| {
                let Some(a) = a else { return };
                active.set_if_changed(Some(a.id.clone()));
                if header_theme.set_if_changed(a.theme) {
                    log::debug!("header theme -> {:?}", a.theme);
                    colors.borrow_mut().retarget(a.theme.palette(), reduced_motion);
                }
            })
        };

        Self {
            entries,
            theme: header_theme,
            active,
            colors,
            menu: MobileMenu::new(lock),
            follow,
        }
    }

    pub fn theme(&self) -> HeaderTheme {
        self.theme.get()
    }

    pub fn theme_signal(&self) -> Signal<HeaderTheme> {
        self.theme.clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.active.get()
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        self.active.with(|active| {
            self.entries
                .iter()
                .map(|e| NavItem {
                    label: e.label.clone(),
                    href: e.href.clone(),
                    active: active.as_deref() == Some(e.id.as_str()),
                })
                .collect()
        })
    }

    /// Advances the color transition and returns the colors to paint.
    pub fn tick(&self) -> HeaderPalette {
        let mut colors = self.colors.borrow_mut();
        colors.background.update();
        colors.text.update();
        colors.current()
    }

    /// Current colors without advancing the transition.
    pub fn palette(&self) -> HeaderPalette {
        self.colors.borrow().current()
    }

    pub fn is_transitioning(&self) -> bool {
        let colors = self.colors.borrow();
        colors.background.is_animating() || colors.text.is_animating()
    }

    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    /// Follows a nav link: closes the mobile menu and returns the target.
    pub fn navigate(&self, id: &str) -> Option<&str> {
        let Some(entry) = self.entries.iter().find(|e| e.id == id) else {
            log::warn!("header: no nav entry for {id:?}");
            return None;
        };
        self.menu.close();
        Some(entry.href.as_str())
    }

    /// Stops following the observer. Also runs on drop.
    pub fn detach(&self) {
        self.follow.run();
    }
}

impl Drop for Header {
    fn drop(&mut self) {
        self.follow.run();
    }
}

/// Collapsible nav for narrow viewports.
pub struct MobileMenu {
    open: Signal<bool>,
    lock: ScrollLock,
    guard: RefCell<Option<ScrollLockGuard>>,
}

impl MobileMenu {
    pub fn new(lock: ScrollLock) -> Self {
        Self {
            open: signal(false),
            lock,
            guard: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    pub fn open(&self) {
        let mut guard = self.guard.borrow_mut();
        if guard.is_none() {
            *guard = Some(self.lock.acquire("mobile menu"));
        }
        drop(guard);
        self.open.set_if_changed(true);
    }

    /// Idempotent.
    pub fn close(&self) {
        let guard = self.guard.borrow_mut().take();
        drop(guard);
        self.open.set_if_changed(false);
    }

    /// Returns the new open state.
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.is_open()
    }

    /// `Escape` closes an open menu. Returns whether the key was consumed.
    pub fn handle_key(&self, ev: &KeyEvent) -> bool {
        if ev.key == Key::Escape && self.is_open() {
            self.close();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use coatline_core::Rect;
    use coatline_core::animation::{TestClock, set_clock};
    use web_time::Instant;

    use super::*;
    use crate::sections::{ObserverConfig, SectionSpec};

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1000.0,
        h: 1000.0,
    };

    fn observer() -> SectionObserver {
        SectionObserver::new(
            vec![
                SectionSpec::new("hero", HeaderTheme::Dark),
                SectionSpec::new("services", HeaderTheme::Light),
            ],
            ObserverConfig::default(),
        )
    }

    fn entries() -> Vec<NavEntry> {
        vec![
            NavEntry::new("hero", "Home"),
            NavEntry::new("services", "Services"),
        ]
    }

    fn show(o: &SectionObserver, first_visible: bool) {
        let rects = if first_visible {
            [Rect::new(0.0, 0.0, 1000.0, 1000.0), Rect::new(0.0, 1000.0, 1000.0, 1000.0)]
        } else {
            [Rect::new(0.0, -1000.0, 1000.0, 1000.0), Rect::new(0.0, 0.0, 1000.0, 1000.0)]
        };
        o.update(VIEWPORT, &rects);
    }

    #[test]
    fn highlights_follow_the_active_section() {
        let o = observer();
        let h = Header::new(entries(), &o, ScrollLock::new(), true);
        assert!(h.nav_items().iter().all(|i| !i.active));

        show(&o, true);
        assert_eq!(h.active_id().as_deref(), Some("hero"));
        assert_eq!(h.theme(), HeaderTheme::Dark);
        assert!(h.nav_items()[0].active);

        show(&o, false);
        let items = h.nav_items();
        assert!(!items[0].active && items[1].active);
        assert_eq!(items[1].href, "#services");
        assert_eq!(h.palette(), HeaderTheme::Light.palette());
    }

    #[test]
    fn colors_fade_between_themes() {
        let t0 = Instant::now();
        set_clock(Box::new(TestClock { t: t0 }));
        let o = observer();
        let h = Header::new(entries(), &o, ScrollLock::new(), false);
        assert_eq!(h.palette(), HeaderTheme::Light.palette());

        show(&o, true);
        assert!(h.is_transitioning());
        assert_eq!(h.tick(), HeaderTheme::Light.palette());

        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(200),
        }));
        let mid = h.tick();
        assert_ne!(mid, HeaderTheme::Light.palette());
        assert_ne!(mid, HeaderTheme::Dark.palette());

        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_millis(400),
        }));
        assert_eq!(h.tick(), HeaderTheme::Dark.palette());
        assert!(!h.is_transitioning());
    }

    #[test]
    fn same_theme_does_not_restart_the_fade() {
        let o = SectionObserver::new(
            vec![
                SectionSpec::new("a", HeaderTheme::Light),
                SectionSpec::new("b", HeaderTheme::Light),
            ],
            ObserverConfig::default(),
        );
        let h = Header::new(entries(), &o, ScrollLock::new(), false);
        show(&o, true);
        show(&o, false);
        assert_eq!(h.active_id().as_deref(), Some("b"));
        assert!(!h.is_transitioning());
    }

    #[test]
    fn dropping_the_header_unsubscribes() {
        let o = observer();
        let h = Header::new(entries(), &o, ScrollLock::new(), true);
        assert_eq!(o.signal().subscriber_count(), 1);
        drop(h);
        assert_eq!(o.signal().subscriber_count(), 0);
        show(&o, true);
    }

    #[test]
    fn menu_holds_the_scroll_lock() {
        let lock = ScrollLock::new();
        let o = observer();
        let h = Header::new(entries(), &o, lock.clone(), true);
        let states = Rc::new(RefCell::new(Vec::new()));
        let _watch = {
            let states = states.clone();
            h.menu().signal().watch(move |open| states.borrow_mut().push(*open))
        };

        assert!(h.menu().toggle());
        assert!(lock.is_locked());
        h.menu().open();
        assert_eq!(lock.holders(), 1);

        assert_eq!(h.navigate("services"), Some("#services"));
        assert!(!h.menu().is_open());
        assert!(!lock.is_locked());
        assert_eq!(h.navigate("missing"), None);
        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn escape_closes_menu() {
        let lock = ScrollLock::new();
        let menu = MobileMenu::new(lock.clone());
        assert!(!menu.handle_key(&KeyEvent::new(Key::Escape)));
        menu.open();
        assert!(!menu.handle_key(&KeyEvent::new(Key::Enter)));
        assert!(menu.handle_key(&KeyEvent::new(Key::Escape)));
        assert!(!lock.is_locked());
    }

    #[test]
    fn dropping_an_open_menu_unlocks() {
        let lock = ScrollLock::new();
        let menu = MobileMenu::new(lock.clone());
        menu.open();
        drop(menu);
        assert!(!lock.is_locked());
    }
}
