//! # Active section
//!
//! The home page is a fixed, ordered list of sections, each tagged with the
//! header theme that reads well on top of it. Every frame the host reports
//! where those sections sit relative to the viewport; the observer picks the
//! most visible one and publishes `(id, theme)`.
//!
//! A section's visible ratio is its on-screen area divided by the smaller of
//! its own area and the viewport's, so a pinned section several screens tall
//! still reads as fully visible while it fills the screen.
//!
//! Selection rule: among sections whose visible ratio reaches
//! `ObserverConfig::threshold`, the largest ratio wins and ties go to the
//! section declared first. When no section qualifies the previous answer is
//! kept, so the header never flickers through "nothing" while a boundary
//! scrolls past.
//!
//! The active value is only written with `set_if_changed`: subscribers see
//! one notification per actual change and none for identical frames.
//!
//! ```rust
//! use coatline_core::Rect;
//! use coatline_navigation::*;
//!
//! let observer = SectionObserver::new(
//!     vec![
//!         SectionSpec::new("hero", HeaderTheme::Dark),
//!         SectionSpec::new("services", HeaderTheme::Light),
//!     ],
//!     ObserverConfig::default(),
//! );
//! let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
//! observer.update(viewport, &[
//!     Rect::new(0.0, -600.0, 1280.0, 800.0),
//!     Rect::new(0.0, 200.0, 1280.0, 900.0),
//! ]);
//! assert_eq!(observer.active().map(|a| a.id), Some("services".to_string()));
//! ```

use std::cell::Cell;
use std::rc::{Rc, Weak};

use coatline_core::{Rect, Scope, Signal, signal};
use serde::{Deserialize, Serialize};

/// Color scheme of the fixed header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTheme {
    /// Dark text over a light section.
    #[default]
    Light,
    /// Light text over a dark section.
    Dark,
}

/// One observed section, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub theme: HeaderTheme,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>, theme: HeaderTheme) -> Self {
        Self {
            id: id.into(),
            theme,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveSection {
    pub id: String,
    pub theme: HeaderTheme,
}

/// Visibility rules for the observer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Minimum `Rect::visible_ratio` before a section can become active.
    /// Clamped into [0, 1].
    pub threshold: f32,
    /// Pixels at the top of the viewport hidden behind the fixed header.
    pub top_inset: f32,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            top_inset: 0.0,
        }
    }
}

impl ObserverConfig {
    /// The part of `viewport` sections are measured against.
    pub fn effective_viewport(&self, viewport: Rect) -> Rect {
        let inset = self.top_inset.clamp(0.0, viewport.h.max(0.0));
        Rect::new(viewport.x, viewport.y + inset, viewport.w, viewport.h - inset)
    }
}

/// Index of the winning ratio: largest at or above `threshold`, first on ties.
pub fn pick_most_visible(ratios: impl IntoIterator<Item = f32>, threshold: f32) -> Option<usize> {
    let threshold = threshold.clamp(0.0, 1.0);
    let mut best: Option<(usize, f32)> = None;
    for (i, r) in ratios.into_iter().enumerate() {
        if r.is_nan() || r < threshold || r <= 0.0 {
            continue;
        }
        // Strict comparison keeps the earlier section on ties.
        if best.is_none_or(|(_, b)| r > b) {
            best = Some((i, r));
        }
    }
    best.map(|(i, _)| i)
}

struct ObserverInner {
    sections: Vec<SectionSpec>,
    config: ObserverConfig,
    active: Signal<Option<ActiveSection>>,
    connected: Cell<bool>,
}

/// Tracks which declared section is currently in view.
#[derive(Clone)]
pub struct SectionObserver {
    inner: Rc<ObserverInner>,
}

impl SectionObserver {
    pub fn new(sections: Vec<SectionSpec>, config: ObserverConfig) -> Self {
        log::info!("observing {} sections", sections.len());
        Self {
            inner: Rc::new(ObserverInner {
                sections,
                config,
                active: signal(None),
                connected: Cell::new(true),
            }),
        }
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.inner.sections
    }

    pub fn config(&self) -> ObserverConfig {
        self.inner.config
    }

    pub fn active(&self) -> Option<ActiveSection> {
        self.inner.active.get()
    }

    /// Observable `(id, theme)`; notifies only on change.
    pub fn signal(&self) -> Signal<Option<ActiveSection>> {
        self.inner.active.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Feeds one layout reading. `extents` are the sections' rects in
    /// declaration order, in the same coordinate space as `viewport`.
    /// Returns whether the active section changed.
    pub fn update(&self, viewport: Rect, extents: &[Rect]) -> bool {
        if !self.is_connected() {
            return false;
        }
        let sections = &self.inner.sections;
        if extents.len() != sections.len() {
            log::warn!(
                "section observer: {} extents for {} sections",
                extents.len(),
                sections.len()
            );
        }

        let view = self.inner.config.effective_viewport(viewport);
        let ratios = extents
            .iter()
            .take(sections.len())
            .map(|rect| rect.visible_ratio(&view));
        let Some(i) = pick_most_visible(ratios, self.inner.config.threshold) else {
            return false;
        };

        let next = ActiveSection {
            id: sections[i].id.clone(),
            theme: sections[i].theme,
        };
        let changed = self.inner.active.set_if_changed(Some(next));
        if changed {
            log::debug!("active section: {} ({:?})", sections[i].id, sections[i].theme);
        }
        changed
    }

    /// Stops observation. Later `update` calls are ignored, so subscribers
    /// receive nothing after teardown.
    pub fn disconnect(&self) {
        if self.inner.connected.replace(false) {
            log::debug!("section observer disconnected");
        }
    }

    /// Disconnects when `scope` is torn down.
    pub fn bind_to(&self, scope: &Scope) {
        let weak: Weak<ObserverInner> = Rc::downgrade(&self.inner);
        scope.add_disposer(move || {
            if let Some(inner) = weak.upgrade() {
                SectionObserver { inner }.disconnect();
            }
        });
    }
}
