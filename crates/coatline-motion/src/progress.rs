//! # Scroll progress
//!
//! `ScrollProgress` binds one `ScrollRegion` to the page scroll position.
//! The region is recomputed from element geometry on mount and resize; the
//! raw progress is recomputed on every scroll snapshot.
//!
//! ```rust
//! use coatline_motion::*;
//!
//! let hero = ScrollProgress::new(ScrollRegion::new(0.0, 1000.0));
//! hero.on_scroll(250.0);
//! assert_eq!(hero.get(), 0.25);
//! ```
//!
//! Both values live in signals, so a renderer can subscribe instead of
//! polling. `on_scroll` only notifies when the clamped progress actually
//! changed: scrolling far past a finished region costs nothing downstream.
//!
//! `SmoothedScroll` layers a spring on top; feed it the same frame snapshot
//! the raw tracker saw.

use std::cell::RefCell;

use coatline_core::{FrameSnapshot, Signal, signal};

use crate::region::{ScrollOffsets, ScrollRegion};
use crate::smooth::{SmoothedProgress, SpringConfig};

pub struct ScrollProgress {
    region: Signal<ScrollRegion>,
    progress: Signal<f32>,
    last_scroll: RefCell<f32>,
}

impl ScrollProgress {
    pub fn new(region: ScrollRegion) -> Self {
        Self {
            progress: signal(region.progress(0.0)),
            region: signal(region),
            last_scroll: RefCell::new(0.0),
        }
    }

    /// Layout changed: remeasure and recompute against the last scroll read.
    pub fn set_region(&self, region: ScrollRegion) {
        if self.region.set_if_changed(region) {
            log::debug!("scroll region now [{}, {}]", region.start, region.end);
            self.progress
                .set_if_changed(region.progress(*self.last_scroll.borrow()));
        }
    }

    pub fn measure(
        &self,
        element_top: f32,
        element_height: f32,
        viewport_height: f32,
        offsets: ScrollOffsets,
    ) {
        self.set_region(ScrollRegion::from_element(
            element_top,
            element_height,
            viewport_height,
            offsets,
        ));
    }

    /// Returns the (clamped) progress for this scroll position.
    pub fn on_scroll(&self, scroll_y: f32) -> f32 {
        *self.last_scroll.borrow_mut() = scroll_y;
        let p = self.region.with(|r| r.progress(scroll_y));
        self.progress.set_if_changed(p);
        p
    }

    pub fn get(&self) -> f32 {
        self.progress.get()
    }

    pub fn region(&self) -> ScrollRegion {
        self.region.get()
    }

    pub fn signal(&self) -> Signal<f32> {
        self.progress.clone()
    }
}

/// Raw progress plus a spring-smoothed follower.
pub struct SmoothedScroll {
    raw: ScrollProgress,
    spring: RefCell<SmoothedProgress>,
    smoothed: Signal<f32>,
}

impl SmoothedScroll {
    pub fn new(region: ScrollRegion, config: SpringConfig) -> Self {
        let raw = ScrollProgress::new(region);
        let start = raw.get();
        Self {
            raw,
            spring: RefCell::new(SmoothedProgress::new(start, config)),
            smoothed: signal(start),
        }
    }

    pub fn raw(&self) -> &ScrollProgress {
        &self.raw
    }

    /// Feeds one frame; returns the smoothed value.
    pub fn on_frame(&self, frame: &FrameSnapshot) -> f32 {
        let target = self.raw.on_scroll(frame.scroll_y);
        let mut spring = self.spring.borrow_mut();
        spring.set_target(target);
        spring.tick_at(frame.time);
        let v = spring.get();
        drop(spring);
        self.smoothed.set_if_changed(v);
        v
    }

    /// Skips the spring (reduced motion).
    pub fn jump_to(&self, scroll_y: f32) -> f32 {
        let target = self.raw.on_scroll(scroll_y);
        self.spring.borrow_mut().jump(target);
        self.smoothed.set_if_changed(target);
        target
    }

    pub fn get(&self) -> f32 {
        self.smoothed.get()
    }

    pub fn is_settled(&self) -> bool {
        self.spring.borrow().is_at_rest()
    }

    pub fn signal(&self) -> Signal<f32> {
        self.smoothed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coatline_core::{FrameLoop, Size};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn notifies_only_on_change() {
        let p = ScrollProgress::new(ScrollRegion::new(0.0, 100.0));
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        p.signal().subscribe(move |_| h.set(h.get() + 1));

        p.on_scroll(50.0);
        p.on_scroll(150.0);
        p.on_scroll(400.0);
        p.on_scroll(900.0);
        assert_eq!(hits.get(), 2);
        assert_eq!(p.get(), 1.0);
    }

    #[test]
    fn resize_recomputes_from_last_scroll() {
        let p = ScrollProgress::new(ScrollRegion::new(0.0, 1000.0));
        p.on_scroll(500.0);
        assert_eq!(p.get(), 0.5);
        p.set_region(ScrollRegion::new(0.0, 2000.0));
        assert_eq!(p.get(), 0.25);
    }

    #[test]
    fn measure_uses_element_geometry() {
        let p = ScrollProgress::new(ScrollRegion::new(0.0, 1.0));
        p.on_scroll(1900.0);
        p.measure(2000.0, 600.0, 800.0, ScrollOffsets::ENTER_TO_EXIT);
        assert_eq!(p.region(), ScrollRegion::new(1200.0, 2600.0));
        assert_eq!(p.get(), 0.5);
    }

    #[test]
    fn smoothed_follows_frames() {
        let frames = FrameLoop::new();
        let s = Rc::new(SmoothedScroll::new(
            ScrollRegion::new(0.0, 1000.0),
            SpringConfig::critical(200.0, 1.0),
        ));
        let s2 = s.clone();
        let _d = frames.on_frame(move |f| {
            s2.on_frame(f);
        });

        let vp = Size {
            width: 1280.0,
            height: 800.0,
        };
        frames.tick(1000.0, vp);
        assert_eq!(s.raw().get(), 1.0);
        assert!(s.get() < 1.0);

        assert_eq!(s.jump_to(250.0), 0.25);
        assert!(s.is_settled());
        assert_eq!(s.get(), 0.25);
    }
}
