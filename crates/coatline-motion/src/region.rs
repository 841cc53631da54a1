//! Scroll regions and raw progress.

use serde::Deserialize;

/// Extent of the scroll axis over which one animation runs.
///
/// `end > start` is expected; a degenerate region (`end <= start`) reports
/// progress 0 everywhere instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    pub start: f32,
    pub end: f32,
}

impl ScrollRegion {
    pub fn new(start: f32, end: f32) -> Self {
        if end <= start {
            log::warn!("scroll region [{start}, {end}] is degenerate; progress pinned to 0");
        }
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.end > self.start) || !self.start.is_finite() || !self.end.is_finite()
    }

    pub fn len(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    /// `clamp((scroll - start) / (end - start), 0, 1)`.
    pub fn progress(&self, scroll: f32) -> f32 {
        if self.is_degenerate() || !scroll.is_finite() {
            return 0.0;
        }
        ((scroll - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Region measured from an element's geometry, the way scroll-linked
    /// animations name it: "element `start` edge meets viewport `end` edge"
    /// through "element `end` edge meets viewport `start` edge".
    pub fn from_element(
        element_top: f32,
        element_height: f32,
        viewport_height: f32,
        offsets: ScrollOffsets,
    ) -> Self {
        let at = |i: Intersection| {
            element_top + element_height * i.element.fraction()
                - viewport_height * i.viewport.fraction()
        };
        Self::new(at(offsets.start), at(offsets.end))
    }
}

/// Position along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Start,
    Center,
    End,
}

impl Edge {
    fn fraction(self) -> f32 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
        }
    }
}

/// "element edge meets viewport edge"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Intersection {
    pub element: Edge,
    pub viewport: Edge,
}

impl Intersection {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ScrollOffsets {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollOffsets {
    /// From the element entering at the bottom until it leaves at the top.
    pub const ENTER_TO_EXIT: ScrollOffsets = ScrollOffsets {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::End, Edge::Start),
    };

    /// While the element is pinned: top at viewport top until bottom at viewport bottom.
    pub const PINNED: ScrollOffsets = ScrollOffsets {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::End),
    };

    /// From entering at the bottom until the element top reaches the viewport top.
    pub const ENTER: ScrollOffsets = ScrollOffsets {
        start: Intersection::new(Edge::Start, Edge::End),
        end: Intersection::new(Edge::Start, Edge::Start),
    };

    /// From the element top at viewport top until it leaves at the top.
    pub const EXIT: ScrollOffsets = ScrollOffsets {
        start: Intersection::new(Edge::Start, Edge::Start),
        end: Intersection::new(Edge::End, Edge::Start),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_and_linear() {
        let r = ScrollRegion::new(0.0, 1000.0);
        assert_eq!(r.progress(-50.0), 0.0);
        assert_eq!(r.progress(0.0), 0.0);
        assert_eq!(r.progress(500.0), 0.5);
        assert_eq!(r.progress(1000.0), 1.0);
        assert_eq!(r.progress(1500.0), 1.0);
    }

    #[test]
    fn progress_is_monotonic() {
        let r = ScrollRegion::new(120.0, 2480.0);
        let mut last = 0.0;
        for s in (-500..3500).step_by(37) {
            let p = r.progress(s as f32);
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn degenerate_region_is_zero() {
        let r = ScrollRegion::new(400.0, 400.0);
        assert!(r.is_degenerate());
        assert_eq!(r.progress(0.0), 0.0);
        assert_eq!(r.progress(1e6), 0.0);

        let inverted = ScrollRegion::new(900.0, 100.0);
        assert_eq!(inverted.progress(500.0), 0.0);
        assert_eq!(ScrollRegion::new(0.0, 10.0).progress(f32::NAN), 0.0);
    }

    #[test]
    fn region_from_element_offsets() {
        // 600px tall section at y=2000, 800px viewport.
        let r = ScrollRegion::from_element(2000.0, 600.0, 800.0, ScrollOffsets::ENTER_TO_EXIT);
        assert_eq!(r, ScrollRegion { start: 1200.0, end: 2600.0 });

        let pinned = ScrollRegion::from_element(2000.0, 3000.0, 800.0, ScrollOffsets::PINNED);
        assert_eq!(pinned, ScrollRegion { start: 2000.0, end: 4200.0 });
    }
}
