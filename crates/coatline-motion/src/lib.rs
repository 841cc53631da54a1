//! Scroll-linked motion.
//!
//! The pipeline, leaves first:
//!
//! 1. `ScrollRegion`: pixel extent measured from element geometry.
//! 2. `ScrollProgress` / `SmoothedScroll`: clamped progress, optionally
//!    spring-smoothed.
//! 3. `InterpolationCurve`: breakpoint table evaluated at that progress.
//! 4. `StyleCurves` → `StyleParams`: the values a renderer writes as CSS.
//!
//! Every stage is a pure function of the scroll snapshot (plus the spring's
//! own memory), so scrolling back up simply replays the animation backwards.

pub mod curve;
pub mod length;
pub mod magnetic;
pub mod presets;
pub mod progress;
pub mod region;
pub mod smooth;
pub mod style;

pub use curve::{Breakpoint, InterpolationCurve, curve};
pub use length::Length;
pub use magnetic::Magnet;
pub use presets::Preset;
pub use progress::{ScrollProgress, SmoothedScroll};
pub use region::{Edge, Intersection, ScrollOffsets, ScrollRegion};
pub use smooth::{SmoothedProgress, SpringConfig};
pub use style::{StyleCurves, StyleParams};
