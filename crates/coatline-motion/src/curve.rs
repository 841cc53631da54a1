//! Piecewise-linear breakpoint tables.
//!
//! A multi-stage animation (fade in, hold, fade out) is one curve with all of
//! its stages as breakpoints, so the output is always a pure function of
//! progress and scrolling backwards replays it in reverse.

use coatline_core::animation::{Easing, Interpolate};
use coatline_core::{Error, Result};
use smallvec::SmallVec;

/// One `(input, output)` pair of a curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoint<V> {
    pub input: f32,
    pub output: V,
}

/// Ordered breakpoints, strictly increasing in `input`, at least two.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolationCurve<V> {
    points: SmallVec<[Breakpoint<V>; 4]>,
    easing: Easing,
}

impl<V: Interpolate + Clone> InterpolationCurve<V> {
    pub fn new(points: impl IntoIterator<Item = (f32, V)>) -> Result<Self> {
        let points: SmallVec<[Breakpoint<V>; 4]> = points
            .into_iter()
            .map(|(input, output)| Breakpoint { input, output })
            .collect();

        if points.len() < 2 {
            return Err(Error::invalid_curve(format!(
                "need at least 2 breakpoints, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.input.is_finite()) {
            return Err(Error::invalid_curve(format!(
                "breakpoint input {} is not finite",
                bad.input
            )));
        }
        if let Some(w) = points.windows(2).find(|w| w[0].input >= w[1].input) {
            return Err(Error::invalid_curve(format!(
                "breakpoints must be strictly increasing ({} then {})",
                w[0].input, w[1].input
            )));
        }

        Ok(Self {
            points,
            easing: Easing::Linear,
        })
    }

    /// Easing applied within every segment.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.points[0].input, self.points[self.points.len() - 1].input)
    }

    pub fn breakpoints(&self) -> &[Breakpoint<V>] {
        &self.points
    }

    /// Linear interpolation between the bracketing breakpoints. `x` outside
    /// the domain (or NaN) yields the nearest edge output.
    pub fn evaluate(&self, x: f32) -> V {
        let first = &self.points[0];
        let last = &self.points[self.points.len() - 1];
        if x.is_nan() || x <= first.input {
            return first.output.clone();
        }
        if x >= last.input {
            return last.output.clone();
        }

        let idx = self.points.partition_point(|p| p.input <= x);
        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let t = (x - a.input) / (b.input - a.input);
        a.output.interpolate(&b.output, self.easing.interpolate(t))
    }
}

/// Shorthand for `f32` curves built from literal tables.
pub fn curve(points: &[(f32, f32)]) -> Result<InterpolationCurve<f32>> {
    InterpolationCurve::new(points.iter().copied())
}
