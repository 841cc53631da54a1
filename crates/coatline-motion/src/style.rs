//! Style parameters driven by progress.
//!
//! Each parameter is its own curve evaluated against the same progress
//! value. No curve reads another parameter's output.

use coatline_core::geometry::fmt_num;
use coatline_core::{Color, Transform};
use serde::Serialize;

use crate::curve::InterpolationCurve;
use crate::length::Length;

/// Resolved visual parameters for one element in one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleParams {
    pub opacity: f32,
    pub transform: Transform,
    pub background: Option<Color>,
    pub clip_inset: Option<Length>,
    pub blur_px: f32,
    /// `feDisplacementMap` scale for the liquid-distortion filter.
    pub displacement: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transform: Transform::identity(),
            background: None,
            clip_inset: None,
            blur_px: 0.0,
            displacement: 0.0,
        }
    }
}

impl StyleParams {
    /// Inline style declarations, in a stable order.
    pub fn to_css(&self) -> String {
        let mut decls = vec![
            format!("opacity: {}", fmt_num(self.opacity)),
            format!("transform: {}", self.transform.to_css()),
        ];
        if let Some(bg) = self.background {
            decls.push(format!("background-color: {}", bg.to_css()));
        }
        if let Some(inset) = self.clip_inset {
            decls.push(format!("clip-path: inset({})", inset.to_css()));
        }
        if self.blur_px > 0.0 {
            decls.push(format!("filter: blur({}px)", fmt_num(self.blur_px)));
        }
        decls.join("; ")
    }
}

/// One optional curve per parameter; missing curves leave the default.
#[derive(Clone, Debug, Default)]
pub struct StyleCurves {
    pub opacity: Option<InterpolationCurve<f32>>,
    pub translate_x: Option<InterpolationCurve<f32>>,
    pub translate_y: Option<InterpolationCurve<f32>>,
    pub scale: Option<InterpolationCurve<f32>>,
    pub rotate_deg: Option<InterpolationCurve<f32>>,
    pub background: Option<InterpolationCurve<Color>>,
    pub clip_inset: Option<InterpolationCurve<Length>>,
    pub blur_px: Option<InterpolationCurve<f32>>,
    pub displacement: Option<InterpolationCurve<f32>>,
}

impl StyleCurves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, c: InterpolationCurve<f32>) -> Self {
        self.opacity = Some(c);
        self
    }
    pub fn translate_x(mut self, c: InterpolationCurve<f32>) -> Self {
        self.translate_x = Some(c);
        self
    }
    pub fn translate_y(mut self, c: InterpolationCurve<f32>) -> Self {
        self.translate_y = Some(c);
        self
    }
    pub fn scale(mut self, c: InterpolationCurve<f32>) -> Self {
        self.scale = Some(c);
        self
    }
    pub fn rotate(mut self, c: InterpolationCurve<f32>) -> Self {
        self.rotate_deg = Some(c);
        self
    }
    pub fn background(mut self, c: InterpolationCurve<Color>) -> Self {
        self.background = Some(c);
        self
    }
    pub fn clip_inset(mut self, c: InterpolationCurve<Length>) -> Self {
        self.clip_inset = Some(c);
        self
    }
    pub fn blur(mut self, c: InterpolationCurve<f32>) -> Self {
        self.blur_px = Some(c);
        self
    }
    pub fn displacement(mut self, c: InterpolationCurve<f32>) -> Self {
        self.displacement = Some(c);
        self
    }

    pub fn sample(&self, progress: f32) -> StyleParams {
        let base = StyleParams::default();
        let f = |c: &Option<InterpolationCurve<f32>>, default: f32| {
            c.as_ref().map_or(default, |c| c.evaluate(progress))
        };
        StyleParams {
            opacity: f(&self.opacity, base.opacity).clamp(0.0, 1.0),
            transform: Transform {
                translate_x: f(&self.translate_x, 0.0),
                translate_y: f(&self.translate_y, 0.0),
                scale: f(&self.scale, 1.0),
                rotate_deg: f(&self.rotate_deg, 0.0),
            },
            background: self.background.as_ref().map(|c| c.evaluate(progress)),
            clip_inset: self.clip_inset.as_ref().map(|c| c.evaluate(progress)),
            blur_px: f(&self.blur_px, 0.0).max(0.0),
            displacement: f(&self.displacement, 0.0),
        }
    }
}
