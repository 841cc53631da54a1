//! Breakpoint tables for the site's scroll effects.

use coatline_core::{Color, Result};
use serde::Deserialize;

use crate::curve::{InterpolationCurve, curve};
use crate::length::Length;
use crate::style::StyleCurves;

/// A named scroll effect a section can opt into.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preset {
    /// Background drifts slower than the page and fades as the hero leaves.
    HeroParallax { depth_px: f32 },
    /// Fade and rise in, hold, fade and rise out.
    FadeInHoldOut,
    /// Pinned card that grows out of an inset clip.
    PinnedReveal,
    /// Row of panels translated sideways while the section is pinned.
    HorizontalTrack { panels: usize, panel_width: f32 },
    /// Section background crossfades between two colors.
    ColorShift { from: String, to: String },
    /// Displacement-map ripple that peaks mid-section.
    LiquidDistortion { peak_scale: f32 },
}

impl Preset {
    pub fn curves(&self) -> Result<StyleCurves> {
        match self {
            Preset::HeroParallax { depth_px } => hero_parallax(*depth_px),
            Preset::FadeInHoldOut => fade_in_hold_out(),
            Preset::PinnedReveal => pinned_reveal(),
            Preset::HorizontalTrack {
                panels,
                panel_width,
            } => horizontal_track(*panels, *panel_width),
            Preset::ColorShift { from, to } => {
                color_shift(Color::from_hex(from), Color::from_hex(to))
            }
            Preset::LiquidDistortion { peak_scale } => liquid_distortion(*peak_scale),
        }
    }
}

pub fn hero_parallax(depth_px: f32) -> Result<StyleCurves> {
    Ok(StyleCurves::new()
        .translate_y(curve(&[(0.0, 0.0), (1.0, depth_px)])?)
        .scale(curve(&[(0.0, 1.0), (1.0, 1.15)])?)
        .opacity(curve(&[(0.0, 1.0), (0.6, 1.0), (1.0, 0.0)])?))
}

pub fn fade_in_hold_out() -> Result<StyleCurves> {
    Ok(StyleCurves::new()
        .opacity(curve(&[(0.0, 0.0), (0.25, 1.0), (0.75, 1.0), (1.0, 0.0)])?)
        .translate_y(curve(&[(0.0, 60.0), (0.25, 0.0), (0.75, 0.0), (1.0, -60.0)])?))
}

pub fn pinned_reveal() -> Result<StyleCurves> {
    Ok(StyleCurves::new()
        .scale(curve(&[(0.0, 0.8), (0.5, 1.0)])?)
        .opacity(curve(&[(0.0, 0.4), (0.3, 1.0)])?)
        .clip_inset(InterpolationCurve::new([
            (0.0, Length::Percent(20.0)),
            (0.5, Length::Percent(0.0)),
        ])?))
}

pub fn horizontal_track(panels: usize, panel_width: f32) -> Result<StyleCurves> {
    let travel = panels.saturating_sub(1) as f32 * panel_width;
    Ok(StyleCurves::new().translate_x(curve(&[(0.0, 0.0), (1.0, -travel)])?))
}

pub fn color_shift(from: Color, to: Color) -> Result<StyleCurves> {
    Ok(StyleCurves::new().background(InterpolationCurve::new([(0.0, from), (1.0, to)])?))
}

pub fn liquid_distortion(peak_scale: f32) -> Result<StyleCurves> {
    Ok(StyleCurves::new()
        .displacement(curve(&[(0.0, 0.0), (0.5, peak_scale), (1.0, 0.0)])?)
        .blur(curve(&[(0.0, 0.0), (0.5, 2.0), (1.0, 0.0)])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        let all = [
            Preset::HeroParallax { depth_px: 240.0 },
            Preset::FadeInHoldOut,
            Preset::PinnedReveal,
            Preset::HorizontalTrack {
                panels: 4,
                panel_width: 1200.0,
            },
            Preset::ColorShift {
                from: "#0E1116".into(),
                to: "#F2EFE9".into(),
            },
            Preset::LiquidDistortion { peak_scale: 60.0 },
        ];
        for p in all {
            assert!(p.curves().is_ok(), "{p:?}");
        }
    }

    #[test]
    fn horizontal_track_travels_all_but_one_panel() {
        let c = horizontal_track(4, 1000.0).unwrap();
        assert_eq!(c.sample(1.0).transform.translate_x, -3000.0);
        let single = horizontal_track(1, 1000.0).unwrap();
        assert_eq!(single.sample(1.0).transform.translate_x, 0.0);
    }

    #[test]
    fn preset_from_json() {
        let p: Preset =
            serde_json::from_str(r#"{"kind":"hero_parallax","depth_px":180}"#).unwrap();
        assert_eq!(p, Preset::HeroParallax { depth_px: 180.0 });
    }
}
