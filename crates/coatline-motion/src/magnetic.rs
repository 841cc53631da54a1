use coatline_core::{Rect, Vec2};
use serde::Deserialize;

/// Pointer attraction for "magnetic" call-to-action buttons.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Magnet {
    /// Fraction of the pointer's offset from center the button follows.
    pub strength: f32,
    /// Pointer distance from the button center, in px, beyond which it rests.
    pub radius: f32,
}

impl Default for Magnet {
    fn default() -> Self {
        Self {
            strength: 0.3,
            radius: 120.0,
        }
    }
}

impl Magnet {
    /// Translation to apply to a button at `rect` for a pointer at `pointer`.
    pub fn pull(&self, rect: &Rect, pointer: Option<Vec2>) -> Vec2 {
        let Some(pointer) = pointer else {
            return Vec2::ZERO;
        };
        let offset = pointer - rect.center();
        if offset.length() > self.radius {
            return Vec2::ZERO;
        }
        Vec2::new(offset.x * self.strength, offset.y * self.strength)
    }
}
