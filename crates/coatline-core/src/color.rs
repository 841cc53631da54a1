use serde::Serialize;

use crate::geometry::fmt_num;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    /// Parses `#RRGGBB` or `#RRGGBBAA`; anything else is opaque black.
    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |i: usize, default: u8| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(default)
        };
        match s.len() {
            6 => Color(channel(0, 0), channel(2, 0), channel(4, 0), 255),
            8 => Color(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
            _ => {
                log::warn!("color: unparseable hex '{hex}'");
                Color::BLACK
            }
        }
    }
    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }

    /// CSS `rgba()` notation.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.0,
            self.1,
            self.2,
            fmt_num(self.3 as f32 / 255.0)
        )
    }
}
