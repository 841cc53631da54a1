use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle in document pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.w).min(other.x + other.w);
        let y1 = (self.y + self.h).min(other.y + other.h);
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// On-screen share of this rect within `viewport`, in [0, 1]: visible
    /// area over the smaller of its own area and the viewport's. A rect
    /// taller than the viewport reports 1 while it covers the whole screen.
    /// Zero-area rects report 0.
    pub fn visible_ratio(&self, viewport: &Rect) -> f32 {
        let basis = self.area().min(viewport.area());
        if basis <= 0.0 {
            return 0.0;
        }
        self.intersect(viewport)
            .map(|r| (r.area() / basis).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

/// 2D transform as the renderer applies it: scale, rotate, then translate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub rotate_deg: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotate_deg: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::identity()
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// CSS `transform` value, e.g. `translate3d(0px, -40px, 0) scale(1.1) rotate(2deg)`.
    pub fn to_css(&self) -> String {
        if self.is_identity() {
            return "none".to_string();
        }
        let mut out = format!(
            "translate3d({}px, {}px, 0)",
            fmt_num(self.translate_x),
            fmt_num(self.translate_y)
        );
        if self.scale != 1.0 {
            out.push_str(&format!(" scale({})", fmt_num(self.scale)));
        }
        if self.rotate_deg != 0.0 {
            out.push_str(&format!(" rotate({}deg)", fmt_num(self.rotate_deg)));
        }
        out
    }
}

/// Formats with at most three decimals and no trailing zeros.
pub fn fmt_num(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
