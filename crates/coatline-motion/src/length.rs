use coatline_core::animation::Interpolate;
use coatline_core::geometry::fmt_num;
use serde::Serialize;

/// A CSS length a curve can drive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    Px(f32),
    Percent(f32),
    Vh(f32),
}

impl Length {
    pub fn to_css(self) -> String {
        match self {
            Length::Px(v) => format!("{}px", fmt_num(v)),
            Length::Percent(v) => format!("{}%", fmt_num(v)),
            Length::Vh(v) => format!("{}vh", fmt_num(v)),
        }
    }

    /// Resolves to pixels against the viewport height (percent resolves
    /// against `basis`).
    pub fn to_px(self, basis: f32, viewport_height: f32) -> f32 {
        match self {
            Length::Px(v) => v,
            Length::Percent(v) => basis * v / 100.0,
            Length::Vh(v) => viewport_height * v / 100.0,
        }
    }
}

impl Interpolate for Length {
    /// Same-unit lengths blend; mixed units hold the start value until `t`
    /// reaches 1.
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        match (*self, *other) {
            (Length::Px(a), Length::Px(b)) => Length::Px(a.interpolate(&b, t)),
            (Length::Percent(a), Length::Percent(b)) => Length::Percent(a.interpolate(&b, t)),
            (Length::Vh(a), Length::Vh(b)) => Length::Vh(a.interpolate(&b, t)),
            _ if t >= 1.0 => *other,
            _ => *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_unit_blends() {
        let v = Length::Percent(0.0).interpolate(&Length::Percent(-300.0), 0.5);
        assert_eq!(v, Length::Percent(-150.0));
        assert_eq!(v.to_css(), "-150%");
    }

    #[test]
    fn mixed_units_hold() {
        let a = Length::Px(10.0);
        let b = Length::Vh(50.0);
        assert_eq!(a.interpolate(&b, 0.99), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
        assert_eq!(b.to_px(0.0, 800.0), 400.0);
    }
}
