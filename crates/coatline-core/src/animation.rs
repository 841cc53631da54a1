use std::cell::RefCell;
use std::time::Duration;

use serde::Deserialize;
use web_time::Instant;

use crate::{Color, Transform};

thread_local! {
    static CLOCK: RefCell<Option<Box<dyn Clock>>> = const { RefCell::new(None) };
}

pub fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()).unwrap_or_else(Instant::now))
}

/// Install the animation clock for this thread. The frame loop runs on one
/// thread, so tests on other threads never see each other's clocks.
pub fn set_clock(clock: Box<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// Time source for animations. Without one installed, the wall clock is used.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

/// A test clock you can drive deterministically.
#[derive(Clone)]
pub struct TestClock {
    pub t: Instant,
}
impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic ease-out, the "expo-like" settle used for reveals.
    EaseOutCubic,
}

impl Easing {
    /// Maps normalized progress `t` (clamped to [0, 1]).
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A fixed-duration tween.
#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Duration::from_millis(300), Easing::EaseInOut)
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Eased progress `elapsed` into the tween; 1 once it has finished.
    fn eased_at(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.duration || self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .interpolate(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }
}

/// Values that can be blended by a normalized factor.
pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        }
        Color(
            lerp_u8(self.0, other.0, t),
            lerp_u8(self.1, other.1, t),
            lerp_u8(self.2, other.2, t),
            lerp_u8(self.3, other.3, t),
        )
    }
}

impl Interpolate for Transform {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Transform {
            translate_x: self.translate_x.interpolate(&other.translate_x, t),
            translate_y: self.translate_y.interpolate(&other.translate_y, t),
            scale: self.scale.interpolate(&other.scale, t),
            rotate_deg: self.rotate_deg.interpolate(&other.rotate_deg, t),
        }
    }
}

/// A value that eases toward its latest target on the animation clock.
///
/// Nothing moves on its own: the owner calls `update` once per frame.
pub struct AnimatedValue<T: Interpolate + Clone> {
    from: T,
    to: T,
    value: T,
    spec: AnimationSpec,
    since: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            from: initial.clone(),
            to: initial.clone(),
            value: initial,
            spec,
            since: None,
        }
    }

    /// Retargets from wherever the value currently is.
    pub fn set_target(&mut self, target: T) {
        self.from = self.value.clone();
        self.to = target;
        self.since = Some(now());
    }

    /// Jumps to `value` without animating (reduced motion).
    pub fn snap_to(&mut self, value: T) {
        self.from = value.clone();
        self.to = value.clone();
        self.value = value;
        self.since = None;
    }

    /// Advances to the current clock time. Returns whether still animating.
    pub fn update(&mut self) -> bool {
        let Some(since) = self.since else {
            return false;
        };
        let t = self.spec.eased_at(now().saturating_duration_since(since));
        if t >= 1.0 {
            self.value = self.to.clone();
            self.since = None;
            return false;
        }
        self.value = self.from.interpolate(&self.to, t);
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn is_animating(&self) -> bool {
        self.since.is_some()
    }
}
