//! Spring-smoothed progress.
//!
//! The integrator uses the closed-form solution of the damped harmonic
//! oscillator, so a step of any length lands exactly on the trajectory and a
//! critically or over-damped spring released from rest never overshoots.

use serde::Deserialize;
use web_time::Instant;

/// Longest step taken per tick; a tab that was in the background should not
/// make the spring jump.
const MAX_STEP_SECS: f32 = 0.1;

const REST_DELTA: f32 = 0.001;
const REST_SPEED: f32 = 0.01;

/// Spring constants for progress smoothing.
///
/// Defaults are critically damped (stiffness 100, mass 1, damping 20, so a
/// damping ratio of 1): the fastest settle that never overshoots.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target below which the spring may settle.
    pub rest_delta: f32,
    /// Speed (units/s) below which the spring may settle.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critical(100.0, 1.0)
    }
}

impl SpringConfig {
    /// Damping chosen so the damping ratio is exactly 1.
    pub fn critical(stiffness: f32, mass: f32) -> Self {
        Self {
            stiffness,
            mass,
            damping: 2.0 * (stiffness * mass).sqrt(),
            rest_delta: REST_DELTA,
            rest_speed: REST_SPEED,
        }
    }

    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    pub fn is_valid(&self) -> bool {
        self.stiffness > 0.0 && self.mass > 0.0 && self.damping >= 0.0
    }

    /// Displacement and velocity after `t` seconds from `(x0, v0)`.
    fn solve(&self, x0: f32, v0: f32, t: f32) -> (f32, f32) {
        let zeta = self.damping_ratio();
        let w0 = self.natural_frequency();

        if (zeta - 1.0).abs() < 1e-4 {
            let b = v0 + w0 * x0;
            let e = (-w0 * t).exp();
            let x = (x0 + b * t) * e;
            let v = (v0 - w0 * b * t) * e;
            (x, v)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let a = x0;
            let b = (v0 + zeta * w0 * x0) / wd;
            let e = (-zeta * w0 * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = e * (a * cos + b * sin);
            let v = e * ((b * wd - zeta * w0 * a) * cos - (a * wd + zeta * w0 * b) * sin);
            (x, v)
        } else {
            let s = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - s);
            let r2 = -w0 * (zeta + s);
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (a * e1 + b * e2, r1 * a * e1 + r2 * b * e2)
        }
    }
}

/// Progress that follows a raw target through a spring. Output stays in [0, 1].
#[derive(Clone, Debug)]
pub struct SmoothedProgress {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    last_tick: Option<Instant>,
}

impl SmoothedProgress {
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            log::warn!("invalid spring config {config:?}; using defaults");
            SpringConfig::default()
        };
        let initial = initial.clamp(0.0, 1.0);
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            last_tick: None,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_target(&mut self, raw: f32) {
        self.target = if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jumps to `raw` with no motion (reduced-motion preference).
    pub fn jump(&mut self, raw: f32) {
        self.set_target(raw);
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn get(&self) -> f32 {
        self.value.clamp(0.0, 1.0)
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances by `dt` seconds; returns whether the spring is still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_at_rest() {
            return false;
        }
        if dt.is_nan() || dt <= 0.0 {
            return true;
        }
        let dt = dt.min(MAX_STEP_SECS);
        let (x, v) = self
            .config
            .solve(self.value - self.target, self.velocity, dt);
        self.value = self.target + x;
        self.velocity = v;

        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }
        true
    }

    /// Advances to frame time `now`. The first tick only records the time.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let dt = match self.last_tick.replace(now) {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        if dt == 0.0 {
            return !self.is_at_rest();
        }
        self.step(dt)
    }
}
