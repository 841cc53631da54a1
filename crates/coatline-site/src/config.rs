//! Site configuration.
//!
//! Defaults cover everything; a JSON file and `COATLINE_*` environment
//! variables override them, in that order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use coatline_core::{Error, Result};
use coatline_motion::{Magnet, SpringConfig};
use coatline_navigation::ObserverConfig;
use serde::Deserialize;

pub const ENV_SCENE_URL: &str = "COATLINE_SCENE_URL";
pub const ENV_FALLBACK_VIDEO: &str = "COATLINE_FALLBACK_VIDEO";
pub const ENV_REDUCED_MOTION: &str = "COATLINE_REDUCED_MOTION";
pub const ENV_CONSENT_PATH: &str = "COATLINE_CONSENT_PATH";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Decorative 3D scene behind the hero. Unset means the video plays.
    pub scene_url: Option<String>,
    /// Looping video shown when the scene is unset or fails.
    pub fallback_video: String,
    /// Honors the visitor's reduced-motion preference: no springs, no
    /// fades, static notice instead of the scene.
    pub reduced_motion: bool,
    /// File backing cookie consent. In-memory when unset.
    pub consent_path: Option<PathBuf>,
    /// How long the scene may load before falling back.
    pub embed_timeout_ms: u64,
    pub toast_ttl_ms: u64,
    pub spring: SpringConfig,
    pub observer: ObserverConfig,
    pub magnet: Magnet,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scene_url: None,
            fallback_video: "/media/coating-line-loop.mp4".to_string(),
            reduced_motion: false,
            consent_path: None,
            embed_timeout_ms: 8_000,
            toast_ttl_ms: 5_000,
            spring: SpringConfig::default(),
            observer: ObserverConfig {
                threshold: 0.3,
                top_inset: 72.0,
            },
            magnet: Magnet::default(),
        }
    }
}

impl SiteConfig {
    /// Parses a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::serde(e.to_string()))?;
        // A defaulted struct also deserializes from a sequence, so `[]` would
        // otherwise pass as an empty config.
        if !value.is_object() {
            return Err(Error::serde("site config must be a JSON object"));
        }
        let cfg: Self = serde_json::from_value(value).map_err(|e| Error::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Defaults with the process environment applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|k| std::env::var(k).ok())
    }

    /// Applies `COATLINE_*` overrides read through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_SCENE_URL) {
            self.scene_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(video) = lookup(ENV_FALLBACK_VIDEO) {
            self.fallback_video = video;
        }
        if let Some(flag) = lookup(ENV_REDUCED_MOTION) {
            self.reduced_motion = parse_flag(ENV_REDUCED_MOTION, &flag)?;
        }
        if let Some(path) = lookup(ENV_CONSENT_PATH) {
            self.consent_path = Some(PathBuf::from(path));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback_video.trim().is_empty() {
            return Err(Error::config("fallback_video must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.observer.threshold) {
            return Err(Error::config(format!(
                "observer.threshold {} is outside [0, 1]",
                self.observer.threshold
            )));
        }
        if !self.spring.is_valid() {
            return Err(Error::config(format!("invalid spring {:?}", self.spring)));
        }
        if self.embed_timeout_ms == 0 {
            return Err(Error::config("embed_timeout_ms must be positive"));
        }
        Ok(())
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::config(format!("{name}: expected a boolean, got {other:?}"))),
    }
}
