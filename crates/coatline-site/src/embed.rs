//! # Decorative scene embed
//!
//! The hero can show a third-party 3D scene. It degrades in a fixed chain:
//!
//! 1. the scene, once it has actually loaded;
//! 2. otherwise the looping fallback video;
//! 3. a static notice when the visitor prefers reduced motion.
//!
//! Load progress is a small state machine (`EmbedState`) and the visible
//! branch is a pure function of that state and the motion preference, so the
//! page always renders exactly one of the three.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use coatline_core::{Signal, signal};
use serde::Serialize;
use web_time::Instant;

use crate::toast::Toasts;

pub const LOAD_FAILED_MESSAGE: &str = "A background animation failed to load.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum EmbedState {
    Unattempted,
    Loading,
    Ready,
    Failed(String),
}

/// Which of the three alternatives is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Scene,
    Video,
    StaticNotice,
}

pub fn render_branch(state: &EmbedState, reduced_motion: bool) -> Branch {
    if reduced_motion {
        return Branch::StaticNotice;
    }
    match state {
        EmbedState::Ready => Branch::Scene,
        EmbedState::Unattempted | EmbedState::Loading | EmbedState::Failed(_) => Branch::Video,
    }
}

/// `Branch` with the source the renderer needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "branch", rename_all = "snake_case")]
pub enum RenderBranch {
    Scene { url: String },
    Video { src: String },
    StaticNotice,
}

struct EmbedInner {
    scene_url: Option<String>,
    fallback_video: String,
    reduced_motion: bool,
    timeout: Duration,
    state: Signal<EmbedState>,
    started: Cell<Option<Instant>>,
    toasts: Toasts,
}

/// One embed slot and its load lifecycle.
#[derive(Clone)]
pub struct EmbedSlot {
    inner: Rc<EmbedInner>,
}

impl EmbedSlot {
    pub fn new(
        scene_url: Option<String>,
        fallback_video: impl Into<String>,
        reduced_motion: bool,
        timeout: Duration,
        toasts: Toasts,
    ) -> Self {
        Self {
            inner: Rc::new(EmbedInner {
                scene_url,
                fallback_video: fallback_video.into(),
                reduced_motion,
                timeout,
                state: signal(EmbedState::Unattempted),
                started: Cell::new(None),
                toasts,
            }),
        }
    }

    pub fn state(&self) -> EmbedState {
        self.inner.state.get()
    }

    pub fn signal(&self) -> Signal<EmbedState> {
        self.inner.state.clone()
    }

    pub fn branch(&self) -> Branch {
        self.inner
            .state
            .with(|s| render_branch(s, self.inner.reduced_motion))
    }

    pub fn render(&self) -> RenderBranch {
        match self.branch() {
            // Ready is only reachable with a scene url.
            Branch::Scene => match &self.inner.scene_url {
                Some(url) => RenderBranch::Scene { url: url.clone() },
                None => self.video(),
            },
            Branch::Video => self.video(),
            Branch::StaticNotice => RenderBranch::StaticNotice,
        }
    }

    fn video(&self) -> RenderBranch {
        RenderBranch::Video {
            src: self.inner.fallback_video.clone(),
        }
    }

    /// Begins loading the scene at time `now`. Does nothing without a scene
    /// url, under reduced motion, or once an attempt has been made.
    pub fn start(&self, now: Instant) -> bool {
        let inner = &self.inner;
        if inner.reduced_motion {
            log::debug!("embed: reduced motion, not loading scene");
            return false;
        }
        if inner.scene_url.is_none() {
            log::info!("embed: no scene configured, using fallback video");
            return false;
        }
        if inner.state.get() != EmbedState::Unattempted {
            return false;
        }
        inner.started.set(Some(now));
        inner.state.set(EmbedState::Loading);
        log::debug!("embed: loading {:?}", inner.scene_url);
        true
    }

    pub fn on_loaded(&self) {
        if self.inner.state.get() != EmbedState::Loading {
            log::warn!("embed: load event in state {:?} ignored", self.state());
            return;
        }
        self.inner.started.set(None);
        self.inner.state.set(EmbedState::Ready);
        log::info!("embed: scene ready");
    }

    /// Falls back to the video and posts one non-blocking toast.
    pub fn on_error(&self, reason: impl Into<String>) {
        let reason = reason.into();
        match self.state() {
            EmbedState::Loading | EmbedState::Ready => {
                log::warn!("embed: scene failed: {reason}");
                self.inner.started.set(None);
                self.inner.state.set(EmbedState::Failed(reason));
                self.inner.toasts.error(LOAD_FAILED_MESSAGE);
            }
            other => log::debug!("embed: error {reason:?} in state {other:?} ignored"),
        }
    }

    /// Frame hook: fails a load that has run past the timeout.
    pub fn tick(&self, now: Instant) {
        let Some(started) = self.inner.started.get() else {
            return;
        };
        if now.saturating_duration_since(started) >= self.inner.timeout {
            self.on_error(format!("timed out after {:?}", self.inner.timeout));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(scene: Option<&str>, reduced: bool) -> (EmbedSlot, Toasts) {
        let toasts = Toasts::new(Duration::from_secs(5));
        let slot = EmbedSlot::new(
            scene.map(str::to_string),
            "/media/loop.mp4",
            reduced,
            Duration::from_secs(8),
            toasts.clone(),
        );
        (slot, toasts)
    }

    #[test]
    fn exactly_one_branch_per_state() {
        let states = [
            EmbedState::Unattempted,
            EmbedState::Loading,
            EmbedState::Ready,
            EmbedState::Failed("x".into()),
        ];
        let expected = [Branch::Video, Branch::Video, Branch::Scene, Branch::Video];
        for (s, b) in states.iter().zip(expected) {
            assert_eq!(render_branch(s, false), b);
            assert_eq!(render_branch(s, true), Branch::StaticNotice);
        }
    }

    #[test]
    fn load_success_shows_scene() {
        let (s, toasts) = slot(Some("https://scenes.example/hero"), false);
        assert!(s.start(Instant::now()));
        assert_eq!(s.render(), RenderBranch::Video { src: "/media/loop.mp4".into() });
        s.on_loaded();
        assert_eq!(
            s.render(),
            RenderBranch::Scene {
                url: "https://scenes.example/hero".into()
            }
        );
        assert!(toasts.is_empty());
    }

    #[test]
    fn failure_falls_back_and_toasts_once() {
        let (s, toasts) = slot(Some("https://scenes.example/hero"), false);
        s.start(Instant::now());
        s.on_error("webgl unavailable");
        s.on_error("again");
        assert_eq!(s.state(), EmbedState::Failed("webgl unavailable".into()));
        assert_eq!(s.branch(), Branch::Video);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.active()[0].message, LOAD_FAILED_MESSAGE);
        assert!(!s.start(Instant::now()));
    }

    #[test]
    fn slow_load_times_out() {
        let (s, toasts) = slot(Some("https://scenes.example/hero"), false);
        let t0 = Instant::now();
        s.start(t0);
        s.tick(t0 + Duration::from_secs(7));
        assert_eq!(s.state(), EmbedState::Loading);
        s.tick(t0 + Duration::from_secs(8));
        assert!(matches!(s.state(), EmbedState::Failed(_)));
        assert_eq!(toasts.len(), 1);
        s.on_loaded();
        assert_eq!(s.branch(), Branch::Video);
    }

    #[test]
    fn no_attempt_without_url_or_with_reduced_motion() {
        let (s, _) = slot(None, false);
        assert!(!s.start(Instant::now()));
        assert_eq!(s.branch(), Branch::Video);

        let (s, toasts) = slot(Some("https://scenes.example/hero"), true);
        assert!(!s.start(Instant::now()));
        assert_eq!(s.render(), RenderBranch::StaticNotice);
        assert!(toasts.is_empty());
    }
}
