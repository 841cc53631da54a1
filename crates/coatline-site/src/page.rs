//! # Page driver
//!
//! Wires one page's sections to the frame loop. Each frame the host hands
//! over one `FrameSnapshot`; from that single reading the driver computes
//! every section's progress and style, the active section and header
//! colors, the magnetic CTA offset and the embed branch, and publishes them
//! together as a `PageFrame`.
//!
//! Everything the page registers (the frame callback, key bindings, section
//! observation) belongs to the page's `Scope`; `unmount` tears it all down.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use coatline_core::animation::now;
use coatline_core::{
    FrameLoop, FrameSnapshot, KeyEvent, Listeners, Rect, Result, Scope, ScrollLock, Size, Vec2,
};
use coatline_motion::{
    Preset, ScrollOffsets, ScrollRegion, SmoothedScroll, StyleCurves, StyleParams,
};
use coatline_navigation::{
    ActiveSection, Header, HeaderPalette, HeaderTheme, NavEntry, NavItem, SectionObserver,
    SectionSpec,
};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::contact::ContactController;
use crate::embed::{EmbedSlot, RenderBranch};
use crate::toast::{Toast, Toasts};

/// Geometry and behavior of one page section, in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    /// Label in the header nav; sections without one are not linked.
    pub nav_label: Option<String>,
    pub theme: HeaderTheme,
    pub top: f32,
    pub height: f32,
    pub preset: Option<Preset>,
    pub offsets: ScrollOffsets,
    /// Follow scroll through the spring instead of tracking it exactly.
    pub smoothed: bool,
}

impl SectionLayout {
    pub fn new(id: &str, theme: HeaderTheme, top: f32, height: f32) -> Self {
        Self {
            id: id.to_string(),
            nav_label: None,
            theme,
            top,
            height,
            preset: None,
            offsets: ScrollOffsets::ENTER_TO_EXIT,
            smoothed: false,
        }
    }

    pub fn nav(mut self, label: &str) -> Self {
        self.nav_label = Some(label.to_string());
        self
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn offsets(mut self, offsets: ScrollOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn smoothed(mut self) -> Self {
        self.smoothed = true;
        self
    }

    fn region(&self, viewport_height: f32) -> ScrollRegion {
        ScrollRegion::from_element(self.top, self.height, viewport_height, self.offsets)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    pub sections: Vec<SectionLayout>,
    /// The magnetic call-to-action button.
    pub cta: Rect,
}

impl PageLayout {
    /// The home page: hero, services, process, projects, finishes, contact.
    pub fn home() -> Self {
        Self {
            sections: vec![
                SectionLayout::new("hero", HeaderTheme::Dark, 0.0, 900.0)
                    .nav("Home")
                    .preset(Preset::HeroParallax { depth_px: 240.0 })
                    .offsets(ScrollOffsets::EXIT)
                    .smoothed(),
                SectionLayout::new("services", HeaderTheme::Light, 900.0, 1200.0)
                    .nav("Services")
                    .preset(Preset::FadeInHoldOut),
                SectionLayout::new("process", HeaderTheme::Dark, 2100.0, 2400.0)
                    .nav("Process")
                    .preset(Preset::PinnedReveal)
                    .offsets(ScrollOffsets::PINNED),
                SectionLayout::new("projects", HeaderTheme::Light, 4500.0, 3000.0)
                    .nav("Projects")
                    .preset(Preset::HorizontalTrack {
                        panels: 4,
                        panel_width: 1200.0,
                    })
                    .offsets(ScrollOffsets::PINNED)
                    .smoothed(),
                SectionLayout::new("finishes", HeaderTheme::Dark, 7500.0, 1200.0).preset(
                    Preset::ColorShift {
                        from: "#0E1116".into(),
                        to: "#F2EFE9".into(),
                    },
                ),
                SectionLayout::new("contact", HeaderTheme::Light, 8700.0, 1000.0)
                    .nav("Contact")
                    .preset(Preset::LiquidDistortion { peak_scale: 48.0 }),
            ],
            cta: Rect::new(120.0, 620.0, 220.0, 56.0),
        }
    }

    /// Total document height.
    pub fn height(&self) -> f32 {
        self.sections
            .iter()
            .map(|s| s.top + s.height)
            .fold(0.0, f32::max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionFrame {
    pub id: String,
    pub progress: f32,
    pub style: StyleParams,
    pub css: String,
}

/// Everything the renderer needs for one frame, from one snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageFrame {
    pub frame: u64,
    pub scroll_y: f32,
    pub active: Option<ActiveSection>,
    pub header: HeaderPalette,
    pub nav: Vec<NavItem>,
    pub menu_open: bool,
    pub sections: Vec<SectionFrame>,
    pub cta_offset: Vec2,
    pub embed: RenderBranch,
    pub toasts: Vec<Toast>,
    pub scroll_locked: bool,
}

struct SectionRuntime {
    layout: SectionLayout,
    curves: StyleCurves,
    progress: SmoothedScroll,
}

struct PageState {
    config: SiteConfig,
    sections: Vec<SectionRuntime>,
    content_height: f32,
    cta: Rect,
    viewport: Cell<Size>,
    pointer: Cell<Option<Vec2>>,
    observer: SectionObserver,
    header: Header,
    lock: ScrollLock,
    toasts: Toasts,
    embed: EmbedSlot,
    contact: ContactController,
    latest: RefCell<Option<PageFrame>>,
}

impl PageState {
    fn remeasure(&self, viewport: Size) {
        self.viewport.set(viewport);
        for s in &self.sections {
            s.progress.raw().set_region(s.layout.region(viewport.height));
        }
    }

    fn compute(&self, snap: &FrameSnapshot) -> PageFrame {
        if snap.viewport != self.viewport.get() {
            self.remeasure(snap.viewport);
        }
        let reduced = self.config.reduced_motion;
        let vp = snap.viewport;

        let sections = self
            .sections
            .iter()
            .map(|s| {
                let progress = if s.layout.smoothed && !reduced {
                    s.progress.on_frame(snap)
                } else {
                    s.progress.jump_to(snap.scroll_y)
                };
                let style = s.curves.sample(progress);
                SectionFrame {
                    id: s.layout.id.clone(),
                    progress,
                    css: style.to_css(),
                    style,
                }
            })
            .collect();

        let extents: Vec<Rect> = self
            .sections
            .iter()
            .map(|s| Rect::new(0.0, s.layout.top - snap.scroll_y, vp.width, s.layout.height))
            .collect();
        self.observer
            .update(Rect::new(0.0, 0.0, vp.width, vp.height), &extents);

        self.embed.tick(snap.time);
        self.toasts.expire();

        let cta_offset = if reduced {
            Vec2::ZERO
        } else {
            let cta = Rect {
                y: self.cta.y - snap.scroll_y,
                ..self.cta
            };
            self.config.magnet.pull(&cta, self.pointer.get())
        };

        PageFrame {
            frame: snap.frame,
            scroll_y: snap.scroll_y,
            active: self.observer.active(),
            header: self.header.tick(),
            nav: self.header.nav_items(),
            menu_open: self.header.menu().is_open(),
            sections,
            cta_offset,
            embed: self.embed.render(),
            toasts: self.toasts.active(),
            scroll_locked: self.lock.is_locked(),
        }
    }
}

/// A mounted page.
pub struct Page {
    state: Rc<PageState>,
    frames: FrameLoop,
    keys: Listeners<KeyEvent>,
    scope: Scope,
}

impl Page {
    pub fn home(config: SiteConfig, viewport: Size) -> Result<Self> {
        Self::new(config, PageLayout::home(), viewport)
    }

    pub fn new(config: SiteConfig, layout: PageLayout, viewport: Size) -> Result<Self> {
        config.validate()?;
        let content_height = layout.height();
        let mut sections = Vec::with_capacity(layout.sections.len());
        for l in layout.sections {
            let curves = match &l.preset {
                Some(p) => p.curves()?,
                None => StyleCurves::new(),
            };
            let progress = SmoothedScroll::new(l.region(viewport.height), config.spring);
            sections.push(SectionRuntime {
                layout: l,
                curves,
                progress,
            });
        }

        let scope = Scope::new();
        let lock = ScrollLock::new();
        let keys: Listeners<KeyEvent> = Listeners::new();
        let frames = FrameLoop::new();
        let toasts = Toasts::new(config.toast_ttl());

        let observer = SectionObserver::new(
            sections
                .iter()
                .map(|s| SectionSpec::new(s.layout.id.clone(), s.layout.theme))
                .collect(),
            config.observer,
        );
        observer.bind_to(&scope);

        let entries = sections
            .iter()
            .filter_map(|s| {
                let label = s.layout.nav_label.as_deref()?;
                Some(NavEntry::new(s.layout.id.clone(), label))
            })
            .collect();
        let header = Header::new(entries, &observer, lock.clone(), config.reduced_motion);

        let embed = EmbedSlot::new(
            config.scene_url.clone(),
            config.fallback_video.clone(),
            config.reduced_motion,
            config.embed_timeout(),
            toasts.clone(),
        );

        let state = Rc::new(PageState {
            contact: ContactController::new(toasts.clone()),
            sections,
            content_height,
            cta: layout.cta,
            viewport: Cell::new(viewport),
            pointer: Cell::new(None),
            observer,
            header,
            lock,
            toasts,
            embed,
            config,
            latest: RefCell::new(None),
        });

        let weak: Weak<PageState> = Rc::downgrade(&state);
        let on_frame = frames.on_frame(move |snap| {
            if let Some(state) = weak.upgrade() {
                let frame = state.compute(snap);
                *state.latest.borrow_mut() = Some(frame);
            }
        });
        scope.add_disposer(move || on_frame.run());

        let weak: Weak<PageState> = Rc::downgrade(&state);
        let on_key = keys.listen(move |ev| {
            if let Some(state) = weak.upgrade() {
                state.header.menu().handle_key(ev);
            }
        });
        scope.add_disposer(move || on_key.run());

        let weak: Weak<PageState> = Rc::downgrade(&state);
        scope.add_disposer(move || {
            if let Some(state) = weak.upgrade() {
                state.header.menu().close();
                state.header.detach();
            }
        });

        state.embed.start(now());
        log::info!(
            "page mounted: {} sections, {}x{} viewport",
            state.sections.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            state,
            frames,
            keys,
            scope,
        })
    }

    /// Runs one animation frame at `scroll_y`. `None` once unmounted.
    pub fn tick(&self, scroll_y: f32) -> Option<PageFrame> {
        if self.scope.is_disposed() {
            return None;
        }
        self.frames.tick(scroll_y, self.state.viewport.get());
        self.state.latest.borrow_mut().take()
    }

    /// Layout changed; regions are remeasured immediately.
    pub fn resize(&self, viewport: Size) {
        self.state.remeasure(viewport);
    }

    pub fn set_pointer(&self, pointer: Option<Vec2>) {
        self.state.pointer.set(pointer);
    }

    pub fn key(&self, ev: &KeyEvent) {
        self.keys.emit(ev);
    }

    pub fn scroll_height(&self) -> f32 {
        (self.state.content_height - self.state.viewport.get().height).max(0.0)
    }

    pub fn header(&self) -> &Header {
        &self.state.header
    }

    pub fn observer(&self) -> &SectionObserver {
        &self.state.observer
    }

    pub fn embed(&self) -> &EmbedSlot {
        &self.state.embed
    }

    pub fn toasts(&self) -> &Toasts {
        &self.state.toasts
    }

    pub fn contact(&self) -> &ContactController {
        &self.state.contact
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.state.lock
    }

    pub fn keys(&self) -> &Listeners<KeyEvent> {
        &self.keys
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Tears down everything the page registered. Idempotent.
    pub fn unmount(&self) {
        if !self.scope.is_disposed() {
            log::info!("page unmounted");
        }
        self.scope.dispose();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}
