use std::cell::Cell;

use web_time::Instant;

use crate::{Dispose, Listeners, Size, animation};

/// Everything a frame callback may read about the host, captured once.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub scroll_y: f32,
    pub viewport: Size,
    pub time: Instant,
}

/// Per-display-refresh callback fan-out.
///
/// The host calls `tick` from its animation-frame callback; every registered
/// callback receives the same snapshot. When no callbacks remain the host may
/// stop requesting frames.
#[derive(Clone, Default)]
pub struct FrameLoop {
    callbacks: Listeners<FrameSnapshot>,
    frame: std::rc::Rc<Cell<u64>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_frame(&self, f: impl Fn(&FrameSnapshot) + 'static) -> Dispose {
        self.callbacks.listen(f)
    }

    pub fn tick(&self, scroll_y: f32, viewport: Size) -> FrameSnapshot {
        let frame = self.frame.get() + 1;
        self.frame.set(frame);
        let snapshot = FrameSnapshot {
            frame,
            scroll_y,
            viewport,
            time: animation::now(),
        };
        self.callbacks.emit(&snapshot);
        snapshot
    }

    pub fn frames(&self) -> u64 {
        self.frame.get()
    }

    pub fn is_idle(&self) -> bool {
        self.callbacks.is_empty()
    }
}
