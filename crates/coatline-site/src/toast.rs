//! Transient notifications shown in a corner of the page.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use coatline_core::animation::now;
use coatline_core::{Signal, signal};
use serde::Serialize;
use web_time::Instant;

/// Oldest toasts are dropped once this many are on screen.
pub const MAX_VISIBLE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip)]
    pub expires_at: Instant,
}

struct ToastsInner {
    items: Signal<Vec<Toast>>,
    next_id: Cell<u64>,
    ttl: Duration,
}

/// Shared toast queue. Clones post into the same queue.
#[derive(Clone)]
pub struct Toasts {
    inner: Rc<ToastsInner>,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Rc::new(ToastsInner {
                items: signal(Vec::new()),
                next_id: Cell::new(1),
                ttl,
            }),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
            expires_at: now() + self.inner.ttl,
        };
        log::debug!("toast #{id} ({kind:?}): {}", toast.message);
        self.inner.items.update(|items| {
            items.push(toast);
            if items.len() > MAX_VISIBLE {
                let excess = items.len() - MAX_VISIBLE;
                items.drain(..excess);
            }
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Returns whether a toast with `id` was still showing.
    pub fn dismiss(&self, id: u64) -> bool {
        let present = self.inner.items.with(|items| items.iter().any(|t| t.id == id));
        if present {
            self.inner.items.update(|items| items.retain(|t| t.id != id));
        }
        present
    }

    /// Drops toasts whose time is up. Returns how many were removed.
    pub fn expire(&self) -> usize {
        let t = now();
        let expired = self
            .inner
            .items
            .with(|items| items.iter().filter(|toast| toast.expires_at <= t).count());
        if expired > 0 {
            self.inner.items.update(|items| items.retain(|toast| toast.expires_at > t));
        }
        expired
    }

    pub fn active(&self) -> Vec<Toast> {
        self.inner.items.get()
    }

    pub fn len(&self) -> usize {
        self.inner.items.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn signal(&self) -> Signal<Vec<Toast>> {
        self.inner.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use coatline_core::animation::{TestClock, set_clock};

    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let t0 = Instant::now();
        set_clock(Box::new(TestClock { t: t0 }));
        let toasts = Toasts::new(Duration::from_secs(4));
        toasts.error("first");
        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_secs(2),
        }));
        toasts.success("second");

        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_secs(4),
        }));
        assert_eq!(toasts.expire(), 1);
        assert_eq!(toasts.active()[0].message, "second");
        assert_eq!(toasts.expire(), 0);

        set_clock(Box::new(TestClock {
            t: t0 + Duration::from_secs(6),
        }));
        assert_eq!(toasts.expire(), 1);
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_is_dropped_past_capacity() {
        let toasts = Toasts::new(Duration::from_secs(60));
        let first = toasts.info("a");
        for m in ["b", "c", "d"] {
            toasts.info(m);
        }
        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert!(!toasts.dismiss(first));
        let messages: Vec<_> = toasts.active().iter().map(|t| t.message.clone()).collect();
        assert_eq!(messages, vec!["b", "c", "d"]);
    }

    #[test]
    fn dismiss_removes_one() {
        let toasts = Toasts::new(Duration::from_secs(60));
        let a = toasts.info("a");
        toasts.info("b");
        assert!(toasts.dismiss(a));
        assert!(!toasts.dismiss(a));
        assert_eq!(toasts.len(), 1);
    }
}
