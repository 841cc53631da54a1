pub use crate::animation::{AnimatedValue, AnimationSpec, Easing, Interpolate};
pub use crate::{
    Color, Dispose, Error, FrameLoop, FrameSnapshot, Key, KeyEvent, Listeners, Rect, Result,
    Scope, ScrollLock, ScrollLockGuard, Signal, Vec2, scoped_effect,
    signal,
};
