//! # Signals, Scopes, and Teardown
//!
//! Coatline models the site's interactive behavior as plain state that a
//! renderer binds to. There are four main pieces:
//!
//! - `Signal<T>`: observable value with subscribe/unsubscribe.
//! - `Scope` / `Dispose`: ownership of listeners and side-effects.
//! - `Listeners<E>` / `FrameLoop`: host event and animation-frame fan-out.
//! - `ScrollLock`: the one shared piece of document state.
//!
//! ## Signals
//!
//! ```rust
//! use coatline_core::*;
//!
//! let progress = signal(0.0f32);
//! progress.set(0.5);
//! assert!(!progress.set_if_changed(0.5));
//! assert_eq!(progress.get(), 0.5);
//! ```
//!
//! `set_if_changed` only notifies subscribers when the value actually differs,
//! which is what header theming and section highlighting rely on.
//!
//! ## Scopes and teardown
//!
//! Every listener returns a `Dispose` guard. Registering the guard with a
//! `Scope` ties its lifetime to the view that owns it:
//!
//! ```rust
//! use coatline_core::*;
//!
//! let keys: Listeners<KeyEvent> = Listeners::new();
//! let scope = Scope::new();
//! scope.run(|| {
//!     let d = keys.listen(|ev| log::debug!("key {:?}", ev.key));
//!     scoped_effect(move || Box::new(move || d.run()));
//! });
//! assert_eq!(keys.len(), 1);
//! scope.dispose();
//! assert_eq!(keys.len(), 0);
//! ```
//!
//! ## Frame snapshots
//!
//! `FrameLoop::tick` reads the scroll position once and hands the same
//! `FrameSnapshot` to every registered callback, so all derived style values of
//! one frame come from a single consistent reading.

pub mod animation;
pub mod color;
pub mod effects;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod listeners;
pub mod prelude;
pub mod scope;
pub mod scroll_lock;
pub mod signal;
pub mod tests;

pub use color::*;
pub use effects::*;
pub use error::*;
pub use frame::*;
pub use geometry::*;
pub use input::*;
pub use listeners::*;
pub use prelude::*;
pub use scope::*;
pub use scroll_lock::*;
pub use signal::*;
