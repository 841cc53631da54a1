//! Site-level pieces that sit between the motion/gallery/navigation crates
//! and a renderer: configuration, the hero embed fallback chain, cookie
//! consent, the contact form, toasts and the page frame driver.

pub mod config;
pub mod consent;
pub mod contact;
pub mod embed;
pub mod page;
pub mod toast;

pub use config::SiteConfig;
pub use consent::{CONSENT_KEY, CookieConsent, FileStorage, MemoryStorage, Storage};
pub use contact::{ContactController, ContactForm, Field, FieldError};
pub use embed::{Branch, EmbedSlot, EmbedState, RenderBranch, render_branch};
pub use page::{Page, PageFrame, PageLayout, SectionFrame, SectionLayout};
pub use toast::{Toast, ToastKind, Toasts};
