//! Active-section observation and the header that follows it.

pub mod header;
pub mod sections;

pub use header::{Header, HeaderPalette, MobileMenu, NavEntry, NavItem};
pub use sections::{
    ActiveSection, HeaderTheme, ObserverConfig, SectionObserver, SectionSpec, pick_most_visible,
};
