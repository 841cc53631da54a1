//! Gallery catalog and lightbox controller.

pub mod gallery;
pub mod item;
pub mod lightbox;

pub use gallery::Gallery;
pub use item::{Catalog, Filter, GalleryItem};
pub use lightbox::Lightbox;
