use std::rc::Rc;

use coatline_core::{Error, Result};
use serde::Deserialize;

/// One image in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GalleryItem {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Which part of the catalog is on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => item.category.as_deref() == Some(c.as_str()),
        }
    }
}

const BUNDLED: &str = include_str!("../assets/gallery.json");

/// Immutable list of gallery items, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Rc<[GalleryItem]>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<GalleryItem> =
            serde_json::from_str(json).map_err(|e| Error::serde(e.to_string()))?;
        log::info!("gallery catalog loaded ({} items)", items.len());
        Ok(Self::new(items))
    }

    /// The catalog shipped with the site.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED)
    }

    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> Rc<[GalleryItem]> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for c in self.items.iter().filter_map(|i| i.category.as_ref()) {
            if !out.contains(c) {
                out.push(c.clone());
            }
        }
        out
    }

    /// Items passing `filter`, in catalog order. `All` shares the catalog.
    pub fn filtered(&self, filter: &Filter) -> Rc<[GalleryItem]> {
        match filter {
            Filter::All => self.items.clone(),
            f => self.items.iter().filter(|i| f.matches(i)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let c = Catalog::bundled().unwrap();
        assert_eq!(c.len(), 20);
        assert_eq!(
            c.categories(),
            vec!["powder", "facility", "galvanizing", "preparation", "projects"]
        );
    }

    #[test]
    fn filter_keeps_order_and_skips_uncategorized() {
        let c = Catalog::bundled().unwrap();
        let galv = c.filtered(&Filter::Category("galvanizing".into()));
        assert_eq!(galv.len(), 4);
        assert!(galv.iter().all(|i| i.category.as_deref() == Some("galvanizing")));
        assert_eq!(galv[0].src, "/gallery/galvanizing-bath.jpg");
        assert_eq!(c.filtered(&Filter::All).len(), 20);
        assert!(c.filtered(&Filter::Category("nope".into())).is_empty());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        assert!(matches!(Catalog::from_json("{"), Err(Error::Serde(_))));
    }
}
