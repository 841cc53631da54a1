//! # Cookie consent
//!
//! A single flag under a fixed key, read once at startup and written once
//! when the visitor accepts. There is no expiry or policy version: accepting
//! is permanent for that storage.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use coatline_core::{Error, Result, Signal, signal};

pub const CONSENT_KEY: &str = "coatline.cookie-consent";
const ACCEPTED: &str = "true";

/// String key-value storage, the shape of browser local storage.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStorage {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage in a JSON object file. A missing file reads as empty.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(Error::storage(format!("read '{}': {e}", self.path.display())));
            }
        };
        serde_json::from_str(&text)
            .map_err(|e| Error::serde(format!("'{}': {e}", self.path.display())))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&map).map_err(|e| Error::serde(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::storage(format!("create '{}': {e}", dir.display())))?;
        }
        std::fs::write(&self.path, json)
            .map_err(|e| Error::storage(format!("write '{}': {e}", self.path.display())))
    }
}

/// Consent state for the cookie notice.
pub struct CookieConsent<S: Storage> {
    storage: S,
    accepted: Signal<bool>,
}

impl<S: Storage> CookieConsent<S> {
    /// Reads the flag once. An unreadable store shows the notice again
    /// rather than failing the page.
    pub fn load(storage: S) -> Self {
        let accepted = match storage.get(CONSENT_KEY) {
            Ok(v) => v.as_deref() == Some(ACCEPTED),
            Err(e) => {
                log::warn!("cookie consent unreadable, asking again: {e}");
                false
            }
        };
        log::debug!("cookie consent loaded (accepted: {accepted})");
        Self {
            storage,
            accepted: signal(accepted),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted.get()
    }

    pub fn should_show_notice(&self) -> bool {
        !self.is_accepted()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.accepted.clone()
    }

    /// Records acceptance. Writes only the first time.
    pub fn accept(&self) -> Result<()> {
        if self.is_accepted() {
            return Ok(());
        }
        self.storage.set(CONSENT_KEY, ACCEPTED)?;
        self.accepted.set(true);
        log::info!("cookie consent accepted");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
