//! Video bookmarks
//!
//! Persisted to LocalStorage as a single JSON array. Every addition reads the
//! whole list, appends, and writes it back. No versioning, no size cap.

use serde::{Deserialize, Serialize};

/// A single bookmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Video position in seconds
    pub time: f64,
    pub label: String,
    /// ISO-8601 creation time
    pub timestamp: String,
}

/// Append-only bookmark list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks {
    pub entries: Vec<Bookmark>,
}

impl Bookmarks {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "videoBookmarks";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a bookmark labelled by its 1-based position
    pub fn push(&mut self, time: f64, timestamp: String) -> &Bookmark {
        let label = format!("书签 {}", self.entries.len() + 1);
        self.entries.push(Bookmark {
            time,
            label,
            timestamp,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Parse a stored array; anything unreadable counts as empty
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable bookmarks: {}", e);
            Self::new()
        })
    }

    /// Load bookmarks from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json(&json);
            }
        }
        Self::new()
    }

    /// Save bookmarks to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Bookmarks saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Read-modify-write a new bookmark at `time` seconds (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn add(time: f64) -> Bookmark {
        let mut bookmarks = Self::load();
        let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
        let bookmark = bookmarks.push(time, timestamp).clone();
        bookmarks.save();
        bookmark
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
