//! Preference persistence
//!
//! A small string key-value store standing in for origin-scoped browser
//! storage, and the preference store that reads and writes the `lang` and
//! `theme` entries through it. Persistence is best-effort: corrupt or missing
//! values fall back to defaults, failed writes are logged and dropped.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::{Language, Preferences, Theme};

/// Storage key for the language preference
pub const LANG_KEY: &str = "lang";
/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";

/// Durable string key-value storage
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Volatile store (tests and `--ephemeral` runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// TOML-backed store (~/.config/lazismu/storage.toml)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default storage path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lazismu").join("storage.toml"))
    }

    /// Open the store at `path`; an unreadable or corrupt file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Could not write {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

// =============================================================================
// Preference store
// =============================================================================

/// Reads and writes the persisted language and theme
pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("preferences", &self.load())
            .finish()
    }
}

impl PreferenceStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Store backed by memory only
    pub fn ephemeral() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Persisted preferences, defaults for anything absent or unsupported
    pub fn load(&self) -> Preferences {
        let language = self
            .store
            .get(LANG_KEY)
            .map(|code| Language::coerce(&code))
            .unwrap_or_default();
        let theme = Theme::from_stored(self.store.get(THEME_KEY).as_deref());
        Preferences { language, theme }
    }

    pub fn save_language(&mut self, lang: Language) {
        self.write(LANG_KEY, lang.code());
    }

    pub fn save_theme(&mut self, theme: Theme) {
        self.write(THEME_KEY, theme.code());
    }

    /// Raw stored value (diagnostics and tests)
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        match self.store.set(key, value) {
            Ok(()) => debug!("Persisted {}={}", key, value),
            Err(e) => warn!("Could not persist {}: {:#}", key, e),
        }
    }
}
