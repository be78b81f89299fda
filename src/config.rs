//! Configuration management for the Lazismu site
//!
//! Handles config file loading and feed endpoint resolution.
//! Config is stored at ~/.config/lazismu/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder sheet id shipped with the site template
pub const DEFAULT_SHEET_ID: &str = "GANTI_DENGAN_ID_SHEET_ANDA";

/// Default slider autoplay period
pub const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 5000;

/// Placeholder cards shown while programs load
pub const DEFAULT_SKELETON_COUNT: usize = 3;

/// Environment variable overriding the feed endpoint
pub const FEED_URL_ENV: &str = "LAZISMU_FEED_URL";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Published spreadsheet id backing the programs feed
    pub sheet_id: Option<String>,
    /// Full feed URL, takes precedence over `sheet_id`
    pub feed_url: Option<String>,
    /// Slider autoplay period in milliseconds
    pub autoplay_delay_ms: Option<u64>,
    /// Skeleton cards rendered while loading
    pub skeleton_count: Option<usize>,
}

impl Config {
    /// Get config file path (~/.config/lazismu/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lazismu").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from an explicit path, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Feed endpoint with fallback chain:
    /// 1. Environment variable LAZISMU_FEED_URL
    /// 2. `feed_url` from the config file
    /// 3. Spreadsheet list feed built from `sheet_id` (or the placeholder id)
    pub fn feed_url(&self) -> String {
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }

        if let Some(ref url) = self.feed_url {
            return url.clone();
        }

        Self::sheet_feed_url(self.sheet_id.as_deref().unwrap_or(DEFAULT_SHEET_ID))
    }

    /// Public JSON list feed of a published spreadsheet
    pub fn sheet_feed_url(sheet_id: &str) -> String {
        format!(
            "https://spreadsheets.google.com/feeds/list/{}/od6/public/values?alt=json",
            urlencoding::encode(sheet_id)
        )
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms.unwrap_or(DEFAULT_AUTOPLAY_DELAY_MS))
    }

    pub fn skeleton_count(&self) -> usize {
        self.skeleton_count.unwrap_or(DEFAULT_SKELETON_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.sheet_id.is_none());
        assert_eq!(config.autoplay_delay(), Duration::from_millis(5000));
        assert_eq!(config.skeleton_count(), 3);
    }

    #[test]
    fn test_sheet_feed_url() {
        assert_eq!(
            Config::sheet_feed_url("abc123"),
            "https://spreadsheets.google.com/feeds/list/abc123/od6/public/values?alt=json"
        );
    }

    #[test]
    fn test_feed_url_prefers_explicit_url() {
        if std::env::var(FEED_URL_ENV).is_ok() {
            return;
        }
        let config = Config {
            sheet_id: Some("abc".into()),
            feed_url: Some("http://localhost:9/feed.json".into()),
            ..Config::default()
        };
        assert_eq!(config.feed_url(), "http://localhost:9/feed.json");

        let config = Config {
            sheet_id: Some("abc".into()),
            ..Config::default()
        };
        assert!(config.feed_url().contains("/list/abc/od6/"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sheet_id = \"sheet\"\nautoplay_delay_ms = 1200\n").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.sheet_id.as_deref(), Some("sheet"));
        assert_eq!(config.autoplay_delay(), Duration::from_millis(1200));
        assert_eq!(config.skeleton_count(), DEFAULT_SKELETON_COUNT);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("nope.toml")), Config::default());
    }
}
