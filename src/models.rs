//! Data structures and types for the Lazismu site
//!
//! Contains the shared models used across the renderer, organized by domain:
//! - **Preferences**: persisted language and theme choice
//! - **Programs**: localized aid program records from the remote feed
//! - **Articles**: the fixed demo news items

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Preferences
// =============================================================================

/// Supported site languages
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Turkish (default)
    #[default]
    Tr,
    /// English
    En,
    /// Arabic
    Ar,
}

impl Language {
    /// All languages in switcher order
    pub const ALL: [Language; 3] = [Language::Tr, Language::En, Language::Ar];

    /// Two-letter code used in storage, the `lang` attribute and control ids
    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Parse an exact language code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// Parse a code, silently falling back to Turkish for anything unsupported
    pub fn coerce(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Right-to-left script
    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =============================================================================
// Date Rendering
// =============================================================================

/// Calendar date rendering of the viewer's locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// 2025-07-18 (C/POSIX or unknown locale)
    #[default]
    Iso,
    /// 7/18/2025
    MonthFirst,
    /// 18.07.2025
    DayFirstDotted,
    /// 18/07/2025
    DayFirstSlashed,
}

impl DateStyle {
    /// Style for a POSIX locale name such as `tr_TR.UTF-8` or `en_US`
    pub fn from_locale(locale: &str) -> Self {
        let name = locale.split(['.', '@']).next().unwrap_or("");
        let mut parts = name.split(['_', '-']);
        let language = parts.next().unwrap_or("").to_ascii_lowercase();
        let region = parts.next().unwrap_or("").to_ascii_uppercase();

        match (language.as_str(), region.as_str()) {
            ("" | "c" | "posix", _) => DateStyle::Iso,
            ("en", "US" | "") => DateStyle::MonthFirst,
            ("tr" | "de" | "ru" | "pl" | "fi" | "nb" | "cs", _) => DateStyle::DayFirstDotted,
            ("zh" | "ja" | "ko" | "sv" | "lt", _) => DateStyle::Iso,
            _ => DateStyle::DayFirstSlashed,
        }
    }

    /// Style of the current process locale (`LC_ALL`, `LC_TIME`, then `LANG`)
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_locale(&value))
            .unwrap_or_default()
    }

    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
            DateStyle::MonthFirst => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            DateStyle::DayFirstDotted => {
                format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
            }
            DateStyle::DayFirstSlashed => {
                format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
            }
        }
    }
}

/// Visual mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored value; only `dark` selects dark mode
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
}

// =============================================================================
// Localized Text
// =============================================================================

/// One string per supported language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub tr: String,
    pub en: String,
    pub ar: String,
}

impl Localized {
    pub fn new(tr: impl Into<String>, en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            tr: tr.into(),
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Raw variant for a language
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Tr => &self.tr,
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// Variant for a language, falling back to Turkish when it is empty
    pub fn pick(&self, lang: Language) -> &str {
        let value = self.get(lang);
        if value.is_empty() {
            &self.tr
        } else {
            value
        }
    }
}

// =============================================================================
// Programs
// =============================================================================

/// A localized aid program shown as a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub title: Localized,
    pub description: Localized,
    pub image_url: String,
}

impl Program {
    pub fn title_for(&self, lang: Language) -> &str {
        self.title.pick(lang)
    }

    pub fn description_for(&self, lang: Language) -> &str {
        self.description.pick(lang)
    }
}

// =============================================================================
// Articles
// =============================================================================

/// A demo news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Stable lookup key for detail views
    pub id: &'static str,
    pub title: &'static str,
    pub date: NaiveDate,
    pub image: &'static str,
    pub excerpt: &'static str,
    pub content: &'static str,
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.date)
    }
}
