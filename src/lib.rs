//! Lazismu - multilingual nonprofit site renderer
//!
//! Drives the pages of the Lazismu Türkiye site: a three-language switcher
//! with persisted choice, a dark-mode toggle, an auto-advancing hero slider,
//! aid program cards loaded from a published spreadsheet feed with a demo
//! fallback, scroll-triggered card entrances and a small news module.
//!
//! # Modules
//!
//! - `models` - Languages, preferences, programs and articles
//! - `page` - The page document the controllers manipulate
//! - `store` - Key-value persistence of preferences
//! - `api` - Programs feed client
//! - `app` - The page controller and its event handling
//! - `ui` - Terminal rendering

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod news;
pub mod page;
pub mod programs;
pub mod reveal;
pub mod slider;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use api::{FeedClient, FeedError};
pub use app::{App, AppEvent, Control};
pub use config::Config;
pub use models::{Article, DateStyle, Language, Localized, Preferences, Program, Theme};
pub use page::{Fragment, FragmentId, FragmentKind, Page, PageKind};
pub use reveal::{Intersection, RevealAnimator};
pub use store::{FileStore, KeyValueStore, MemoryStore, PreferenceStore};
