//! Integration tests for lazismu
//!
//! Tests are organized by component:
//! - feed_test: Programs feed client and fallback rendering
//! - app_test: Page controller (preferences, slider timing, reveal)
//! - news_test: News teaser, listing and article routing
//! - ui_test: Terminal rendering and hit regions
//! - cli_test: Argument parsing and command handlers

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
