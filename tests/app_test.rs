//! Page controller tests
//!
//! Tests preference persistence across page loads, slider autoplay timing
//! and the reveal flow through the controller.

use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use lazismu::app::{App, AppEvent, Control};
use lazismu::config::Config;
use lazismu::models::{Language, Theme};
use lazismu::page::{Animation, Page};
use lazismu::reveal::Intersection;
use lazismu::store::{FileStore, PreferenceStore};
use lazismu::FeedError;

fn file_prefs(dir: &TempDir) -> PreferenceStore {
    PreferenceStore::new(FileStore::open(dir.path().join("storage.toml")))
}

// =============================================================================
// Preferences
// =============================================================================

#[test]
fn test_preferences_survive_reload() {
    let dir = TempDir::new().unwrap();

    {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(Page::news(), file_prefs(&dir), Config::default(), tx);
        app.init();
        app.click(Control::LangButton("lang-en".into()));
        app.click(Control::ThemeToggle);
    }

    let prefs = file_prefs(&dir).load();
    assert_eq!(prefs.language, Language::En);
    assert_eq!(prefs.theme, Theme::Dark);

    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), file_prefs(&dir), Config::default(), tx);
    app.init();
    assert_eq!(app.page.lang, Language::En);
    assert!(app.page.dark);
    assert_eq!(app.page.text("nav-home"), Some("Home"));
    assert_eq!(
        app.page.active_language_button().map(|b| b.id.as_str()),
        Some("lang-en")
    );
}

#[test]
fn test_each_language_marks_its_button_exclusively() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();

    for lang in Language::ALL {
        app.set_language(lang.code());
        assert_eq!(app.page.lang, lang);
        let pressed: Vec<_> = app
            .page
            .lang_buttons
            .iter()
            .filter(|b| b.active && b.aria_pressed)
            .map(|b| b.language())
            .collect();
        assert_eq!(pressed, vec![Some(lang)]);
    }
}

#[test]
fn test_unsupported_stored_language_becomes_turkish() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("storage.toml"), "lang = \"fr\"\ntheme = \"sepia\"\n").unwrap();

    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), file_prefs(&dir), Config::default(), tx);
    app.init();

    assert_eq!(app.language, Language::Tr);
    assert!(!app.page.dark);
    assert_eq!(app.prefs.raw("lang").as_deref(), Some("tr"));
}

#[test]
fn test_missing_targets_are_skipped() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut page = Page::home();
    page.theme_toggle = false;
    page.main_nav = None;
    page.lang_buttons.clear();

    let mut app = App::new(page, PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();
    app.click(Control::ThemeToggle);
    app.click(Control::MobileNavToggle);
    app.click(Control::LangButton("lang-ar".into()));

    assert!(!app.page.dark);
    assert_eq!(app.language, Language::Ar);
}

// =============================================================================
// Slider
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_autoplay_advances_every_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();

    let slider = app.slider.as_ref().unwrap();
    assert!(slider.is_playing());
    assert_eq!(slider.current(), 0);

    for expected in [1, 2, 0] {
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::SlideTick { .. }));
        app.handle_event(event);
        assert_eq!(app.slider.as_ref().unwrap().current(), expected);
    }
}

#[tokio::test(start_paused = true)]
async fn test_hover_pauses_and_restarts_full_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = Config {
        autoplay_delay_ms: Some(1000),
        ..Config::default()
    };
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), config, tx);
    app.init();

    tokio::time::sleep(Duration::from_millis(800)).await;
    app.slider_pointer_enter();
    assert!(!app.slider.as_ref().unwrap().is_playing());

    // Nothing fires while hovered
    assert!(tokio::time::timeout(Duration::from_secs(3), rx.recv())
        .await
        .is_err());

    app.slider_pointer_leave();
    assert!(tokio::time::timeout(Duration::from_millis(900), rx.recv())
        .await
        .is_err());
    assert!(matches!(rx.recv().await, Some(AppEvent::SlideTick { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_manual_navigation_keeps_timer() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();

    app.click(Control::SliderPrev);
    assert_eq!(app.slider.as_ref().unwrap().current(), 2);
    app.click(Control::SliderNext);
    app.click(Control::SliderNext);
    assert_eq!(app.slider.as_ref().unwrap().current(), 1);
    assert!(app.slider.as_ref().unwrap().is_playing());

    let active: Vec<bool> = app
        .slider
        .as_ref()
        .unwrap()
        .slides()
        .iter()
        .map(|s| s.active)
        .collect();
    assert_eq!(active, vec![false, true, false]);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_the_page_stops_autoplay() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();

    app.open_page(Page::news());
    assert!(app.slider.is_none());
    assert!(tokio::time::timeout(Duration::from_secs(20), rx.recv())
        .await
        .is_err());
}

// =============================================================================
// Reveal
// =============================================================================

#[test]
fn test_program_cards_reveal_once() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(Page::home(), PreferenceStore::ephemeral(), Config::default(), tx);
    app.init();
    let generation = app.begin_program_load().unwrap();
    app.finish_program_load(generation, Err(FeedError::Status(503)));

    let ids: Vec<_> = app
        .page
        .program_container
        .as_ref()
        .unwrap()
        .fragments
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(app.reveal.pending_count(), 3);

    let report = [
        Intersection { target: ids[0], ratio: 0.5 },
        Intersection { target: ids[1], ratio: 0.11 },
        Intersection { target: ids[2], ratio: 0.0 },
    ];
    assert_eq!(app.report_visibility(&report), 1);
    assert_eq!(app.reveal.pending_count(), 2);

    let container = app.page.program_container.as_ref().unwrap();
    assert_eq!(container.fragments[0].animation, Some(Animation::FADE_IN_UP));
    assert_eq!(container.fragments[1].animation, None);

    // Scrolling back over a revealed card does nothing
    assert_eq!(
        app.report_visibility(&[Intersection { target: ids[0], ratio: 1.0 }]),
        0
    );
    assert_eq!(
        app.report_visibility(&[Intersection { target: ids[1], ratio: 0.12 }]),
        1
    );
}
