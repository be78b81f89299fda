//! App state and core application logic
//!
//! One controller owns the loaded page and every component wired to it:
//! preferences, language, theme, slider, programs, reveal registry and the
//! news module. Components whose page target is missing are never built.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::api::{FeedClient, FeedError};
use crate::config::Config;
use crate::models::{Article, DateStyle, Language, Program, Theme};
use crate::news;
use crate::page::{resolve_url, FragmentKind, Page, PageKind};
use crate::programs;
use crate::reveal::{Intersection, RevealAnimator};
use crate::slider::{Direction, Slider};
use crate::store::PreferenceStore;

// =============================================================================
// Events
// =============================================================================

/// Asynchronous events delivered to the controller
#[derive(Debug)]
pub enum AppEvent {
    /// Slider autoplay period elapsed, tagged with the page load that owns
    /// the slider
    SlideTick { page: u64 },
    /// Programs feed request finished
    ProgramsLoaded {
        generation: u64,
        result: Result<Vec<Program>, FeedError>,
    },
}

/// Clickable page controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Language switch, carrying its element id (`lang-en`)
    LangButton(String),
    ThemeToggle,
    MobileNavToggle,
    SliderPrev,
    SliderNext,
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application controller
#[derive(Debug)]
pub struct App {
    /// Currently loaded page
    pub page: Page,
    pub prefs: PreferenceStore,
    pub config: Config,
    /// Active language
    pub language: Language,
    /// Viewer's calendar date style
    pub date_style: DateStyle,
    /// Programs from the last load (remote or fallback)
    pub programs: Vec<Program>,
    pub articles: Vec<Article>,
    pub slider: Option<Slider>,
    pub reveal: RevealAnimator,

    // Viewer state
    /// Whether the app is running
    pub running: bool,
    /// Previously visited page locations
    pub history: Vec<String>,
    /// Document scroll offset in lines
    pub scroll: usize,
    /// Selected news card on the current page
    pub selected_card: usize,
    /// Pointer currently inside the slider region
    pub pointer_over_slider: bool,

    events: UnboundedSender<AppEvent>,
    page_generation: u64,
    load_generation: u64,
    load_requested: bool,
}

impl App {
    /// Create a controller for `page`; call [`App::init`] to run the page setup
    pub fn new(
        page: Page,
        prefs: PreferenceStore,
        config: Config,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let mut app = Self {
            page,
            prefs,
            config,
            language: Language::default(),
            date_style: DateStyle::from_env(),
            programs: Vec::new(),
            articles: news::articles(),
            slider: None,
            reveal: RevealAnimator::default(),
            running: true,
            history: Vec::new(),
            scroll: 0,
            selected_card: 0,
            pointer_over_slider: false,
            events,
            page_generation: 0,
            load_generation: 0,
            load_requested: false,
        };
        app.attach_slider();
        app
    }

    /// Take over the page's hero slides, if the page has a slider
    fn attach_slider(&mut self) {
        self.slider = self.page.hero.take().map(|hero| {
            Slider::new(
                hero.slides,
                hero.has_nav,
                self.config.autoplay_delay(),
                self.page_generation,
                self.events.clone(),
            )
        });
    }

    /// Page setup: preferences, slider, news and article routing.
    /// Program loading is requested here and driven by the caller.
    pub fn init(&mut self) {
        self.restore_preferences();
        if let Some(slider) = self.slider.as_mut() {
            slider.start();
        }
        self.render_news_teaser();
        self.route_page();
        self.load_requested = self.page.program_container.is_some();
        info!("Initialized {} ({})", self.page.location, self.language);
    }

    fn restore_preferences(&mut self) {
        let prefs = self.prefs.load();
        self.page.dark = prefs.theme.is_dark();
        self.set_language(prefs.language.code());
    }

    // -------------------------------------------------------------------------
    // Language and Theme
    // -------------------------------------------------------------------------

    /// Apply a language and persist it; unsupported codes become Turkish
    pub fn set_language(&mut self, code: &str) -> Language {
        let lang = self.apply_language(code);
        self.prefs.save_language(lang);
        lang
    }

    /// Apply a language to the page for this session only
    pub fn apply_language(&mut self, code: &str) -> Language {
        let lang = Language::coerce(code);
        self.language = lang;
        self.page.lang = lang;

        let active_id = format!("lang-{}", lang.code());
        for button in &mut self.page.lang_buttons {
            let active = button.id == active_id;
            button.active = active;
            button.aria_pressed = active;
        }

        for node in self.page.texts.iter_mut().filter(|t| t.is_translatable()) {
            node.translate(lang);
        }

        if !self.programs.is_empty() {
            self.render_programs();
        }
        debug!("Language set to {}", lang);
        lang
    }

    /// Flip dark mode and persist the result
    pub fn toggle_theme(&mut self) -> Theme {
        self.page.dark = !self.page.dark;
        let theme = Theme::from_dark(self.page.dark);
        self.prefs.save_theme(theme);
        theme
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.page.dark)
    }

    /// Show or hide the main navigation
    pub fn toggle_mobile_nav(&mut self) {
        if !self.page.mobile_nav_toggle {
            return;
        }
        if let Some(nav) = self.page.main_nav.as_mut() {
            nav.visible = !nav.visible;
        }
    }

    // -------------------------------------------------------------------------
    // Slider
    // -------------------------------------------------------------------------

    /// Manual prev/next; the autoplay timer is left alone
    pub fn change_slide(&mut self, direction: Direction) {
        if let Some(slider) = self.slider.as_mut() {
            slider.advance(direction);
        }
    }

    /// Pointer entered the slider region: pause autoplay
    pub fn slider_pointer_enter(&mut self) {
        if self.pointer_over_slider {
            return;
        }
        self.pointer_over_slider = true;
        if let Some(slider) = self.slider.as_mut() {
            slider.stop();
        }
    }

    /// Pointer left the slider region: restart autoplay from a full period
    pub fn slider_pointer_leave(&mut self) {
        if !self.pointer_over_slider {
            return;
        }
        self.pointer_over_slider = false;
        if let Some(slider) = self.slider.as_mut() {
            slider.start();
        }
    }

    // -------------------------------------------------------------------------
    // Programs
    // -------------------------------------------------------------------------

    /// Whether a program load should be started (cleared on read)
    pub fn take_load_request(&mut self) -> bool {
        std::mem::take(&mut self.load_requested)
    }

    /// Show skeletons and open a new load; `None` when the page has no
    /// program container
    pub fn begin_program_load(&mut self) -> Option<u64> {
        let container = self.page.program_container.as_mut()?;
        programs::render_skeletons(container, self.config.skeleton_count());
        self.reveal.prune(&self.page);
        self.load_generation += 1;
        Some(self.load_generation)
    }

    /// Replace the program list with the feed result, or the fallback set
    /// on any failure, then render once
    pub fn finish_program_load(
        &mut self,
        generation: u64,
        result: Result<Vec<Program>, FeedError>,
    ) {
        if generation != self.load_generation {
            debug!("Dropping stale program load #{}", generation);
            return;
        }
        self.programs = match result {
            Ok(programs) => {
                info!("Loaded {} program(s) from feed", programs.len());
                programs
            }
            Err(e) => {
                warn!("Falling back to demo programs: {}", e);
                programs::fallback_programs()
            }
        };
        self.render_programs();
    }

    /// Load programs from the feed and render them
    pub async fn fetch_programs(&mut self, client: &FeedClient) {
        let Some(generation) = self.begin_program_load() else {
            return;
        };
        let result = client.fetch().await;
        self.finish_program_load(generation, result);
    }

    /// Render the in-memory programs for the active language
    pub fn render_programs(&mut self) {
        let Some(container) = self.page.program_container.as_mut() else {
            return;
        };
        programs::render_programs(container, &self.programs, self.language, &mut self.reveal);
        self.reveal.prune(&self.page);
    }

    // -------------------------------------------------------------------------
    // News
    // -------------------------------------------------------------------------

    /// Three teaser cards on the home page
    pub fn render_news_teaser(&mut self) {
        if let Some(container) = self.page.home_news.as_mut() {
            news::render_teaser(container, &self.articles, self.date_style);
        }
    }

    /// Full listing and article detail, whichever the page carries
    pub fn route_page(&mut self) {
        if let Some(container) = self.page.all_articles.as_mut() {
            news::render_full_list(container, &self.articles, self.date_style, &mut self.reveal);
        }

        let id = self.page.query_param("id").map(str::to_owned);
        if let Some(container) = self.page.article_detail.as_mut() {
            news::render_detail(container, &self.articles, id.as_deref(), self.date_style);
        }
    }

    /// Article ids of the news cards on the current page, in order
    pub fn news_card_ids(&self) -> Vec<String> {
        [self.page.home_news.as_ref(), self.page.all_articles.as_ref()]
            .into_iter()
            .flatten()
            .flat_map(|c| c.fragments.iter())
            .filter_map(|f| match &f.kind {
                FragmentKind::NewsCard(card) => Some(card.article_id.clone()),
                _ => None,
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Reveal
    // -------------------------------------------------------------------------

    /// Feed a visibility report to the reveal registry
    pub fn report_visibility(&mut self, entries: &[Intersection]) -> usize {
        self.reveal.report(entries, &mut self.page).len()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Load another page, as a browser navigation would
    pub fn open_page(&mut self, page: Page) {
        self.history.push(self.page.location.clone());
        self.load(page);
    }

    /// Load a page address (`berita.html`, `artikel-detail.html?id=...`)
    pub fn open_location(&mut self, location: &str) {
        match resolve_url(location) {
            Ok(url) => self.open_page(Page::load(&url)),
            Err(e) => warn!("Ignoring bad location {}: {}", location, e),
        }
    }

    /// Return to the previous page
    pub fn back(&mut self) -> bool {
        let Some(location) = self.history.pop() else {
            return false;
        };
        match resolve_url(&location) {
            Ok(url) => {
                self.load(Page::load(&url));
                true
            }
            Err(_) => false,
        }
    }

    fn load(&mut self, page: Page) {
        // Results and ticks from the previous page no longer apply
        self.page_generation += 1;
        self.load_generation += 1;
        self.load_requested = false;
        // Dropping the old slider cancels its timer
        self.slider = None;
        self.reveal.clear();
        self.programs.clear();
        self.page = page;
        self.scroll = 0;
        self.selected_card = 0;
        self.pointer_over_slider = false;
        self.attach_slider();
        self.init();
    }

    /// Open the detail page of the selected news card
    pub fn open_selected_article(&mut self) {
        if let Some(id) = self.news_card_ids().get(self.selected_card).cloned() {
            self.open_page(Page::article(Some(id.as_str())));
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Event Handling
    // -------------------------------------------------------------------------

    /// Apply an asynchronous event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SlideTick { page } if page == self.page_generation => {
                self.change_slide(Direction::Next)
            }
            AppEvent::SlideTick { page } => debug!("Dropping slide tick from page #{}", page),
            AppEvent::ProgramsLoaded { generation, result } => {
                self.finish_program_load(generation, result)
            }
        }
    }

    /// Click on a page control
    pub fn click(&mut self, control: Control) {
        match control {
            Control::LangButton(id) => {
                let code = id.strip_prefix("lang-").unwrap_or(&id).to_string();
                self.set_language(&code);
            }
            Control::ThemeToggle => {
                if self.page.theme_toggle {
                    self.toggle_theme();
                }
            }
            Control::MobileNavToggle => self.toggle_mobile_nav(),
            Control::SliderPrev => {
                if self.slider.as_ref().is_some_and(Slider::has_nav) {
                    self.change_slide(Direction::Prev);
                }
            }
            Control::SliderNext => {
                if self.slider.as_ref().is_some_and(Slider::has_nav) {
                    self.change_slide(Direction::Next);
                }
            }
        }
    }

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char(c @ '1'..='3') => {
                let lang = Language::ALL[(c as usize) - ('1' as usize)];
                self.click(Control::LangButton(format!("lang-{}", lang.code())));
            }
            KeyCode::Char('t') => self.click(Control::ThemeToggle),
            KeyCode::Char('m') => self.click(Control::MobileNavToggle),
            KeyCode::Left => self.click(Control::SliderPrev),
            KeyCode::Right => self.click(Control::SliderNext),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Tab => {
                let count = self.news_card_ids().len();
                if count > 0 {
                    self.selected_card = (self.selected_card + 1) % count;
                }
            }
            KeyCode::BackTab => {
                let count = self.news_card_ids().len();
                if count > 0 {
                    self.selected_card = (self.selected_card + count - 1) % count;
                }
            }
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected_article(),
            KeyCode::Char('n') | KeyCode::Char('b') => {
                if self.page.kind != PageKind::News {
                    self.open_page(Page::news());
                }
            }
            KeyCode::Char('h') => {
                if self.page.kind != PageKind::Home {
                    self.open_page(Page::home());
                }
            }
            KeyCode::Esc | KeyCode::Backspace => return self.back(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
