//! Terminal UI
//!
//! Draws the loaded page: header controls, optional navigation, the hero
//! slider and the scrollable body. Each draw returns a [`ScreenMap`] with
//! the clickable regions and the body's visibility report.

pub mod document;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Control};
use crate::reveal::Intersection;

pub use document::Document;
pub use theme::Palette;

/// Where things landed on the last frame
#[derive(Debug, Clone, Default)]
pub struct ScreenMap {
    pub controls: Vec<(Rect, Control)>,
    /// Hero region, for hover pause
    pub slider: Option<Rect>,
    pub body: Rect,
    pub max_scroll: usize,
    /// Body fragments against the viewport
    pub visible: Vec<Intersection>,
}

impl ScreenMap {
    /// Control under a terminal cell
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        let pos = Position::new(column, row);
        self.controls
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, control)| control.clone())
    }

    pub fn in_slider(&self, column: u16, row: u16) -> bool {
        self.slider
            .is_some_and(|rect| rect.contains(Position::new(column, row)))
    }
}

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &App) -> ScreenMap {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme());
    let mut map = ScreenMap::default();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(palette.text()), area);

    let nav_open = app.page.main_nav.as_ref().is_some_and(|n| n.visible);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                      // Header
            Constraint::Length(if nav_open { 1 } else { 0 }),           // Navigation
            Constraint::Length(if app.slider.is_some() { 5 } else { 0 }), // Hero
            Constraint::Min(1),                                         // Body
            Constraint::Length(1),                                      // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app, &palette, &mut map);
    if nav_open {
        render_nav(frame, chunks[1], app, &palette);
    }
    if app.slider.is_some() {
        render_hero(frame, chunks[2], app, &palette, &mut map);
    }
    render_body(frame, chunks[3], app, &palette, &mut map);
    render_status_bar(frame, chunks[4], app, &palette);
    map
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, map: &mut ScreenMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border())
        .style(palette.status_bar());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buttons = app.page.lang_buttons.len() as u16;
    let mut constraints = vec![Constraint::Min(1)];
    constraints.extend((0..buttons).map(|_| Constraint::Length(5)));
    constraints.push(Constraint::Length(if app.page.theme_toggle { 4 } else { 0 }));
    constraints.push(Constraint::Length(if app.page.mobile_nav_toggle { 4 } else { 0 }));
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    let brand = app.page.text("brand").unwrap_or_default().to_string();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(brand, palette.title()))),
        cells[0],
    );

    for (i, button) in app.page.lang_buttons.iter().enumerate() {
        let rect = cells[i + 1];
        let label = button
            .language()
            .map(|l| l.code().to_uppercase())
            .unwrap_or_else(|| button.id.clone());
        let style = if button.active {
            palette.pressed()
        } else {
            palette.button()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", label), style)).alignment(Alignment::Center),
            rect,
        );
        map.controls.push((rect, Control::LangButton(button.id.clone())));
    }

    let theme_cell = cells[cells.len() - 2];
    if app.page.theme_toggle {
        let icon = if app.page.dark { "☀" } else { "☾" };
        frame.render_widget(
            Paragraph::new(Span::styled(icon, palette.button())).alignment(Alignment::Center),
            theme_cell,
        );
        map.controls.push((theme_cell, Control::ThemeToggle));
    }

    let nav_cell = cells[cells.len() - 1];
    if app.page.mobile_nav_toggle {
        frame.render_widget(
            Paragraph::new(Span::styled("≡", palette.button())).alignment(Alignment::Center),
            nav_cell,
        );
        map.controls.push((nav_cell, Control::MobileNavToggle));
    }
}

fn render_nav(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = Vec::new();
    for name in ["nav-home", "nav-programs", "nav-news", "nav-donate"] {
        if let Some(text) = app.page.text(name) {
            let style = if name == "nav-donate" {
                palette.donate()
            } else {
                palette.button()
            };
            spans.push(Span::styled(format!(" {} ", text), style));
            spans.push(Span::raw(" "));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_hero(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, map: &mut ScreenMap) {
    let Some(slider) = app.slider.as_ref() else {
        return;
    };
    map.slider = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let nav_width = if slider.has_nav() { 3 } else { 0 };
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(nav_width),
            Constraint::Min(1),
            Constraint::Length(nav_width),
        ])
        .split(inner);

    if slider.has_nav() {
        frame.render_widget(
            Paragraph::new(Span::styled("‹", palette.title())).alignment(Alignment::Center),
            cells[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled("›", palette.title())).alignment(Alignment::Center),
            cells[2],
        );
        map.controls.push((cells[0], Control::SliderPrev));
        map.controls.push((cells[2], Control::SliderNext));
    }

    let dots: Vec<Span> = slider
        .slides()
        .iter()
        .map(|s| {
            if s.active {
                Span::styled("● ", palette.title())
            } else {
                Span::styled("○ ", palette.dimmed())
            }
        })
        .collect();

    let mut lines = Vec::new();
    if let Some(slide) = slider.current_slide() {
        lines.push(Line::from(Span::styled(
            slide.caption.pick(app.language).to_string(),
            palette.heading(),
        )));
        lines.push(Line::from(Span::styled(slide.image.clone(), palette.dimmed())));
    }
    lines.push(Line::from(dots));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), cells[1]);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, map: &mut ScreenMap) {
    let doc = Document::build(app, palette, area.width);
    let height = usize::from(area.height);
    let max_scroll = doc.max_scroll(height);
    let scroll = app.scroll.min(max_scroll);

    map.body = area;
    map.max_scroll = max_scroll;
    map.visible = doc.intersections(scroll, height);

    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(doc.lines).scroll((offset, 0)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![
        Span::styled(format!(" {} ", app.page.location), palette.pressed()),
        Span::styled(format!(" {} ", app.language.code().to_uppercase()), palette.button()),
    ];
    if let Some(slider) = app.slider.as_ref() {
        let state = if slider.is_playing() { "▶" } else { "⏸" };
        spans.push(Span::styled(format!(" {} ", state), palette.dimmed()));
    }
    spans.push(Span::raw(" │ "));
    for (key, desc) in [
        ("1-3", "lang"),
        ("t", "theme"),
        ("←→", "slide"),
        ("n", "news"),
        ("h", "home"),
        ("⏎", "open"),
        ("esc", "back"),
        ("q", "quit"),
    ] {
        spans.push(Span::styled(key, palette.keybind()));
        spans.push(Span::styled(format!(":{} ", desc), palette.dimmed()));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(palette.status_bar()),
        area,
    );
}
