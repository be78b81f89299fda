//! Scrollable page body
//!
//! Lays out the page's sections and cards as lines, remembering the line
//! range each fragment occupies. The viewport over those lines yields the
//! visibility report the reveal registry consumes.

use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
};
use textwrap::{wrap, Options as WrapOptions};

use crate::app::App;
use crate::page::{Container, Fragment, FragmentId, FragmentKind, ProgramCard};
use crate::reveal::Intersection;
use crate::ui::theme::Palette;

/// Width of the empty progress bar on program cards
const PROGRESS_WIDTH: usize = 20;

/// Lines occupied by one fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: FragmentId,
    pub start: usize,
    pub height: usize,
}

/// Laid-out page body
#[derive(Debug, Default)]
pub struct Document {
    pub lines: Vec<Line<'static>>,
    pub regions: Vec<Region>,
}

impl Document {
    /// Lay out every container the page carries
    pub fn build(app: &App, palette: &Palette, width: u16) -> Self {
        let mut doc = Self::default();
        let layout = Layout {
            palette,
            width: usize::from(width.max(10)),
            rtl: app.language.is_rtl(),
        };
        let page = &app.page;

        if let Some(container) = page.program_container.as_ref() {
            doc.heading(&layout, page.text("programs-heading"));
            if container.aria_busy {
                doc.push(&layout, Line::from(Span::styled("…", palette.dimmed())));
            }
            doc.section(&layout, container, app, None);
        }

        let mut card_index = 0;
        for container in [page.home_news.as_ref(), page.all_articles.as_ref()]
            .into_iter()
            .flatten()
        {
            doc.heading(&layout, page.text("news-heading"));
            doc.section(&layout, container, app, Some(&mut card_index));
        }

        if let Some(container) = page.article_detail.as_ref() {
            doc.section(&layout, container, app, None);
        }

        if let Some(footer) = page.text("footer") {
            doc.blank();
            doc.push(&layout, Line::from(Span::styled(footer.to_string(), palette.dimmed())));
        }
        doc
    }

    /// Largest useful scroll offset for a viewport of `height` lines
    pub fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    /// Visible fraction of each fragment for the viewport
    /// `[scroll, scroll + height)`
    pub fn intersections(&self, scroll: usize, height: usize) -> Vec<Intersection> {
        let end = scroll + height;
        self.regions
            .iter()
            .filter(|r| r.height > 0)
            .map(|r| {
                let top = r.start.max(scroll);
                let bottom = (r.start + r.height).min(end);
                let visible = bottom.saturating_sub(top);
                Intersection {
                    target: r.id,
                    ratio: visible as f32 / r.height as f32,
                }
            })
            .collect()
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn push(&mut self, layout: &Layout, line: Line<'static>) {
        self.lines.push(layout.align(line));
    }

    fn heading(&mut self, layout: &Layout, text: Option<&str>) {
        if let Some(text) = text {
            if !self.lines.is_empty() {
                self.blank();
            }
            self.push(
                layout,
                Line::from(Span::styled(text.to_uppercase(), layout.palette.title())),
            );
            self.blank();
        }
    }

    fn section(
        &mut self,
        layout: &Layout,
        container: &Container,
        app: &App,
        mut card_index: Option<&mut usize>,
    ) {
        for fragment in &container.fragments {
            let selected = match card_index.as_deref_mut() {
                Some(index) if matches!(fragment.kind, FragmentKind::NewsCard(_)) => {
                    let selected = *index == app.selected_card;
                    *index += 1;
                    selected
                }
                _ => false,
            };
            let pending = app.reveal.is_observed(fragment.id) && fragment.animation.is_none();

            let start = self.lines.len();
            for line in layout.fragment(fragment, selected, pending) {
                self.push(layout, line);
            }
            self.regions.push(Region {
                id: fragment.id,
                start,
                height: self.lines.len() - start,
            });
            self.blank();
        }
    }
}

/// Per-build layout settings
struct Layout<'a> {
    palette: &'a Palette,
    width: usize,
    rtl: bool,
}

impl Layout<'_> {
    fn align(&self, line: Line<'static>) -> Line<'static> {
        if self.rtl {
            line.alignment(Alignment::Right)
        } else {
            line
        }
    }

    fn fragment(&self, fragment: &Fragment, selected: bool, pending: bool) -> Vec<Line<'static>> {
        let p = self.palette;
        let mut lines = match &fragment.kind {
            FragmentKind::Skeleton => {
                let bar = "░".repeat(self.width.min(40));
                vec![
                    Line::from(Span::styled(bar.clone(), p.skeleton())),
                    Line::from(Span::styled(bar.chars().take(24).collect::<String>(), p.skeleton())),
                    Line::from(Span::styled(bar, p.skeleton())),
                ]
            }
            FragmentKind::ProgramCard(card) => self.program_card(card),
            FragmentKind::NewsCard(card) => {
                let title_style = if selected { p.selected() } else { p.heading() };
                let mut lines = vec![
                    Line::from(Span::styled(card.date.clone(), p.dimmed())),
                    Line::from(Span::styled(card.title.clone(), title_style)),
                ];
                lines.extend(self.wrapped(&card.excerpt));
                lines.push(Line::from(Span::styled(card.href.clone(), p.button())));
                lines
            }
            FragmentKind::ArticleDetail(view) => {
                let mut lines = vec![
                    Line::from(Span::styled(view.title.clone(), p.title())),
                    Line::from(Span::styled(view.date.clone(), p.dimmed())),
                    Line::from(Span::styled(view.image.clone(), p.dimmed())),
                ];
                for paragraph in &view.paragraphs {
                    lines.push(Line::default());
                    lines.extend(self.wrapped(paragraph));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!(" {} ", view.donate_label),
                    p.donate(),
                )));
                lines
            }
        };

        if pending {
            for line in &mut lines {
                line.style = p.pending();
                for span in &mut line.spans {
                    span.style = p.pending();
                }
            }
        }
        lines
    }

    fn program_card(&self, card: &ProgramCard) -> Vec<Line<'static>> {
        let p = self.palette;
        let mut lines = vec![Line::from(Span::styled(card.title.clone(), p.heading()))];
        lines.extend(self.wrapped(&card.description));
        let filled = usize::from(card.progress.unwrap_or(0).min(100)) * PROGRESS_WIDTH / 100;
        lines.push(Line::from(vec![
            Span::styled("█".repeat(filled), p.button()),
            Span::styled("─".repeat(PROGRESS_WIDTH - filled), p.border()),
        ]));
        lines.push(Line::from(Span::styled(card.image_url.clone(), p.dimmed())));
        lines
    }

    fn wrapped(&self, text: &str) -> Vec<Line<'static>> {
        wrap_plain(text, self.width, self.palette.text())
    }
}

/// Wrap to terminal display width; blank text takes no lines
pub fn wrap_plain(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    wrap(text, WrapOptions::new(width.max(1)))
        .into_iter()
        .map(|cow| Line::from(Span::styled(cow.into_owned(), style)))
        .collect()
}
