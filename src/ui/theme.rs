//! Light and dark palettes for the site viewer
//!
//! The site's teal/orange brand colors on a light or dark surface, picked
//! from the page's dark-mode flag on every frame.

use ratatui::style::{Color, Modifier, Style};

use crate::models::Theme;

/// Color palette for one visual mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    /// Cards and header bar
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    /// Brand teal
    pub primary: Color,
    /// Donate orange
    pub accent: Color,
    pub border: Color,
    /// Skeleton placeholder blocks
    pub skeleton: Color,
}

impl Palette {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(0xf7, 0xf9, 0xfa),
        surface: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0x1f, 0x29, 0x33),
        muted: Color::Rgb(0x5f, 0x6b, 0x76),
        primary: Color::Rgb(0x00, 0x6d, 0x77),
        accent: Color::Rgb(0xb3, 0x4a, 0x00),
        border: Color::Rgb(0xc9, 0xd3, 0xd9),
        skeleton: Color::Rgb(0xe2, 0xe8, 0xec),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(0x12, 0x16, 0x1a),
        surface: Color::Rgb(0x1c, 0x22, 0x28),
        text: Color::Rgb(0xe6, 0xea, 0xed),
        muted: Color::Rgb(0x9a, 0xa5, 0xae),
        primary: Color::Rgb(0x4f, 0xd1, 0xc5),
        accent: Color::Rgb(0xff, 0xa0, 0x4d),
        border: Color::Rgb(0x33, 0x3d, 0x47),
        skeleton: Color::Rgb(0x2a, 0x32, 0x3a),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Card heading
    pub fn heading(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Selected news card
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Pressed language button
    pub fn pressed(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn donate(&self) -> Style {
        Style::default()
            .fg(self.surface)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn skeleton(&self) -> Style {
        Style::default().fg(self.skeleton)
    }

    /// Card still waiting for its entrance animation
    pub fn pending(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::LIGHT
    }
}
