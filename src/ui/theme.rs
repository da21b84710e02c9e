//! Theme definitions for gesturedeck
//!
//! Provides three built-in themes: Dark, Light, and Terminal.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent
    pub accent: Color,

    // Status colors
    pub active: Color,
    pub inactive: Color,
    pub warning: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Volume gauge fill
    pub gauge: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::Terminal => Self::terminal(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(26, 27, 38),        // #1a1b26
            fg: Color::Rgb(192, 202, 245),     // #c0caf5
            fg_dim: Color::Rgb(86, 95, 137),   // #565f89

            accent: Color::Rgb(122, 162, 247), // #7aa2f7

            active: Color::Rgb(158, 206, 106),   // #9ece6a
            inactive: Color::Rgb(247, 118, 142), // #f7768e
            warning: Color::Rgb(224, 175, 104),  // #e0af68

            border: Color::Rgb(59, 66, 97),          // #3b4261
            border_focused: Color::Rgb(122, 162, 247),
            selection_bg: Color::Rgb(59, 66, 97),
            selection_fg: Color::Rgb(192, 202, 245),

            gauge: Color::Rgb(122, 162, 247),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(239, 241, 245),    // #eff1f5
            fg: Color::Rgb(76, 79, 105),      // #4c4f69
            fg_dim: Color::Rgb(140, 143, 161), // #8c8fa1

            accent: Color::Rgb(30, 102, 245), // #1e66f5

            active: Color::Rgb(64, 160, 43),    // #40a02b
            inactive: Color::Rgb(210, 15, 57),  // #d20f39
            warning: Color::Rgb(223, 142, 29),  // #df8e1d

            border: Color::Rgb(188, 192, 204),        // #bcc0cc
            border_focused: Color::Rgb(30, 102, 245),
            selection_bg: Color::Rgb(204, 208, 218),
            selection_fg: Color::Rgb(76, 79, 105),

            gauge: Color::Rgb(30, 102, 245),
        }
    }

    /// Terminal theme (uses terminal colors)
    pub fn terminal() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Cyan,

            active: Color::Green,
            inactive: Color::Red,
            warning: Color::Yellow,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            gauge: Color::Cyan,
        }
    }

    // Style helpers for common UI patterns

    /// Block background style
    pub fn block_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Capture-active status style
    pub fn status_active(&self) -> Style {
        Style::default()
            .fg(self.active)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Capture-inactive status style
    pub fn status_inactive(&self) -> Style {
        Style::default()
            .fg(self.inactive)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Overlay advisory style
    pub fn overlay(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Volume gauge style
    pub fn gauge(&self) -> Style {
        Style::default().fg(self.gauge).bg(self.bg)
    }
}
