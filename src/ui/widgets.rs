//! Reusable UI widgets
//!
//! Contains the UI components shared between the render pass and input
//! handling:
//! - Centered popup dialogs
//! - The advisory overlay
//! - Modal geometry (also used for the click-outside hit test)
//! - Status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
    Frame,
};

/// Width and height of the settings modal before clamping to the viewport
const SETTINGS_MODAL_WIDTH: u16 = 52;
const SETTINGS_MODAL_HEIGHT: u16 = 12;

/// The settings modal rect for a given viewport
///
/// Input handling hit-tests mouse clicks against this same rect, so the
/// dismissal boundary always matches what is drawn.
pub fn settings_modal_area(area: Rect) -> Rect {
    let width = SETTINGS_MODAL_WIDTH.min(area.width.saturating_sub(4));
    let height = SETTINGS_MODAL_HEIGHT.min(area.height.saturating_sub(2));
    centered_rect(width, height, area)
}

/// Render a centered popup dialog shell and return its inner area
pub fn render_popup_frame(frame: &mut Frame, title: &str, theme: &Theme, popup_area: Rect) -> Rect {
    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.block_style());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    }
}

/// Render the transient advisory overlay
pub fn render_overlay(frame: &mut Frame, text: &str, theme: &Theme, area: Rect) {
    let width = 46.min(area.width.saturating_sub(4));
    let popup_area = centered_rect(width, 5, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.block_style());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let content = Paragraph::new(vec![Line::raw(""), Line::styled(text, theme.overlay())])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(content, inner);
}

/// Render status bar at bottom
pub fn render_status_bar(frame: &mut Frame, left_content: &str, theme: &Theme, area: Rect) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, status_area);

    let hints = Paragraph::new(left_content).style(theme.text_dim());
    frame.render_widget(hints, status_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_settings_modal_fits_viewport() {
        let area = Rect::new(0, 0, 120, 40);
        let modal = settings_modal_area(area);
        assert_eq!(modal.width, SETTINGS_MODAL_WIDTH);
        assert_eq!(modal.height, SETTINGS_MODAL_HEIGHT);
        assert!(modal.x + modal.width <= area.width);
        assert!(modal.y + modal.height <= area.height);

        // Small terminals clamp rather than overflow
        let small = Rect::new(0, 0, 30, 8);
        let modal = settings_modal_area(small);
        assert!(modal.width <= small.width);
        assert!(modal.height <= small.height);
    }
}
