//! Main rendering module
//!
//! Handles rendering the complete UI:
//! - Header with capture status and session clock
//! - Device selector and session panels
//! - Settings modal and advisory overlay
//! - Status bar with key hints

use crate::app::{App, SettingsPanel};
use crate::ui::{widgets, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_content(frame, app, layout[1]);
    render_status_bar(frame, app, layout[2]);

    // Overlay first; an open settings modal draws on top of it
    if app.overlay.is_visible() {
        widgets::render_overlay(frame, app.overlay.text(), &app.theme, area);
    }

    if let Some(panel) = &app.settings_panel {
        render_settings_panel(frame, &app.theme, panel, area);
    }
}

/// Render header with capture status and session clock
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(" gesturedeck ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    // Capture status, pushed by the host
    let (status, style) = if app.capture_active {
        ("● Capture Active", theme.status_active())
    } else {
        ("○ Capture Off", theme.status_inactive())
    };

    let status_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let halves =
        Layout::horizontal([Constraint::Min(10), Constraint::Length(34)]).split(status_area);

    frame.render_widget(Paragraph::new(Span::styled(status, style)), halves[0]);

    // Session clock on the right
    let clock = format!(
        "started {} · up {}",
        app.started_at.format("%H:%M:%S"),
        app.uptime()
    );
    let clock_widget = Paragraph::new(clock)
        .style(theme.text_dim())
        .alignment(Alignment::Right);
    frame.render_widget(clock_widget, halves[1]);
}

/// Render the device selector and session panels side by side
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let panels =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(area);

    render_device_panel(frame, app, panels[0]);
    render_session_panel(frame, app, panels[1]);
}

/// Device selector: one row per host-reported capture source
fn render_device_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Capture Devices ({}) ", app.devices.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.devices.is_empty() {
        let empty_msg = Paragraph::new("No capture device found")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .devices
        .iter()
        .enumerate()
        .map(|(i, device)| {
            let marker = if app.selected_device == Some(device.id) {
                "▸ "
            } else {
                "  "
            };

            let style = if i == app.device_cursor {
                theme.selected()
            } else {
                theme.text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker.to_string(), theme.title()),
                Span::styled(device.label(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// Session panel: counters, uptime, volume, last advisory
fn render_session_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Session ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(4), // Counters
        Constraint::Length(3), // Volume gauge
        Constraint::Min(1),    // Advisory text
    ])
    .split(inner);

    let stat = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), theme.text_dim()),
            Span::styled(value, theme.text()),
        ])
    };

    let stats = Paragraph::new(vec![
        stat("Gestures", app.gesture_count.to_string()),
        stat("Screenshots", app.screenshot_count.to_string()),
        stat("Uptime", app.uptime()),
    ]);
    frame.render_widget(stats, rows[0]);

    // Volume echoes locally on every keypress, no host confirmation
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Volume ")
                .title_style(theme.text_dim())
                .borders(Borders::ALL)
                .border_style(theme.border())
                .style(theme.block_style()),
        )
        .gauge_style(theme.gauge())
        .percent(u16::from(app.volume))
        .label(format!("{}%", app.volume));
    frame.render_widget(gauge, rows[1]);

    let advisory = Paragraph::new(Line::from(vec![
        Span::styled("Advisory: ", theme.text_dim()),
        Span::styled(app.overlay.text(), theme.text()),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(advisory, rows[2]);
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.settings_panel.is_some() {
        "[j/k] Field  [h/l] Change  [Enter] Save  [Esc] Close".to_string()
    } else {
        let toggle = if app.capture_active {
            "[Space] Stop Capture"
        } else {
            "[Space] Start Capture"
        };
        format!(
            "{}  [j/k] Devices  [Enter] Select  [←/→] Volume  [s] Settings  [?] Help  [q] Quit",
            toggle
        )
    };

    widgets::render_status_bar(frame, &hints, &app.theme, area);
}

/// Settings modal: six capture fields cycled in place
fn render_settings_panel(frame: &mut Frame, theme: &Theme, panel: &SettingsPanel, area: Rect) {
    let modal_area = widgets::settings_modal_area(area);
    let inner = widgets::render_popup_frame(frame, "Capture Settings", theme, modal_area);

    let fields = [
        ("Resolution", panel.draft.resolution.clone()),
        ("FPS limit", panel.draft.fps_limit.to_string()),
        ("Sensitivity", panel.draft.sensitivity.to_string()),
        (
            "Confidence threshold",
            panel.draft.confidence_threshold.to_string(),
        ),
        ("Image quality", panel.draft.image_quality.clone()),
        ("Image filter", panel.draft.image_filter.clone()),
    ];

    let items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == panel.cursor {
                theme.selected()
            } else {
                theme.text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", label), style),
                Span::styled(format!("◂ {} ▸", value), theme.title()),
            ]))
        })
        .collect();

    let list_area = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width,
        height: inner.height.saturating_sub(2),
    };
    frame.render_widget(List::new(items), list_area);

    let hint_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(1),
        width: inner.width,
        height: 1,
    };
    let hint = Paragraph::new("[Enter] Save · [Esc] Close")
        .style(theme.text_dim())
        .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
