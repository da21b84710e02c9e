//! Controller state and event handling
//!
//! This is the core of gesturedeck, managing:
//! - Session state (counters, uptime, overlay, settings panel)
//! - Key and mouse input, forwarded to the host bridge
//! - Host-pushed state updates (device list, capture status, advisories)

use crate::config::Config;
use crate::host::{Bridge, HostEvent};
use crate::types::{
    format_uptime, AdvisoryKind, CaptureSettings, DeviceDescriptor, FILTER_PRESETS, FPS_PRESETS,
    QUALITY_PRESETS, RESOLUTION_PRESETS,
};
use crate::ui::{widgets, Theme};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// How long a triggered advisory keeps the overlay up
const ADVISORY_FLASH: Duration = Duration::from_millis(3000);
/// How long a screenshot notification keeps the overlay up
const SCREENSHOT_FLASH: Duration = Duration::from_millis(2000);

const VOLUME_STEP: i16 = 5;

/// Transient message surface drawn over the main view
///
/// Visibility is the union of two sources: standby (capture inactive) and a
/// single owned flash deadline. Each new flash replaces the pending
/// deadline, so a rapid second advisory is never hidden early by the first
/// one's timer.
pub struct Overlay {
    text: String,
    standby: bool,
    flash_until: Option<Instant>,
}

impl Overlay {
    fn new() -> Self {
        Self {
            text: String::new(),
            standby: false,
            flash_until: None,
        }
    }

    /// Replace the overlay text without changing visibility
    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Flash visible until `now + duration`, superseding any pending hide
    fn flash(&mut self, now: Instant, duration: Duration) {
        self.flash_until = Some(now + duration);
    }

    fn set_standby(&mut self, standby: bool) {
        self.standby = standby;
    }

    /// Clear an expired flash deadline
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.flash_until {
            if now >= deadline {
                self.flash_until = None;
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.standby || self.flash_until.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Settings modal state; the draft only lives while the panel is open
pub struct SettingsPanel {
    pub draft: CaptureSettings,
    pub cursor: usize,
}

/// Number of editable fields in the settings panel
pub const SETTINGS_FIELD_COUNT: usize = 6;

impl SettingsPanel {
    fn new(draft: CaptureSettings) -> Self {
        Self { draft, cursor: 0 }
    }

    /// Step the field under the cursor forwards or backwards
    fn cycle(&mut self, dir: isize) {
        match self.cursor {
            0 => self.draft.resolution = cycle_preset(&self.draft.resolution, RESOLUTION_PRESETS, dir),
            1 => self.draft.fps_limit = cycle_numeric(self.draft.fps_limit, FPS_PRESETS, dir),
            2 => self.draft.sensitivity = step_clamped(self.draft.sensitivity, dir, 1, 1, 10),
            3 => {
                self.draft.confidence_threshold =
                    step_clamped(self.draft.confidence_threshold, dir, 5, 0, 100)
            }
            4 => self.draft.image_quality = cycle_preset(&self.draft.image_quality, QUALITY_PRESETS, dir),
            5 => self.draft.image_filter = cycle_preset(&self.draft.image_filter, FILTER_PRESETS, dir),
            _ => {}
        }
    }
}

fn cycle_preset(current: &str, presets: &[&str], dir: isize) -> String {
    let idx = presets.iter().position(|p| *p == current).unwrap_or(0) as isize;
    let len = presets.len() as isize;
    presets[(idx + dir).rem_euclid(len) as usize].to_string()
}

fn cycle_numeric(current: u32, presets: &[u32], dir: isize) -> u32 {
    let idx = presets.iter().position(|p| *p == current).unwrap_or(0) as isize;
    let len = presets.len() as isize;
    presets[(idx + dir).rem_euclid(len) as usize]
}

fn step_clamped(current: u32, dir: isize, step: u32, min: u32, max: u32) -> u32 {
    if dir > 0 {
        (current + step).min(max)
    } else {
        current.saturating_sub(step).max(min)
    }
}

/// Main controller state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    bridge: Box<dyn Bridge>,

    // Session counters
    pub gesture_count: u64,
    pub screenshot_count: u64,
    start_time: Instant,
    pub started_at: DateTime<Local>,

    // Device selector
    pub devices: Vec<DeviceDescriptor>,
    pub selected_device: Option<i64>,
    pub device_cursor: usize,

    // Host-pushed capture state
    pub capture_active: bool,

    // Volume slider (optimistic local echo)
    pub volume: u8,

    pub overlay: Overlay,
    pub settings_panel: Option<SettingsPanel>,
}

impl App {
    /// Create a new App instance around an injected bridge
    pub fn new(config: Config, bridge: Box<dyn Bridge>) -> Self {
        let theme = Theme::from_name(config.theme);
        let volume = config.default_volume.min(100);

        Self {
            should_quit: false,
            theme,
            bridge,

            gesture_count: 0,
            screenshot_count: 0,
            start_time: Instant::now(),
            started_at: Local::now(),

            devices: Vec::new(),
            selected_device: None,
            device_cursor: 0,

            capture_active: false,

            volume,

            overlay: Overlay::new(),
            settings_panel: None,

            config,
        }
    }

    /// Elapsed session time, re-rendered every frame
    pub fn uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self, now: Instant) {
        self.overlay.tick(now);
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.settings_panel.is_some() {
            self.handle_settings_key(key)
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_capture()?,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.device_cursor + 1 < self.devices.len() {
                    self.device_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.device_cursor = self.device_cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.select_device()?,
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Char('?') => self.bridge.show_help()?,
            KeyCode::Left => self.adjust_volume(-VOLUME_STEP)?,
            KeyCode::Right => self.adjust_volume(VOLUME_STEP)?,
            _ => {}
        }
        Ok(())
    }

    /// Toggle capture on the host
    ///
    /// Without a selected device this never reaches the bridge: the user is
    /// guided towards the settings panel instead. The active/inactive state
    /// itself only changes when the host pushes a status update.
    fn toggle_capture(&mut self) -> Result<()> {
        if self.selected_device.is_none() {
            self.update_advisory(
                Some(AdvisoryKind::Info),
                "Select a capture device first".to_string(),
            );
            self.open_settings();
            return Ok(());
        }
        self.bridge.toggle_capture()
    }

    /// Forward the cursor's device id; no-op while the list is empty
    fn select_device(&mut self) -> Result<()> {
        let Some(device) = self.devices.get(self.device_cursor) else {
            return Ok(());
        };
        let id = device.id;
        self.selected_device = Some(id);
        self.bridge.select_device(id)
    }

    fn open_settings(&mut self) {
        self.settings_panel = Some(SettingsPanel::new(self.config.capture.clone()));
    }

    /// Move the slider and forward the new value on every step
    fn adjust_volume(&mut self, delta: i16) -> Result<()> {
        let level = (self.volume as i16 + delta).clamp(0, 100) as u8;
        self.volume = level; // immediate local echo, no confirmation wait
        self.bridge.set_volume(level)
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.settings_panel = None,
            KeyCode::Enter => self.save_settings()?,
            _ => {
                if let Some(panel) = self.settings_panel.as_mut() {
                    match key.code {
                        KeyCode::Char('j') | KeyCode::Down => {
                            if panel.cursor + 1 < SETTINGS_FIELD_COUNT {
                                panel.cursor += 1;
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            panel.cursor = panel.cursor.saturating_sub(1);
                        }
                        KeyCode::Char('h') | KeyCode::Left => panel.cycle(-1),
                        KeyCode::Char('l') | KeyCode::Right => panel.cycle(1),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize the draft, hand it to the host, close the panel
    ///
    /// No validation and no acknowledgement wait; the panel closes
    /// unconditionally.
    fn save_settings(&mut self) -> Result<()> {
        let Some(panel) = self.settings_panel.take() else {
            return Ok(());
        };
        let blob =
            serde_json::to_string(&panel.draft).context("Failed to serialize capture settings")?;
        self.bridge.save_settings(&blob)
    }

    /// Close the settings panel when a click lands outside the modal bounds
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if self.settings_panel.is_none() {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let modal = widgets::settings_modal_area(area);
        if !modal.contains(Position::new(mouse.column, mouse.row)) {
            self.settings_panel = None;
        }
    }

    // === HOST EVENTS ===

    /// Apply one pushed host event
    pub fn apply_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::DeviceList { devices } => self.update_device_list(devices),
            HostEvent::CaptureStatus { active } => self.update_capture_status(active),
            HostEvent::Advisory { message, kind } => self.update_advisory(kind, message),
            HostEvent::Screenshot => self.record_screenshot(),
        }
    }

    /// Replace the device list wholesale, keeping the previous selection if
    /// its id survives
    fn update_device_list(&mut self, devices: Vec<DeviceDescriptor>) {
        self.selected_device = self
            .selected_device
            .filter(|id| devices.iter().any(|d| d.id == *id));
        self.device_cursor = self.device_cursor.min(devices.len().saturating_sub(1));
        self.devices = devices;

        if self.devices.is_empty() {
            self.update_advisory(
                Some(AdvisoryKind::DeviceMissing),
                "No capture device found! Check the connection.".to_string(),
            );
        } else {
            self.update_advisory(
                Some(AdvisoryKind::Info),
                format!("{} capture device(s) found", self.devices.len()),
            );
        }
    }

    /// Reflect host-side capture state; the standby overlay shows while
    /// capture is inactive
    fn update_capture_status(&mut self, active: bool) {
        self.capture_active = active;
        self.overlay.set_standby(!active);
    }

    /// Update the advisory surface, flashing the overlay and counting
    /// detections for trigger kinds
    fn update_advisory(&mut self, kind: Option<AdvisoryKind>, message: String) {
        let kind = kind.unwrap_or_else(|| AdvisoryKind::classify(&message));
        self.overlay.set_text(message);

        if kind.triggers_overlay() {
            self.overlay.flash(Instant::now(), ADVISORY_FLASH);
        }
        if kind == AdvisoryKind::GestureDetected {
            self.gesture_count += 1;
        }
    }

    /// Count a host-side screenshot and flash the overlay as-is
    fn record_screenshot(&mut self) {
        self.screenshot_count += 1;
        self.overlay.flash(Instant::now(), SCREENSHOT_FLASH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Bridge substitute that records every call
    struct RecordingBridge(Rc<RefCell<Vec<String>>>);

    impl Bridge for RecordingBridge {
        fn toggle_capture(&mut self) -> Result<()> {
            self.0.borrow_mut().push("toggle_capture".into());
            Ok(())
        }

        fn select_device(&mut self, id: i64) -> Result<()> {
            self.0.borrow_mut().push(format!("select_device {}", id));
            Ok(())
        }

        fn show_help(&mut self) -> Result<()> {
            self.0.borrow_mut().push("show_help".into());
            Ok(())
        }

        fn set_volume(&mut self, level: u8) -> Result<()> {
            self.0.borrow_mut().push(format!("set_volume {}", level));
            Ok(())
        }

        fn save_settings(&mut self, serialized: &str) -> Result<()> {
            self.0
                .borrow_mut()
                .push(format!("save_settings {}", serialized));
            Ok(())
        }
    }

    fn test_app() -> (App, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let app = App::new(Config::default(), Box::new(RecordingBridge(calls.clone())));
        (app, calls)
    }

    fn two_cams() -> Vec<DeviceDescriptor> {
        vec![
            DeviceDescriptor {
                id: 1,
                name: "Cam A".into(),
                resolution: Resolution {
                    width: 640,
                    height: 480,
                },
            },
            DeviceDescriptor {
                id: 2,
                name: "Cam B".into(),
                resolution: Resolution {
                    width: 1280,
                    height: 720,
                },
            },
        ]
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_toggle_without_device_never_reaches_bridge() {
        let (mut app, calls) = test_app();

        app.handle_key(press(KeyCode::Char(' '))).unwrap();

        assert!(calls.borrow().is_empty());
        assert!(app.settings_panel.is_some());
        assert!(app.overlay.text().contains("Select a capture device"));
    }

    #[test]
    fn test_toggle_with_device_calls_bridge_once() {
        let (mut app, calls) = test_app();
        app.apply_host_event(HostEvent::DeviceList {
            devices: two_cams(),
        });
        app.handle_key(press(KeyCode::Enter)).unwrap(); // select Cam A
        calls.borrow_mut().clear();

        app.handle_key(press(KeyCode::Char(' '))).unwrap();

        assert_eq!(*calls.borrow(), vec!["toggle_capture".to_string()]);
        assert!(!app.capture_active); // only the host flips this
    }

    #[test]
    fn test_select_device_forwards_id() {
        let (mut app, calls) = test_app();
        app.apply_host_event(HostEvent::DeviceList {
            devices: two_cams(),
        });

        app.handle_key(press(KeyCode::Char('j'))).unwrap();
        app.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(app.selected_device, Some(2));
        assert!(calls.borrow().contains(&"select_device 2".to_string()));
    }

    #[test]
    fn test_select_with_empty_list_is_noop() {
        let (mut app, calls) = test_app();

        app.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(app.selected_device, None);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_device_list_preserves_surviving_selection() {
        let (mut app, _calls) = test_app();
        app.apply_host_event(HostEvent::DeviceList {
            devices: two_cams(),
        });
        app.selected_device = Some(2);

        app.apply_host_event(HostEvent::DeviceList {
            devices: two_cams(),
        });

        assert_eq!(app.selected_device, Some(2));
        assert!(app.overlay.text().contains("2 capture device(s) found"));
    }

    #[test]
    fn test_empty_device_list_resets_selection() {
        let (mut app, _calls) = test_app();
        app.apply_host_event(HostEvent::DeviceList {
            devices: two_cams(),
        });
        app.selected_device = Some(2);

        app.apply_host_event(HostEvent::DeviceList { devices: vec![] });

        assert_eq!(app.selected_device, None);
        assert!(app.devices.is_empty());
        assert!(app.overlay.text().contains("No capture device found"));
        assert!(app.overlay.is_visible());
    }

    #[test]
    fn test_gesture_advisory_increments_counter() {
        let (mut app, _calls) = test_app();

        let advisory = HostEvent::Advisory {
            message: "Clap gesture detected".into(),
            kind: Some(AdvisoryKind::GestureDetected),
        };
        app.apply_host_event(advisory.clone());
        assert_eq!(app.gesture_count, 1);

        app.apply_host_event(advisory);
        assert_eq!(app.gesture_count, 2);
        assert!(app.overlay.is_visible());
    }

    #[test]
    fn test_untagged_advisory_classified_by_keyword() {
        let (mut app, _calls) = test_app();

        app.apply_host_event(HostEvent::Advisory {
            message: "Open palm detected".into(),
            kind: None,
        });

        assert_eq!(app.gesture_count, 1);
    }

    #[test]
    fn test_info_advisory_updates_text_only() {
        let (mut app, _calls) = test_app();

        app.apply_host_event(HostEvent::Advisory {
            message: "Welcome!".into(),
            kind: None,
        });

        assert_eq!(app.overlay.text(), "Welcome!");
        assert!(!app.overlay.is_visible());
        assert_eq!(app.gesture_count, 0);
        assert_eq!(app.screenshot_count, 0);
    }

    #[test]
    fn test_screenshots_count_monotonically() {
        let (mut app, _calls) = test_app();
        assert_eq!(app.screenshot_count, 0);

        for expected in 1..=3 {
            app.apply_host_event(HostEvent::Screenshot);
            assert_eq!(app.screenshot_count, expected);
        }
        assert!(app.overlay.is_visible());
    }

    #[test]
    fn test_capture_status_drives_standby_overlay() {
        let (mut app, _calls) = test_app();

        app.apply_host_event(HostEvent::CaptureStatus { active: false });
        assert!(!app.capture_active);
        assert!(app.overlay.is_visible());

        app.apply_host_event(HostEvent::CaptureStatus { active: true });
        assert!(app.capture_active);
        assert!(!app.overlay.is_visible());
    }

    #[test]
    fn test_volume_steps_and_echoes() {
        let (mut app, calls) = test_app();
        assert_eq!(app.volume, 50);

        app.handle_key(press(KeyCode::Right)).unwrap();
        assert_eq!(app.volume, 55);
        assert_eq!(*calls.borrow(), vec!["set_volume 55".to_string()]);

        // Clamped at the top, still forwarded per input event
        for _ in 0..20 {
            app.handle_key(press(KeyCode::Right)).unwrap();
        }
        assert_eq!(app.volume, 100);
        assert_eq!(calls.borrow().len(), 21);
    }

    #[test]
    fn test_save_settings_hands_blob_and_closes_panel() {
        let (mut app, calls) = test_app();
        app.handle_key(press(KeyCode::Char('s'))).unwrap();
        assert!(app.settings_panel.is_some());

        // Cycle the resolution once, then save
        app.handle_key(press(KeyCode::Char('l'))).unwrap();
        app.handle_key(press(KeyCode::Enter)).unwrap();

        assert!(app.settings_panel.is_none());
        let calls = calls.borrow();
        let saved = calls
            .iter()
            .find(|c| c.starts_with("save_settings "))
            .expect("no save_settings call");
        let blob = saved.trim_start_matches("save_settings ");
        let parsed: CaptureSettings = serde_json::from_str(blob).unwrap();
        assert_eq!(parsed.resolution, "1920x1080");
        assert_eq!(parsed.fps_limit, 30);
    }

    #[test]
    fn test_settings_field_cycling() {
        let mut panel = SettingsPanel::new(CaptureSettings::default());

        panel.cursor = 2; // sensitivity, clamped to 1..=10
        panel.cycle(1);
        assert_eq!(panel.draft.sensitivity, 8);
        for _ in 0..20 {
            panel.cycle(1);
        }
        assert_eq!(panel.draft.sensitivity, 10);
        for _ in 0..20 {
            panel.cycle(-1);
        }
        assert_eq!(panel.draft.sensitivity, 1);

        panel.cursor = 0; // resolution presets wrap around
        panel.cycle(-1);
        assert_eq!(panel.draft.resolution, "640x480");
    }

    #[test]
    fn test_click_outside_modal_closes_panel() {
        let (mut app, _calls) = test_app();
        app.handle_key(press(KeyCode::Char('s'))).unwrap();

        let area = Rect::new(0, 0, 120, 40);
        let modal = widgets::settings_modal_area(area);

        // A click inside the modal keeps it open
        let inside = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: modal.x + 1,
            row: modal.y + 1,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        app.handle_mouse(inside, area);
        assert!(app.settings_panel.is_some());

        // A click on the surrounding backdrop dismisses it
        let outside = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        app.handle_mouse(outside, area);
        assert!(app.settings_panel.is_none());
    }

    #[test]
    fn test_overlay_flash_superseded_not_hidden_early() {
        let mut overlay = Overlay::new();
        let start = Instant::now();

        overlay.flash(start, Duration::from_millis(3000));
        overlay.flash(start + Duration::from_millis(2000), Duration::from_millis(3000));

        // The first deadline has passed; the replacement keeps it visible
        overlay.tick(start + Duration::from_millis(3500));
        assert!(overlay.is_visible());

        overlay.tick(start + Duration::from_millis(5500));
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_help_key_reaches_bridge() {
        let (mut app, calls) = test_app();
        app.handle_key(press(KeyCode::Char('?'))).unwrap();
        assert_eq!(*calls.borrow(), vec!["show_help".to_string()]);
    }
}
