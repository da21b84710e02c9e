//! Core data types for gesturedeck
//!
//! This module defines the shared data structures used by the controller,
//! the host bridge, and the UI.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capture resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// A selectable capture source reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: i64,
    pub name: String,
    pub resolution: Resolution,
}

impl DeviceDescriptor {
    /// Selector label, e.g. "Cam A (640x480)"
    pub fn label(&self) -> String {
        format!(
            "{} ({}x{})",
            self.name, self.resolution.width, self.resolution.height
        )
    }
}

/// Classification of a host advisory message
///
/// Hosts tag advisories explicitly; [`AdvisoryKind::classify`] covers hosts
/// that still send untagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    GestureDetected,
    Error,
    DeviceMissing,
    Info,
}

impl AdvisoryKind {
    /// Keyword fallback for untagged advisory messages
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("detected") {
            AdvisoryKind::GestureDetected
        } else if lower.contains("error") {
            AdvisoryKind::Error
        } else if lower.contains("not found") {
            AdvisoryKind::DeviceMissing
        } else {
            AdvisoryKind::Info
        }
    }

    /// Whether this kind flashes the overlay when it arrives
    pub fn triggers_overlay(self) -> bool {
        !matches!(self, AdvisoryKind::Info)
    }
}

/// The six capture settings handed to the host on save
///
/// A draft of these lives in the settings panel while it is open; saving
/// serializes the draft to JSON and hands the blob to the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub resolution: String,
    pub fps_limit: u32,
    pub sensitivity: u32,
    pub confidence_threshold: u32,
    pub image_quality: String,
    pub image_filter: String,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            resolution: "1280x720".to_string(),
            fps_limit: 30,
            sensitivity: 7,
            confidence_threshold: 70,
            image_quality: "high".to_string(),
            image_filter: "none".to_string(),
        }
    }
}

// Presets cycled by the settings panel

pub const RESOLUTION_PRESETS: &[&str] = &["640x480", "1280x720", "1920x1080"];
pub const FPS_PRESETS: &[u32] = &[15, 30, 60];
pub const QUALITY_PRESETS: &[&str] = &["low", "medium", "high"];
pub const FILTER_PRESETS: &[&str] = &["none", "grayscale", "sepia", "negative"];

/// Format elapsed session time as zero-padded HH:MM:SS
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(59)), "00:00:59");
        assert_eq!(format_uptime(Duration::from_secs(3661)), "01:01:01");
        assert_eq!(format_uptime(Duration::from_millis(3_661_000)), "01:01:01");
        assert_eq!(format_uptime(Duration::from_secs(36_000)), "10:00:00");
    }

    #[test]
    fn test_device_label() {
        let device = DeviceDescriptor {
            id: 1,
            name: "Cam A".into(),
            resolution: Resolution {
                width: 640,
                height: 480,
            },
        };
        assert_eq!(device.label(), "Cam A (640x480)");
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(
            AdvisoryKind::classify("Clap gesture detected"),
            AdvisoryKind::GestureDetected
        );
        assert_eq!(
            AdvisoryKind::classify("Capture error: device busy"),
            AdvisoryKind::Error
        );
        assert_eq!(
            AdvisoryKind::classify("Capture device not found"),
            AdvisoryKind::DeviceMissing
        );
        assert_eq!(AdvisoryKind::classify("Welcome!"), AdvisoryKind::Info);
    }

    #[test]
    fn test_only_info_skips_overlay() {
        assert!(AdvisoryKind::GestureDetected.triggers_overlay());
        assert!(AdvisoryKind::Error.triggers_overlay());
        assert!(AdvisoryKind::DeviceMissing.triggers_overlay());
        assert!(!AdvisoryKind::Info.triggers_overlay());
    }

    #[test]
    fn test_capture_settings_roundtrip() {
        let settings = CaptureSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        for field in [
            "resolution",
            "fps_limit",
            "sensitivity",
            "confidence_threshold",
            "image_quality",
            "image_filter",
        ] {
            assert!(json.contains(field), "missing field: {}", field);
        }
        let parsed: CaptureSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
