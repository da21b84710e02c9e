//! Wire codec for the host daemon link
//!
//! One JSON value per line in each direction: commands are written to the
//! host's stdin, state updates are read from its stdout.

use crate::types::{AdvisoryKind, DeviceDescriptor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Command sent to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    ToggleCapture,
    SelectDevice { id: i64 },
    ShowHelp,
    SetVolume { level: u8 },
    /// `settings` carries the serialized capture-settings blob as-is;
    /// the host owns its interpretation and persistence
    SaveSettings { settings: String },
}

/// State update pushed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Full replacement of the selectable device list; an absent or empty
    /// array means no device is available
    DeviceList {
        #[serde(default)]
        devices: Vec<DeviceDescriptor>,
    },
    CaptureStatus {
        active: bool,
    },
    /// Transient message; `kind` is optional for hosts that predate tagging
    Advisory {
        message: String,
        #[serde(default)]
        kind: Option<AdvisoryKind>,
    },
    Screenshot,
}

/// Encode a command as a single JSON line (without the trailing newline)
pub fn encode_command(command: &HostCommand) -> Result<String> {
    serde_json::to_string(command).context("Failed to encode host command")
}

/// Decode one line of host stdout
pub fn decode_event(line: &str) -> Result<HostEvent> {
    serde_json::from_str(line.trim())
        .with_context(|| format!("Unrecognized host event: {}", line))
}
