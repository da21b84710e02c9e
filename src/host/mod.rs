//! Host interaction layer
//!
//! This module handles all interaction with the gesture host daemon:
//! - The `Bridge` capability trait the controller calls into
//! - Process-backed and dry-run bridge implementations
//! - The JSON-line wire protocol (commands out, events in)

pub mod bridge;
pub mod protocol;

pub use bridge::{Bridge, NullBridge, ProcessBridge};
pub use protocol::{HostCommand, HostEvent};
