//! Bridge to the gesture host
//!
//! The controller talks to the host exclusively through the [`Bridge`]
//! trait. [`ProcessBridge`] spawns the real daemon and speaks the JSON-line
//! protocol; [`NullBridge`] stands in for dry runs and tests.

use crate::host::protocol::{decode_event, encode_command, HostCommand, HostEvent};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{debug, info, warn};

/// Host capability surface invoked by the controller
pub trait Bridge {
    fn toggle_capture(&mut self) -> Result<()>;
    fn select_device(&mut self, id: i64) -> Result<()>;
    fn show_help(&mut self) -> Result<()>;
    fn set_volume(&mut self, level: u8) -> Result<()>;
    fn save_settings(&mut self, serialized: &str) -> Result<()>;
}

/// Bridge to a spawned host daemon over stdin/stdout
pub struct ProcessBridge {
    child: Child,
    stdin: ChildStdin,
}

impl ProcessBridge {
    /// Spawn the host command and start the event reader thread
    ///
    /// Events decoded from the daemon's stdout are delivered through
    /// `events`; the receiving end is drained by the main loop.
    pub fn spawn(command_line: &str, events: Sender<HostEvent>) -> Result<Self> {
        let parts: Vec<&str> = command_line.split_whitespace().collect();
        if parts.is_empty() {
            anyhow::bail!("Empty host command");
        }

        let mut child = Command::new(parts[0])
            .args(&parts[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to spawn host process: {}", command_line))?;

        let stdin = child
            .stdin
            .take()
            .context("Host process has no stdin handle")?;
        let stdout = child
            .stdout
            .take()
            .context("Host process has no stdout handle")?;

        thread::spawn(move || read_events(stdout, events));
        info!("host process started: {}", command_line);

        Ok(Self { child, stdin })
    }

    fn send(&mut self, command: &HostCommand) -> Result<()> {
        let line = encode_command(command)?;
        debug!("sending host command: {}", line);
        writeln!(self.stdin, "{}", line).context("Failed to write to host process")?;
        self.stdin.flush().context("Failed to flush host stdin")
    }
}

/// Decode stdout lines into events until the host goes away
fn read_events(stdout: ChildStdout, events: Sender<HostEvent>) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("host stdout closed: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match decode_event(&line) {
            Ok(event) => {
                // Receiver gone means the UI is shutting down
                if events.send(event).is_err() {
                    break;
                }
            }
            Err(e) => warn!("dropping malformed host line: {:#}", e),
        }
    }
    debug!("host event reader finished");
}

impl Bridge for ProcessBridge {
    fn toggle_capture(&mut self) -> Result<()> {
        self.send(&HostCommand::ToggleCapture)
    }

    fn select_device(&mut self, id: i64) -> Result<()> {
        self.send(&HostCommand::SelectDevice { id })
    }

    fn show_help(&mut self) -> Result<()> {
        self.send(&HostCommand::ShowHelp)
    }

    fn set_volume(&mut self, level: u8) -> Result<()> {
        self.send(&HostCommand::SetVolume { level })
    }

    fn save_settings(&mut self, serialized: &str) -> Result<()> {
        self.send(&HostCommand::SaveSettings {
            settings: serialized.to_string(),
        })
    }
}

impl Drop for ProcessBridge {
    fn drop(&mut self) {
        // The daemon also exits when its stdin closes; this covers the rest
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Dry-run bridge: accepts every call, drives nothing
pub struct NullBridge;

impl Bridge for NullBridge {
    fn toggle_capture(&mut self) -> Result<()> {
        info!("dry run: toggle capture");
        Ok(())
    }

    fn select_device(&mut self, id: i64) -> Result<()> {
        info!("dry run: select device {}", id);
        Ok(())
    }

    fn show_help(&mut self) -> Result<()> {
        info!("dry run: show help");
        Ok(())
    }

    fn set_volume(&mut self, level: u8) -> Result<()> {
        info!("dry run: set volume {}", level);
        Ok(())
    }

    fn save_settings(&mut self, serialized: &str) -> Result<()> {
        info!("dry run: save settings {}", serialized);
        Ok(())
    }
}
