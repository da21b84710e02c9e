//! gesturedeck - Gesture Host Control Panel
//!
//! A TUI control panel for a gesture-recognition capture host.
//!
//! Features:
//! - Start/stop capture and pick the capture device
//! - Mirror host advisories plus gesture and screenshot counters
//! - Volume forwarding with immediate local echo
//! - Capture settings editor handed off to the host on save
//!
//! Usage: gesturedeck [--host <command>] [--dry-run]

mod app;
mod config;
mod host;
mod logging;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use host::{Bridge, HostEvent, NullBridge, ProcessBridge};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("gesturedeck {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let host_override = host_arg(&args);

    // Run the application
    let result = run_app(dry_run, host_override);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Extract the value following --host, if any
fn host_arg(args: &[String]) -> Option<String> {
    let idx = args.iter().position(|a| a == "--host")?;
    args.get(idx + 1).cloned()
}

fn print_help() {
    println!(
        r#"gesturedeck - Gesture Host Control Panel

USAGE:
    gesturedeck [OPTIONS]

OPTIONS:
        --host <COMMAND>    Host daemon command (overrides config)
    -n, --dry-run           Run without a host process (calls are logged only)
    -h, --help              Print help information
    -v, --version           Print version information

KEYBINDINGS:
    Space            Start/stop capture
    j/k              Navigate devices
    Enter            Select device
    Left/Right       Adjust volume
    s                Open capture settings
    ?                Show host help
    q                Quit

SETTINGS PANEL:
    j/k              Choose field
    h/l              Change value
    Enter            Save (handed to the host)
    Esc              Close (a click outside the panel also closes it)

CONFIG:
    ~/.config/gesturedeck/config.toml
"#
    );
}

fn run_app(dry_run: bool, host_override: Option<String>) -> Result<()> {
    // Load configuration
    let config = config::Config::load().context("Failed to load configuration")?;

    logging::init().context("Failed to initialize logging")?;

    // Host events flow through this channel into the main loop
    let (events_tx, events_rx) = mpsc::channel();

    let bridge: Box<dyn Bridge> = if dry_run {
        drop(events_tx);
        Box::new(NullBridge)
    } else {
        let command = host_override.unwrap_or_else(|| config.host.command.clone());
        Box::new(
            ProcessBridge::spawn(&command, events_tx).context("Failed to start the gesture host")?,
        )
    };

    let mut app = App::new(config, bridge);

    if dry_run {
        tracing::info!("running in dry-run mode (no host process)");
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app, &events_rx);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    host_events: &Receiver<HostEvent>,
) -> Result<()> {
    let mut view_area = Rect::default();

    loop {
        // Render UI
        terminal.draw(|frame| {
            view_area = frame.area();
            ui::render(frame, app);
        })?;

        app.tick(Instant::now());

        // Apply host pushes queued since the last frame
        while let Ok(host_event) = host_events.try_recv() {
            app.apply_host_event(host_event);
        }

        // Poll with timeout so the uptime display keeps moving
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Mouse(mouse) => app.handle_mouse(mouse, view_area),
                _ => {}
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
