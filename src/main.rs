// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Rating Filters TUI.
//!
//! A terminal-based music library browser with rating filters.
//!
//! Every page (the library and each playlist) can be narrowed to all tracks,
//! favourites (tracks rated at or above a configurable number of stars) or
//! unrated tracks. Each page remembers its own filter, and filtered views are
//! cached until a rating, the page contents or the favourites threshold
//! change.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   rating filters.
//! * A **Background Worker** handles database queries and library scans via
//!   task processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod commander;
mod components;
mod config;
mod db;
mod events;
mod filter;
mod model;
mod plugin;
mod render;
mod tasks;
mod theme;
mod util;

use std::{
    fs::OpenOptions,
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    commander::Commander,
    components::{PageList, PreferencesView},
    config::AppConfig,
    events::{AppEvent, process_events},
    model::library::Library,
    plugin::RatingFilters,
    tasks::AppTask,
    theme::Theme,
};

const DEFAULT_LOG_FILTER: &str = "info";

/// A message shown in the status line.
#[derive(Debug, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub library: Library,
    pub filters: RatingFilters,

    pub page_list: PageList,
    pub preferences: PreferencesView,
    pub commander: Commander,

    pub status: Option<Status>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let filters = RatingFilters::new(config.favourites_threshold);

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            library: Library::new(),
            filters,
            page_list: PageList::new(),
            preferences: PreferencesView::new(),
            commander: Commander::new(),
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    init_logging().context("Failed to initialise logging")?;

    let config = config::load_config();
    info!(
        "Starting with favourites threshold {} and {} media directories",
        config.favourites_threshold,
        config.media_dirs.len()
    );

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Sends log output to a file next to the configuration file.
///
/// The terminal belongs to the UI, so nothing is logged to it. `RUST_LOG`
/// overrides the default level.
fn init_logging() -> Result<()> {
    let log_path = config::log_file_path()?;
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    info!("Log file: {:?}", log_path);

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s against the database.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// It then activates the rating filters, requests the initial library load
/// and hands control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks.
    let task_event_tx = app.event_tx.clone();
    tasks::spawn_task_worker(&app.config, task_rx, task_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    app.filters.activate(&mut app.library);

    // Initial trigger to populate the pages from the database
    app.task_tx
        .send(AppTask::LoadLibrary)
        .context("Task worker is not running")?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
