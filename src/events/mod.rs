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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. Every input, whether a key press, a result from the task
//! worker or a command typed on the command line, arrives here as an
//! [`AppEvent`] and is translated into state changes.
//!
//! This is the only place that notifies the rating filters: page selection,
//! filter toggles, source changes, rating changes and threshold changes are
//! all routed through the handlers in this module.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    filter::{FilterKind, Threshold},
    model::{LibrarySnapshot, PageId, Playlist, TrackInfo},
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    Tick,

    ExitApplication,

    Error(String),

    // Results from the task worker
    LibraryLoaded(LibrarySnapshot),
    SearchResultsReady(String, Vec<TrackInfo>),
    PlaylistUpdated(Playlist, Vec<TrackInfo>),
    CatalogScanned(i64),

    PageSelected(PageId),

    FilterToggled(FilterKind),
    CycleFilter,
    SetFiltersActive(bool),

    /// Set the star rating of the track with the given durable id.
    RateTrack(i64, f64),

    SetThreshold(Threshold),
    OpenPreferences,

    Search(String),
    AddSelectionToPlaylist(String),
    ScanCatalog,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if !handle_event(app, event)? {
            break;
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application state.
///
/// Returns `false` once the application should exit.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<bool> {
    match event {
        AppEvent::ExitApplication => return Ok(false),

        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Tick => {}
        AppEvent::Error(message) => handle_error(app, message),

        AppEvent::LibraryLoaded(snapshot) => handle_library_loaded(app, snapshot),
        AppEvent::SearchResultsReady(text, tracks) => handle_search_results_ready(app, text, tracks),
        AppEvent::PlaylistUpdated(playlist, tracks) => handle_playlist_updated(app, playlist, tracks),
        AppEvent::CatalogScanned(count) => handle_catalog_scanned(app, count),

        AppEvent::PageSelected(page) => handle_page_selected(app, page),

        AppEvent::FilterToggled(filter) => handle_filter_toggled(app, filter),
        AppEvent::CycleFilter => handle_cycle_filter(app),
        AppEvent::SetFiltersActive(active) => handle_set_filters_active(app, active),

        AppEvent::RateTrack(durable_id, rating) => handle_rate_track(app, durable_id, rating)?,

        AppEvent::SetThreshold(threshold) => handle_set_threshold(app, threshold),
        AppEvent::OpenPreferences => handle_open_preferences(app),

        AppEvent::Search(text) => handle_search(app, text)?,
        AppEvent::AddSelectionToPlaylist(name) => handle_add_selection_to_playlist(app, name)?,
        AppEvent::ScanCatalog => handle_scan_catalog(app)?,
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::{Status, config::AppConfig, model::test_track, tasks::AppTask};

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let mut app = App::new(AppConfig::default(), task_tx);
        app.filters.activate(&mut app.library);

        let snapshot = LibrarySnapshot {
            tracks: vec![
                test_track(1, "a", 0.0),
                test_track(2, "b", 3.0),
                test_track(3, "c", 5.0),
            ],
            playlists: vec![(
                Playlist {
                    id: 4,
                    name: "Mix".to_string(),
                },
                vec![test_track(3, "c", 5.0)],
            )],
        };
        handle_event(&mut app, AppEvent::LibraryLoaded(snapshot)).unwrap();

        (app, task_rx)
    }

    fn key(app: &mut App, code: KeyCode) {
        key_with(app, code, KeyModifiers::NONE);
    }

    fn key_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        let event = AppEvent::Key(KeyEvent::new(code, modifiers));
        handle_event(app, event).unwrap();
        while let Ok(event) = app.event_rx.try_recv() {
            handle_event(app, event).unwrap();
        }
    }

    fn displayed(app: &App) -> Vec<i64> {
        let page = app.library.selected_page();
        page.table.rows().iter().map(|t| t.durable_id()).collect()
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut app, _tasks) = app();

        assert!(!handle_event(&mut app, AppEvent::ExitApplication).unwrap());
    }

    #[test]
    fn filter_keys_toggle_the_selected_page() {
        let (mut app, _tasks) = app();

        key(&mut app, KeyCode::Char('u'));
        assert_eq!(displayed(&app), vec![1]);

        key(&mut app, KeyCode::Char('f'));
        assert_eq!(displayed(&app), vec![2, 3]);

        key(&mut app, KeyCode::Tab);
        assert_eq!(app.filters.toggles.current(), FilterKind::Unrated);

        key(&mut app, KeyCode::Char('a'));
        assert_eq!(displayed(&app), vec![1, 2, 3]);
    }

    #[test]
    fn rating_key_persists_and_refilters() {
        let (mut app, tasks) = app();
        key(&mut app, KeyCode::Char('f'));
        assert_eq!(displayed(&app), vec![2, 3]);

        // Highlight track 2 and drop it to one star
        key(&mut app, KeyCode::Char('g'));
        key(&mut app, KeyCode::Char('1'));

        assert_eq!(displayed(&app), vec![3]);
        assert!(matches!(tasks.try_recv(), Ok(AppTask::RateTrack(2, r)) if r == 1.0));
    }

    #[test]
    fn page_keys_switch_pages_and_toggles() {
        let (mut app, _tasks) = app();
        key(&mut app, KeyCode::Char('u'));

        key(&mut app, KeyCode::Char(']'));
        assert_eq!(app.library.selected_page_id(), PageId::Playlist(4));
        assert_eq!(app.filters.toggles.current(), FilterKind::All);

        key(&mut app, KeyCode::Char('['));
        assert_eq!(app.library.selected_page_id(), PageId::Library);
        assert_eq!(app.filters.toggles.current(), FilterKind::Unrated);
        assert_eq!(displayed(&app), vec![1]);
    }

    #[test]
    fn search_results_keep_the_active_filter() {
        let (mut app, _tasks) = app();
        key(&mut app, KeyCode::Char('f'));

        let results = vec![test_track(1, "a", 0.0), test_track(3, "c", 5.0)];
        handle_event(&mut app, AppEvent::SearchResultsReady("c".to_string(), results)).unwrap();

        assert_eq!(app.library.search(), "c");
        assert_eq!(displayed(&app), vec![3]);
    }

    #[test]
    fn late_search_results_keep_a_newer_rating() {
        let (mut app, _tasks) = app();

        key(&mut app, KeyCode::Char(']'));
        key(&mut app, KeyCode::Char('0'));
        key(&mut app, KeyCode::Char('u'));
        assert_eq!(displayed(&app), vec![3]);

        // Read by the worker before the rating above was stored
        let results = vec![test_track(3, "c", 5.0)];
        handle_event(&mut app, AppEvent::SearchResultsReady("c".to_string(), results)).unwrap();

        assert_eq!(app.library.entry(3).unwrap().rating(), 0.0);
        assert_eq!(displayed(&app), vec![3]);

        key(&mut app, KeyCode::Char('f'));
        assert!(displayed(&app).is_empty());
    }

    #[test]
    fn toggling_while_deactivated_reports_an_error() {
        let (mut app, _tasks) = app();
        handle_event(&mut app, AppEvent::SetFiltersActive(false)).unwrap();

        handle_event(&mut app, AppEvent::FilterToggled(FilterKind::Unrated)).unwrap();

        assert!(matches!(app.status, Some(Status::Error(_))));
        assert_eq!(displayed(&app), vec![1, 2, 3]);
    }

    #[test]
    fn playlist_selection_is_sent_to_the_worker() {
        let (mut app, tasks) = app();

        key_with(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::AddSelectionToPlaylist("Mix".to_string())).unwrap();

        assert!(matches!(
            tasks.try_recv(),
            Ok(AppTask::AddToPlaylist(name, ids)) if name == "Mix" && ids == vec![1, 2, 3]
        ));
    }
}
