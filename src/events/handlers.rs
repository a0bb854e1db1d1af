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

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    App, Status, config,
    filter::{FilterKind, Threshold},
    model::{LibrarySnapshot, PageId, Playlist, TrackInfo},
    tasks::AppTask,
};

pub(super) fn handle_error(app: &mut App, message: String) {
    warn!("{}", message);
    app.status = Some(Status::Error(message));
}

pub(super) fn handle_library_loaded(app: &mut App, snapshot: LibrarySnapshot) {
    info!(
        "Library loaded with {} tracks and {} playlists",
        snapshot.tracks.len(),
        snapshot.playlists.len()
    );

    let selected = app.library.selected_page_id();
    let loaded = app.library.load(snapshot);

    for page in loaded {
        app.filters.on_source_changed(&mut app.library, page);
    }

    // The selected playlist may have gone away
    let page = app.library.selected_page_id();
    if page != selected {
        app.filters.on_page_selected(&mut app.library, page);
    }
}

pub(super) fn handle_search_results_ready(app: &mut App, text: String, tracks: Vec<TrackInfo>) {
    app.status = if text.is_empty() {
        None
    } else {
        Some(Status::Info(format!("{} tracks matching '{}'", tracks.len(), text)))
    };

    app.library.set_search_results(text, tracks);
    app.filters.on_source_changed(&mut app.library, PageId::Library);
}

pub(super) fn handle_playlist_updated(app: &mut App, playlist: Playlist, tracks: Vec<TrackInfo>) {
    app.status = Some(Status::Info(format!(
        "Playlist '{}' now has {} tracks",
        playlist.name,
        tracks.len()
    )));

    let page = app.library.set_playlist(playlist, tracks);
    app.filters.on_source_changed(&mut app.library, page);
    app.library.selected_page_mut().table.clear_selection();
}

pub(super) fn handle_catalog_scanned(app: &mut App, count: i64) {
    app.status = Some(Status::Info(format!("Scan finished, {} tracks in library", count)));
}

pub(super) fn handle_page_selected(app: &mut App, page: PageId) {
    if app.library.select_page(page) {
        app.filters.on_page_selected(&mut app.library, page);
    }
}

pub(super) fn handle_filter_toggled(app: &mut App, filter: FilterKind) {
    if !app.filters.is_active() {
        app.status = Some(Status::Error(
            "Rating filters are off, use ':filters on'".to_string(),
        ));
        return;
    }

    app.filters.on_filter_toggled(&mut app.library, filter);
}

pub(super) fn handle_cycle_filter(app: &mut App) {
    let filter = app.filters.toggles.current().next();
    handle_filter_toggled(app, filter);
}

pub(super) fn handle_set_filters_active(app: &mut App, active: bool) {
    if active {
        app.filters.activate(&mut app.library);
    } else {
        app.filters.deactivate(&mut app.library);
    }
}

pub(super) fn handle_rate_track(app: &mut App, durable_id: i64, rating: f64) -> Result<()> {
    let Some(entry) = app.library.entry(durable_id) else {
        return Ok(());
    };

    if entry.rating() == rating {
        return Ok(());
    }

    entry.set_rating(rating);
    app.task_tx.send(AppTask::RateTrack(durable_id, rating))?;
    app.filters.on_rating_changed(&mut app.library, &entry);

    Ok(())
}

pub(super) fn handle_set_threshold(app: &mut App, threshold: Threshold) {
    app.filters.on_threshold_changed(&mut app.library, threshold);

    app.config.favourites_threshold = threshold;
    if let Err(e) = config::save_config(&app.config) {
        warn!("Failed to save configuration: {}", e);
        app.status = Some(Status::Error(format!("Failed to save preferences: {}", e)));
        return;
    }

    app.status = Some(Status::Info(format!("Favourites: {}", threshold)));
}

pub(super) fn handle_open_preferences(app: &mut App) {
    app.preferences.open(app.filters.threshold());
}

pub(super) fn handle_search(app: &mut App, text: String) -> Result<()> {
    app.task_tx.send(AppTask::Search(text))?;

    Ok(())
}

pub(super) fn handle_add_selection_to_playlist(app: &mut App, name: String) -> Result<()> {
    let durable_ids: Vec<i64> = app
        .library
        .selected_page()
        .table
        .selected_tracks()
        .iter()
        .map(|track| track.durable_id())
        .collect();

    if durable_ids.is_empty() {
        app.status = Some(Status::Error("No tracks selected".to_string()));
        return Ok(());
    }

    app.task_tx.send(AppTask::AddToPlaylist(name, durable_ids))?;

    Ok(())
}

pub(super) fn handle_scan_catalog(app: &mut App) -> Result<()> {
    app.status = Some(Status::Info("Scanning media directories".to_string()));
    app.task_tx.send(AppTask::ScanCatalog)?;

    Ok(())
}
