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
    db::{self, scan},
    events::AppEvent,
    tasks::TaskContext,
};

pub(super) fn load_library(ctx: &mut TaskContext) -> Result<()> {
    let snapshot = db::load_snapshot(ctx.conn)?;
    ctx.event_tx.send(AppEvent::LibraryLoaded(snapshot))?;

    Ok(())
}

pub(super) fn scan_catalog(ctx: &mut TaskContext) -> Result<()> {
    let media_dirs = &ctx.config.media_dirs;
    if media_dirs.is_empty() {
        warn!("No media directories configured, nothing to scan");
    }

    let count = scan::process_music_library(ctx.conn, media_dirs.as_slice())?;
    info!("Catalog scan finished with {} tracks", count);

    ctx.event_tx.send(AppEvent::CatalogScanned(count))?;

    load_library(ctx)
}

pub(super) fn search(ctx: &mut TaskContext, text: String) -> Result<()> {
    let results = db::search(ctx.conn, &text)?;
    ctx.event_tx.send(AppEvent::SearchResultsReady(text, results))?;

    Ok(())
}

pub(super) fn rate_track(ctx: &mut TaskContext, durable_id: i64, rating: f64) -> Result<()> {
    db::update_rating(ctx.conn, durable_id, rating)?;

    Ok(())
}

pub(super) fn add_to_playlist(ctx: &mut TaskContext, name: String, durable_ids: Vec<i64>) -> Result<()> {
    let playlist = db::ensure_playlist(ctx.conn, &name)?;
    let added = db::add_playlist_tracks(ctx.conn, playlist.id, &durable_ids)?;
    info!("Added {} tracks to playlist {}", added, playlist.name);

    let tracks = db::fetch_playlist_tracks(ctx.conn, playlist.id)?;
    ctx.event_tx.send(AppEvent::PlaylistUpdated(playlist, tracks))?;

    Ok(())
}
