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

//! Media library indexing and database persistence.
//!
//! This module handles the discovery of audio files on the local filesystem
//! and the management of associated database records.
//!
//! It utilizes `WalkDir` for efficient directory traversal and `Lofty` for
//! metadata extraction.
//!
//! # Durable ids
//!
//! Every track gets a durable id derived from its file path. Ratings and
//! playlist entries are keyed by durable id, so they survive a full rescan
//! even though the track rows themselves are rebuilt.
//!
//! # Performance
//!
//! Large library scans are performed within an atomic SQLite transaction to
//! maximize write throughput and ensure database integrity. Internal caching
//! is used during processing to minimize redundant database lookups for
//! existing artist and album entries.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use lofty::{prelude::*, probe::Probe, tag::ItemKey};
use rusqlite::{Connection, params};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "flac", "ogg", "m4a"];

/// Derives the durable id of a track from its file name.
pub(crate) fn durable_id(filename: &str) -> i64 {
    xxh3_64(filename.as_bytes()) as i64
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Recursively scans directories for audio files and synchronizes the database.
///
/// This performs a full library rebuild by clearing all existing track records
/// and re-indexing the provided root directories. Metadata is extracted from
/// file tags and normalized via an internal cache to prevent duplicate entries.
///
/// Files that cannot be read, or that carry no tags, are logged and skipped.
///
/// # Returns
///
/// Returns the total number of tracks in the database after the scan.
///
/// # Errors
///
/// Returns an error if the transaction fails or if database constraints are
/// violated during insertion.
pub(crate) fn process_music_library<P: AsRef<Path>>(conn: &mut Connection, roots: &[P]) -> Result<i64> {
    let mut artist_cache: HashMap<String, i64> = HashMap::new();
    let mut album_cache: HashMap<(i64, String), i64> = HashMap::new();

    let tx = conn.transaction()?;

    tx.execute("DELETE FROM tracks", [])?;
    tx.execute("DELETE FROM albums", [])?;
    tx.execute("DELETE FROM artists", [])?;

    tx.execute("DELETE FROM sqlite_sequence WHERE name IN ('artists', 'albums', 'tracks')", [])?;

    for root in roots {
        let root = root.as_ref();
        info!("Scanning {}", root.display());

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        {
            let path = entry.path();

            let Some(filename) = path.to_str() else {
                warn!("Skipping {:?}: path is not valid UTF-8", path);
                continue;
            };

            let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
                warn!("Skipping (no tags): {}", path.display());
                continue;
            };

            let album_artist_name = tag
                .get(ItemKey::AlbumArtist)
                .and_then(|item| item.value().text())
                .map(|s| s.to_string());

            let artist_name = album_artist_name
                .unwrap_or_else(|| tag.artist().unwrap_or_else(|| "Unknown Artist".into()).to_string());
            let album_title = tag.album().unwrap_or_else(|| "Unknown Album".into()).to_string();
            let track_title = match tag.title() {
                Some(title) => title.to_string(),
                None => entry.file_name().to_string_lossy().to_string(),
            };
            let year: Option<u32> = tag.date().map(|d| u32::from(d.year));
            let duration = i64::try_from(tagged_file.properties().duration().as_secs()).unwrap_or(-1);
            let genre = tag.genre().map(|g| g.to_string());
            let track_number: Option<u32> = tag.track();

            let artist_id = if let Some(&id) = artist_cache.get(&artist_name) {
                id
            } else {
                tx.execute("INSERT OR IGNORE INTO artists (name) VALUES (?)", params![artist_name])?;
                let id: i64 = tx.query_row("SELECT id FROM artists WHERE name = ?", params![artist_name], |r| r.get(0))?;
                artist_cache.insert(artist_name.clone(), id);
                id
            };

            let album_key = (artist_id, album_title.clone());
            let album_id = if let Some(&id) = album_cache.get(&album_key) {
                id
            } else {
                tx.execute("INSERT OR IGNORE INTO albums (artist_id, title) VALUES (?, ?)", params![artist_id, album_title])?;
                let id: i64 = tx.query_row("SELECT id FROM albums WHERE artist_id = ? AND title = ?", params![artist_id, album_title], |r| r.get(0))?;
                album_cache.insert(album_key, id);
                id
            };

            debug!("Indexed {}", filename);

            tx.execute(
                "INSERT OR IGNORE INTO tracks (durable_id, album_id, track_number, title, duration, genre, year, filename) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![durable_id(filename), album_id, track_number, track_title, duration, genre, year, filename],
            )?;
        }
    }

    tx.commit().context("Failed to commit transaction")?;

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tracks",
        [],
        |row| row.get(0)
    )?;

    Ok(count)
}
