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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation, fetching track metadata, ratings and static playlists.
//! It uses cached statements to optimize frequently executed queries.
//!
//! # Tables
//!
//! * `artists` - Stores unique artist names.
//! * `albums` - Groups tracks under titles, linked to artists.
//! * `tracks` - Individual audio files with metadata and file paths.
//! * `track_stats` - Star ratings, keyed by durable track id so they survive
//!   a rescan.
//! * `playlists`, `playlist_tracks` - Static playlists, also keyed by
//!   durable track id.
//!
//! # Performance
//!
//! Most functions in this module use [`rusqlite::Connection::prepare_cached`]
//! to reduce SQL parsing overhead.

mod model;
pub(crate) mod scan;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::model::{LibrarySnapshot, Playlist, TrackInfo};

const MIN_SEARCH_LEN: usize = 3;

/// Columns selected for every [`TrackInfo`] query, in the order expected by
/// [`TrackInfo::from_row`].
const TRACK_COLUMNS: &str = "
    SELECT ar.name, al.title, tr.id, tr.durable_id, COALESCE(tr.track_number, 0), tr.title,
           tr.duration, tr.year, tr.genre, tr.filename, COALESCE(ts.rating, 0.0)
    FROM tracks tr
    JOIN albums al ON tr.album_id = al.id
    JOIN artists ar ON al.artist_id = ar.id
    LEFT JOIN track_stats ts ON ts.durable_id = tr.durable_id
";

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open database {path}"))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE
        );

        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL,
            title TEXT NOT NULL COLLATE NOCASE,
            UNIQUE (artist_id, title),
            FOREIGN KEY (artist_id) REFERENCES artists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_albums_artist_id ON albums (artist_id);

        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            durable_id INTEGER NOT NULL UNIQUE,
            album_id INTEGER NOT NULL,
            track_number INTEGER,
            title TEXT NOT NULL COLLATE NOCASE,
            duration INTEGER NOT NULL,
            genre TEXT,
            year INTEGER,
            filename TEXT NOT NULL UNIQUE,
            UNIQUE (album_id, filename),
            FOREIGN KEY (album_id) REFERENCES albums (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_album_id ON tracks (album_id);

        CREATE TABLE IF NOT EXISTS track_stats (
            durable_id INTEGER PRIMARY KEY,
            rating REAL NOT NULL DEFAULT 0.0
        );

        CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE
        );

        CREATE TABLE IF NOT EXISTS playlist_tracks (
            playlist_id INTEGER NOT NULL,
            durable_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            UNIQUE (playlist_id, durable_id),
            FOREIGN KEY (playlist_id) REFERENCES playlists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_playlist_tracks_playlist_id ON playlist_tracks (playlist_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches every track in the library, ordered by artist, album and track
/// number.
pub(crate) fn fetch_library_tracks(conn: &Connection) -> Result<Vec<TrackInfo>> {
    let sql = format!("{TRACK_COLUMNS} ORDER BY ar.name, al.title, tr.track_number");

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([], TrackInfo::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Searches artist names, album titles and track titles.
///
/// Search text shorter than three characters matches every track.
pub(crate) fn search(conn: &Connection, text: &str) -> Result<Vec<TrackInfo>> {
    let text = text.trim();
    if text.chars().count() < MIN_SEARCH_LEN {
        return fetch_library_tracks(conn);
    }

    let sql = format!(
        "{TRACK_COLUMNS}
        WHERE (ar.name LIKE ?1 OR al.title LIKE ?1 OR tr.title LIKE ?1)
        ORDER BY ar.name, al.title, tr.track_number"
    );

    let param = format!("%{}%", text);

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([param], TrackInfo::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

pub(crate) fn fetch_playlists(conn: &Connection) -> Result<Vec<Playlist>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM playlists ORDER BY name")?;
    let results = stmt
        .query_map([], Playlist::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Fetches the tracks of a playlist in playlist order.
///
/// Entries whose track is no longer in the library are left out.
pub(crate) fn fetch_playlist_tracks(conn: &Connection, playlist_id: i64) -> Result<Vec<TrackInfo>> {
    let sql = format!(
        "{TRACK_COLUMNS}
        JOIN playlist_tracks pt ON pt.durable_id = tr.durable_id
        WHERE pt.playlist_id = ?
        ORDER BY pt.position"
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([playlist_id], TrackInfo::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Returns the playlist with the given name, creating it if needed.
pub(crate) fn ensure_playlist(conn: &Connection, name: &str) -> Result<Playlist> {
    conn.prepare_cached("INSERT OR IGNORE INTO playlists (name) VALUES (?)")?
        .execute([name])?;

    let mut stmt = conn.prepare_cached("SELECT id, name FROM playlists WHERE name = ?")?;
    let playlist = stmt
        .query_one([name], Playlist::from_row)
        .with_context(|| format!("Failed to fetch playlist {name}"))?;

    Ok(playlist)
}

/// Appends tracks to the end of a playlist, skipping tracks already in it.
///
/// Returns the number of tracks added.
pub(crate) fn add_playlist_tracks(
    conn: &mut Connection,
    playlist_id: i64,
    durable_ids: &[i64],
) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut added = 0;

    {
        let mut next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM playlist_tracks WHERE playlist_id = ?",
            [playlist_id],
            |r| r.get(0),
        )?;

        let mut stmt = tx.prepare_cached(
            "INSERT OR IGNORE INTO playlist_tracks (playlist_id, durable_id, position)
             VALUES (?1, ?2, ?3)",
        )?;

        for durable_id in durable_ids {
            if stmt.execute(params![playlist_id, durable_id, next_position])? > 0 {
                next_position += 1;
                added += 1;
            }
        }
    }

    tx.commit().context("Failed to commit playlist update")?;

    Ok(added)
}

pub(crate) fn update_rating(conn: &Connection, durable_id: i64, rating: f64) -> Result<()> {
    let sql = "
        INSERT INTO track_stats (durable_id, rating)
        VALUES (?1, ?2)
        ON CONFLICT (durable_id)
        DO UPDATE SET rating = ?2";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![durable_id, rating])?;

    Ok(())
}

/// Loads the library tracks and every playlist with its tracks.
pub(crate) fn load_snapshot(conn: &Connection) -> Result<LibrarySnapshot> {
    let tracks = fetch_library_tracks(conn)?;

    let playlists = fetch_playlists(conn)?
        .into_iter()
        .map(|playlist| -> Result<_> {
            let tracks = fetch_playlist_tracks(conn, playlist.id)?;
            Ok((playlist, tracks))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LibrarySnapshot { tracks, playlists })
}

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use rusqlite::{Connection, params};

    /// Opens an in-memory database with the application schema.
    pub(crate) fn memory_db() -> Result<Connection> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        super::create_schema(&conn)?;
        Ok(conn)
    }

    pub(crate) fn insert_track(
        conn: &Connection,
        durable_id: i64,
        artist: &str,
        album: &str,
        title: &str,
    ) -> Result<()> {
        conn.execute("INSERT OR IGNORE INTO artists (name) VALUES (?)", [artist])?;
        conn.execute(
            "INSERT OR IGNORE INTO albums (artist_id, title)
             SELECT id, ?2 FROM artists WHERE name = ?1",
            params![artist, album],
        )?;
        conn.execute(
            "INSERT INTO tracks (durable_id, album_id, track_number, title, duration, filename)
             SELECT ?1, al.id, 1, ?4, 200, ?5
             FROM albums al JOIN artists ar ON al.artist_id = ar.id
             WHERE ar.name = ?2 AND al.title = ?3",
            params![durable_id, artist, album, title, format!("/music/{durable_id}.mp3")],
        )?;
        Ok(())
    }
}
