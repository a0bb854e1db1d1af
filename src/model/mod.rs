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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application: tracks as
//! read from the database, the live track entries shared between pages, and
//! the pages themselves.

pub(crate) mod library;

use std::{cell::Cell, fmt, rc::Rc};

use crate::filter::RatedEntry;

/// A track as read from the database.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackInfo {
    pub(crate) track_id: i32,
    pub(crate) durable_id: i64,
    pub(crate) track_title: String,
    pub(crate) track_number: i32,
    pub(crate) duration: i64,
    pub(crate) genre: Option<String>,
    pub(crate) year: Option<i64>,
    pub(crate) album_title: String,
    pub(crate) artist_name: String,
    pub(crate) filename: String,
    pub(crate) rating: f64,
}

/// A track record shared by every page that lists it.
///
/// The rating is the only mutable attribute, so a rating change made through
/// one page is seen by all of them.
#[derive(Debug)]
pub(crate) struct TrackEntry {
    info: TrackInfo,
    rating: Cell<f64>,
}

pub(crate) type TrackRef = Rc<TrackEntry>;

impl TrackEntry {
    pub(crate) fn new(info: TrackInfo) -> Self {
        let rating = Cell::new(info.rating);
        Self { info, rating }
    }

    pub(crate) fn info(&self) -> &TrackInfo {
        &self.info
    }

    pub(crate) fn durable_id(&self) -> i64 {
        self.info.durable_id
    }

    pub(crate) fn rating(&self) -> f64 {
        self.rating.get()
    }

    pub(crate) fn set_rating(&self, rating: f64) {
        self.rating.set(rating);
    }
}

impl RatedEntry for TrackRef {
    type Id = i64;

    fn entry_id(&self) -> i64 {
        self.durable_id()
    }

    fn rating(&self) -> f64 {
        TrackEntry::rating(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Playlist {
    pub(crate) id: i64,
    pub(crate) name: String,
}

/// Identifies a page listing tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PageId {
    Library,
    Playlist(i64),
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Library => f.write_str("library"),
            PageId::Playlist(id) => write!(f, "playlist #{id}"),
        }
    }
}

/// Everything the library pages show, as loaded by the task worker.
#[derive(Debug, Default)]
pub(crate) struct LibrarySnapshot {
    pub(crate) tracks: Vec<TrackInfo>,
    pub(crate) playlists: Vec<(Playlist, Vec<TrackInfo>)>,
}

#[cfg(test)]
pub(crate) fn test_track(durable_id: i64, title: &str, rating: f64) -> TrackInfo {
    TrackInfo {
        track_id: durable_id as i32,
        durable_id,
        track_title: title.to_string(),
        track_number: 1,
        duration: 180,
        genre: None,
        year: None,
        album_title: "Album".to_string(),
        artist_name: "Artist".to_string(),
        filename: format!("/music/{title}.mp3"),
        rating,
    }
}
