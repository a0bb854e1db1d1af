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

//! Interactive track table widget and state management.
//!
//! This module provides a reusable table component for displaying, sorting
//! and rating tracks. It separates persistent state (`TrackTableState`) from
//! the transient widget view (`TrackTable`), and reports actions that need
//! the rest of the application as [`TrackTableAction`]s.
//!
//! The tracks handed to the table are kept as given. The rows shown are a
//! sorted copy, so swapping in a new set of tracks keeps the current sort
//! order.

mod event;
mod render;

use std::collections::HashSet;

use ratatui::widgets::TableState;

use crate::{filter::ViewModel, model::TrackRef};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// The order the tracks were given in.
    #[default]
    Natural,
    Artist,
    Title,
    Rating,
}

impl SortOrder {
    fn next(self) -> Self {
        match self {
            SortOrder::Natural => SortOrder::Artist,
            SortOrder::Artist => SortOrder::Title,
            SortOrder::Title => SortOrder::Rating,
            SortOrder::Rating => SortOrder::Natural,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            SortOrder::Natural => "natural",
            SortOrder::Artist => "artist",
            SortOrder::Title => "title",
            SortOrder::Rating => "rating",
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum TrackTableAction {
    /// Set the rating of the track with the given durable id.
    Rate(i64, f64),
}

pub(crate) struct TrackTableState {
    tracks: ViewModel<TrackRef>,
    rows: Vec<TrackRef>,
    sort: SortOrder,
    selection: HashSet<i64>,
    table_state: TableState,
}

impl TrackTableState {
    pub(crate) fn new() -> Self {
        Self {
            tracks: Vec::new().into(),
            rows: vec![],
            sort: SortOrder::default(),
            selection: HashSet::new(),
            table_state: TableState::new(),
        }
    }

    /// Replaces the tracks shown, keeping the sort order and, when they are
    /// still present, the highlighted and selected tracks.
    pub(crate) fn set_tracks(&mut self, tracks: ViewModel<TrackRef>) {
        let highlighted = self.highlighted().map(|track| track.durable_id());

        self.tracks = tracks;
        self.apply_sort();

        let shown: HashSet<i64> = self.rows.iter().map(|track| track.durable_id()).collect();
        self.selection.retain(|id| shown.contains(id));

        let idx = highlighted
            .and_then(|id| self.rows.iter().position(|t| t.durable_id() == id))
            .or_else(|| self.table_state.selected())
            .map(|idx| idx.min(self.rows.len().saturating_sub(1)));

        self.table_state
            .select(if self.rows.is_empty() { None } else { idx.or(Some(0)) });
    }

    pub(crate) fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.apply_sort();
    }

    pub(crate) fn sort(&self) -> SortOrder {
        self.sort
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[TrackRef] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn highlighted(&self) -> Option<&TrackRef> {
        self.table_state.selected().and_then(|idx| self.rows.get(idx))
    }

    pub(crate) fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Returns the selected tracks in display order, or the highlighted track
    /// when nothing is selected.
    pub(crate) fn selected_tracks(&self) -> Vec<TrackRef> {
        if self.selection.is_empty() {
            return self.highlighted().cloned().into_iter().collect();
        }

        self.rows
            .iter()
            .filter(|track| self.selection.contains(&track.durable_id()))
            .cloned()
            .collect()
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub(crate) fn as_widget(&mut self) -> TrackTable<'_> {
        TrackTable {
            tracks: &self.rows,
            selection: &mut self.selection,
            table_state: &mut self.table_state,
        }
    }

    fn apply_sort(&mut self) {
        self.rows = self.tracks.to_vec();

        match self.sort {
            SortOrder::Natural => {}
            SortOrder::Artist => self.rows.sort_by_cached_key(|track| {
                let info = track.info();
                (
                    info.artist_name.to_lowercase(),
                    info.album_title.to_lowercase(),
                    info.track_number,
                )
            }),
            SortOrder::Title => self
                .rows
                .sort_by_cached_key(|track| track.info().track_title.to_lowercase()),
            SortOrder::Rating => self
                .rows
                .sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        }
    }
}

pub(crate) struct TrackTable<'a> {
    tracks: &'a [TrackRef],
    selection: &'a mut HashSet<i64>,
    table_state: &'a mut TableState,
}

impl<'a> TrackTable<'a> {
    fn goto_next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if !self.tracks.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if let Some(last) = self.tracks.len().checked_sub(1) {
            self.table_state.select(Some(last));
        }
    }

    fn highlighted(&self) -> Option<&TrackRef> {
        self.table_state.selected().and_then(|idx| self.tracks.get(idx))
    }

    fn toggle_select_current(&mut self) {
        if let Some(id) = self.highlighted().map(|track| track.durable_id()) {
            if !self.selection.insert(id) {
                self.selection.remove(&id);
            }
        }
    }

    fn select_all(&mut self) {
        self.selection
            .extend(self.tracks.iter().map(|t| t.durable_id()));
    }

    fn select_inverse(&mut self) {
        for track in self.tracks.iter() {
            let id = track.durable_id();
            if !self.selection.insert(id) {
                self.selection.remove(&id);
            }
        }
    }

    fn select_none(&mut self) {
        self.selection.clear();
    }
}
