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

//! Preferences dialog for the rating filters.
//!
//! A popup listing the favourites thresholds a user can pick, from "5 stars
//! only" down to "1 star and above". Confirming a choice sends an
//! [`AppEvent::SetThreshold`](crate::events::AppEvent::SetThreshold).

mod event;
mod render;

use ratatui::widgets::ListState;

use crate::filter::Threshold;

pub(crate) struct PreferencesView {
    pub(crate) is_active: bool,
    list_state: ListState,
}

impl PreferencesView {
    pub(crate) fn new() -> Self {
        Self {
            is_active: false,
            list_state: ListState::default(),
        }
    }

    /// Opens the dialog with the threshold currently in effect highlighted.
    pub(crate) fn open(&mut self, current: Threshold) {
        let idx = Threshold::CHOICES
            .iter()
            .position(|choice| *choice == current)
            .unwrap_or(0);

        self.list_state.select(Some(idx));
        self.is_active = true;
    }

    pub(crate) fn close(&mut self) {
        self.is_active = false;
    }

    fn highlighted(&self) -> Option<Threshold> {
        self.list_state
            .selected()
            .and_then(|idx| Threshold::CHOICES.get(idx).copied())
    }

    fn next(&mut self) {
        let idx = self.list_state.selected().map_or(0, |i| (i + 1) % Threshold::CHOICES.len());
        self.list_state.select(Some(idx));
    }

    fn previous(&mut self) {
        let len = Threshold::CHOICES.len();
        let idx = self.list_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.list_state.select(Some(idx));
    }
}
