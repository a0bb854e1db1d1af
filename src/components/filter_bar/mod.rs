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

//! Rating filter toggle controls.
//!
//! Three mutually exclusive toggles, "All Ratings", "Favourites" and
//! "Unrated", shown above the track table while the rating filters are
//! active.

mod render;

use crate::filter::FilterKind;

#[derive(Debug, Default)]
pub(crate) struct FilterToggles {
    current: FilterKind,
    registered: bool,
}

impl FilterToggles {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shows the toggles, with "All Ratings" selected.
    pub(crate) fn register(&mut self) {
        self.registered = true;
        self.current = FilterKind::All;
    }

    pub(crate) fn unregister(&mut self) {
        self.registered = false;
        self.current = FilterKind::All;
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn current(&self) -> FilterKind {
        self.current
    }

    pub(crate) fn set_current(&mut self, filter: FilterKind) {
        self.current = filter;
    }
}
