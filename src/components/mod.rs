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

//! Reusable interface components.
//!
//! Each component keeps its own state and splits event handling and
//! rendering into `event` and `render` submodules.

mod filter_bar;
mod page_list;
mod preferences;
mod track_table;

pub(crate) use filter_bar::FilterToggles;
pub(crate) use page_list::PageList;
pub(crate) use preferences::PreferencesView;
pub(crate) use track_table::{TrackTable, TrackTableAction, TrackTableState};
