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

//! Unicode symbols for the TUI.
//!
//! This module contains standardized icons used across the interface. These
//! are selected for compatibility with most modern terminal emulators and
//! fonts.

// Rating stars
pub(crate) const ICON_STAR_FILLED: &str = "\u{2605}";
pub(crate) const ICON_STAR_EMPTY: &str = "\u{2606}";

pub(crate) const ICON_FILTER: &str = "\u{25BC}";
