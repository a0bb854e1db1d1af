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

//! Rating filter lifecycle.
//!
//! [`RatingFilters`] owns the filter cache and the toggle controls, and
//! mirrors the activate/deactivate lifecycle of a player plugin: while
//! inactive the toggles are hidden and every notification is ignored.

use std::{cell::Cell, rc::Rc};

use tracing::info;

use crate::{
    components::FilterToggles,
    filter::{FilterCache, FilterKind, Threshold},
    model::{PageId, TrackRef, library::Library},
};

type LibraryFilterCache = FilterCache<PageId, TrackRef, Rc<Cell<Threshold>>>;

pub(crate) struct RatingFilters {
    threshold: Rc<Cell<Threshold>>,
    cache: Option<LibraryFilterCache>,
    pub(crate) toggles: FilterToggles,
}

impl RatingFilters {
    pub(crate) fn new(threshold: Threshold) -> Self {
        Self {
            threshold: Rc::new(Cell::new(threshold)),
            cache: None,
            toggles: FilterToggles::new(),
        }
    }

    /// Registers the toggles and starts tracking pages, beginning with the
    /// page currently selected in the library.
    pub(crate) fn activate(&mut self, library: &mut Library) {
        if self.cache.is_some() {
            return;
        }

        info!("Activating rating filters");

        self.toggles.register();
        self.cache = Some(FilterCache::new(Rc::clone(&self.threshold)));

        let page = library.selected_page_id();
        self.on_page_selected(library, page);
    }

    /// Puts every visited page back on its unfiltered tracks and hides the
    /// toggles.
    pub(crate) fn deactivate(&mut self, library: &mut Library) {
        let Some(mut cache) = self.cache.take() else {
            return;
        };

        info!("Deactivating rating filters");

        cache.deactivate(library);
        self.toggles.unregister();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.cache.is_some()
    }

    pub(crate) fn threshold(&self) -> Threshold {
        self.threshold.get()
    }

    pub(crate) fn on_page_selected(&mut self, library: &mut Library, page: PageId) {
        if let Some(cache) = self.cache.as_mut() {
            let filter = cache.on_page_selected(library, &page);
            self.toggles.set_current(filter);
        }
    }

    /// Applies a toggle to the selected page.
    pub(crate) fn on_filter_toggled(&mut self, library: &mut Library, filter: FilterKind) {
        if let Some(cache) = self.cache.as_mut() {
            let page = library.selected_page_id();
            cache.select_filter(library, &page, filter);
            self.toggles.set_current(filter);
        }
    }

    pub(crate) fn on_source_changed(&mut self, library: &mut Library, page: PageId) {
        if let Some(cache) = self.cache.as_mut() {
            cache.on_source_changed(library, &page);
        }
    }

    pub(crate) fn on_rating_changed(&mut self, library: &mut Library, entry: &TrackRef) {
        if let Some(cache) = self.cache.as_mut() {
            cache.on_rating_changed(library, entry);
        }
    }

    /// Stores a new favourites threshold and refreshes pages showing
    /// favourites. The threshold is kept even while inactive.
    pub(crate) fn on_threshold_changed(&mut self, library: &mut Library, threshold: Threshold) {
        if self.threshold.get() == threshold {
            return;
        }

        info!("Favourites threshold changed to {}", threshold);
        self.threshold.set(threshold);

        if let Some(cache) = self.cache.as_mut() {
            cache.on_threshold_changed(library);
        }
    }

    pub(crate) fn active_filter(&self, page: PageId) -> Option<FilterKind> {
        self.cache.as_ref().and_then(|cache| cache.active_filter(&page))
    }
}
