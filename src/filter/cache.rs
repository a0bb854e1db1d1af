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

//! Per-page filter state and memoised filtered views.
//!
//! Every page the user visits gets a [`PageState`] holding the active filter
//! and the views computed so far for that page. Views are computed lazily,
//! one filter at a time, and dropped when they can no longer be trusted:
//!
//! * a rating change evicts `Favourites` and `Unrated` from every page that
//!   contains the track;
//! * a source change rebuilds `All` and the active view, everything else is
//!   discarded;
//! * a threshold change invalidates `Favourites`, detected by comparing the
//!   threshold recorded with the page against the current one.
//!
//! The `All` view is never evicted while a page is known, and the active
//! filter always has a view once an operation returns.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use tracing::debug;

use crate::filter::{
    FilterKind, PageHost, RatedEntry, Threshold, ThresholdProvider, ViewModel, apply_filter,
};

struct PageState<E> {
    active_filter: FilterKind,
    views: HashMap<FilterKind, ViewModel<E>>,
    threshold: Threshold,
}

impl<E: RatedEntry + Clone> PageState<E> {
    fn new(source: ViewModel<E>, threshold: Threshold) -> Self {
        let mut views = HashMap::new();
        views.insert(FilterKind::All, source);

        Self {
            active_filter: FilterKind::All,
            views,
            threshold,
        }
    }

    fn all(&self) -> &ViewModel<E> {
        self.views
            .get(&FilterKind::All)
            .expect("a visited page always has an All view")
    }

    fn active_view(&self) -> ViewModel<E> {
        let view = self
            .views
            .get(&self.active_filter)
            .expect("the active filter always has a cached view");
        ViewModel::clone(view)
    }

    /// Records the threshold in effect, dropping a `Favourites` view computed
    /// under a different one.
    fn sync_threshold(&mut self, threshold: Threshold) {
        if self.threshold != threshold {
            if self.views.remove(&FilterKind::Favourites).is_some() {
                debug!(
                    "Favourites threshold changed from {} to {}, dropping cached view",
                    self.threshold.stars(),
                    threshold.stars()
                );
            }
            self.threshold = threshold;
        }
    }

    /// Computes the view for `filter` unless a cached one is present.
    fn ensure_view(&mut self, filter: FilterKind) {
        if self.views.contains_key(&filter) {
            return;
        }

        debug!("Creating new filtered view for {}", filter);
        let view = apply_filter(filter, self.all(), self.threshold);
        self.views.insert(filter, view);
    }

    fn select(&mut self, filter: FilterKind, threshold: Threshold) {
        self.sync_threshold(threshold);
        self.ensure_view(filter);
        self.active_filter = filter;
    }

    fn rebuild(&mut self, source: ViewModel<E>, threshold: Threshold) {
        self.views.clear();
        self.views.insert(FilterKind::All, source);
        self.threshold = threshold;
        self.ensure_view(self.active_filter);
    }

    fn evict_rated_views(&mut self) {
        self.views.remove(&FilterKind::Favourites);
        self.views.remove(&FilterKind::Unrated);
    }
}

/// Tracks the active rating filter and cached views of every visited page.
///
/// The cache is owned by the UI thread and driven by the host's events. It
/// reads pages and pushes filtered views through a [`PageHost`] passed to
/// each operation, and reads the favourites threshold from the provider given
/// at construction.
pub(crate) struct FilterCache<P, E, T> {
    threshold: T,
    pages: HashMap<P, PageState<E>>,
    selected: Option<P>,
}

impl<P, E, T> FilterCache<P, E, T>
where
    P: Eq + Hash + Clone + Debug,
    E: RatedEntry + Clone,
    T: ThresholdProvider,
{
    pub(crate) fn new(threshold: T) -> Self {
        Self {
            threshold,
            pages: HashMap::new(),
            selected: None,
        }
    }

    fn current_threshold(&self) -> Threshold {
        self.threshold.favourites_threshold()
    }

    /// Shows `filter` on `page`.
    ///
    /// The page is initialised if this is its first visit. At most one view is
    /// computed, and only for `filter`. The page is refreshed exactly once.
    pub(crate) fn select_filter<H>(&mut self, host: &mut H, page: &P, filter: FilterKind)
    where
        H: PageHost<P, E>,
    {
        debug!("Filter changed to {} on page {:?}", filter, page);

        let threshold = self.current_threshold();
        let state = self
            .pages
            .entry(page.clone())
            .or_insert_with(|| PageState::new(host.unfiltered_tracks(page), threshold));

        state.select(filter, threshold);
        host.set_displayed_tracks(page, state.active_view());
    }

    /// Handles a change of the selected page, returning the filter the page
    /// should show.
    ///
    /// A page seen for the first time starts on `All` and is not refreshed,
    /// it already displays its unfiltered tracks.
    pub(crate) fn on_page_selected<H>(&mut self, host: &mut H, page: &P) -> FilterKind
    where
        H: PageHost<P, E>,
    {
        debug!("Page changed to {:?}", page);

        self.selected = Some(page.clone());
        let threshold = self.current_threshold();

        match self.pages.get_mut(page) {
            Some(state) => {
                let filter = state.active_filter;
                state.select(filter, threshold);
                host.set_displayed_tracks(page, state.active_view());
                filter
            }
            None => {
                let state = PageState::new(host.unfiltered_tracks(page), threshold);
                self.pages.insert(page.clone(), state);
                FilterKind::All
            }
        }
    }

    /// Handles replacement of a page's unfiltered tracks, for example when
    /// the search scope changes.
    ///
    /// Pages that were never visited are ignored.
    pub(crate) fn on_source_changed<H>(&mut self, host: &mut H, page: &P)
    where
        H: PageHost<P, E>,
    {
        let threshold = self.current_threshold();
        let Some(state) = self.pages.get_mut(page) else {
            return;
        };

        debug!("Source changed on page {:?}", page);

        state.rebuild(host.unfiltered_tracks(page), threshold);
        host.set_displayed_tracks(page, state.active_view());
    }

    /// Handles a rating change of a single track.
    ///
    /// Rated views of every page containing the track are evicted. The
    /// selected page is refreshed only if it contains the track.
    pub(crate) fn on_rating_changed<H>(&mut self, host: &mut H, entry: &E)
    where
        H: PageHost<P, E>,
    {
        let id = entry.entry_id();
        let mut selected_affected = false;

        for (page, state) in self.pages.iter_mut() {
            if state.all().iter().any(|e| e.entry_id() == id) {
                debug!("Rating changed on page {:?}, dropping rated views", page);
                state.evict_rated_views();
                selected_affected |= self.selected.as_ref() == Some(page);
            }
        }

        if !selected_affected {
            return;
        }

        if let Some(page) = self.selected.clone() {
            let filter = self.pages[&page].active_filter;
            self.select_filter(host, &page, filter);
        }
    }

    /// Handles a change of the favourites threshold.
    ///
    /// Every page currently showing `Favourites` is recomputed and refreshed
    /// straight away. Other pages catch up when `Favourites` is next selected.
    pub(crate) fn on_threshold_changed<H>(&mut self, host: &mut H)
    where
        H: PageHost<P, E>,
    {
        let threshold = self.current_threshold();

        for (page, state) in self.pages.iter_mut() {
            if state.active_filter == FilterKind::Favourites {
                debug!("Favourites threshold changed, refreshing view on page {:?}", page);
                state.select(FilterKind::Favourites, threshold);
                host.set_displayed_tracks(page, state.active_view());
            }
        }
    }

    /// Puts every visited page back on its unfiltered tracks and forgets all
    /// cached state.
    pub(crate) fn deactivate<H>(&mut self, host: &mut H)
    where
        H: PageHost<P, E>,
    {
        for (page, state) in self.pages.drain() {
            host.set_displayed_tracks(&page, ViewModel::clone(state.all()));
        }
        self.selected = None;
    }

    pub(crate) fn active_filter(&self, page: &P) -> Option<FilterKind> {
        self.pages.get(page).map(|state| state.active_filter)
    }

    #[cfg(test)]
    pub(crate) fn is_visited(&self, page: &P) -> bool {
        self.pages.contains_key(page)
    }

    #[cfg(test)]
    pub(crate) fn selected_page(&self) -> Option<&P> {
        self.selected.as_ref()
    }

    /// Filters with a cached view on `page`, in toggle order.
    #[cfg(test)]
    pub(crate) fn cached_filters(&self, page: &P) -> Vec<FilterKind> {
        let Some(state) = self.pages.get(page) else {
            return vec![];
        };

        FilterKind::ALL
            .into_iter()
            .filter(|filter| state.views.contains_key(filter))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::filter::testing::{RecordingHost, TestEntry, rated_tracks};

    type TestCache = FilterCache<&'static str, TestEntry, Rc<Cell<Threshold>>>;

    const LIBRARY: &str = "library";
    const PLAYLIST: &str = "playlist";

    fn threshold(stars: u8) -> Rc<Cell<Threshold>> {
        Rc::new(Cell::new(Threshold::new(stars).unwrap()))
    }

    fn library_host() -> RecordingHost {
        RecordingHost::with_page(LIBRARY, rated_tracks(&[0.0, 0.0, 2.0, 3.0, 5.0, 5.0]))
    }

    #[test]
    fn first_page_visit_starts_on_all_without_refresh() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        let filter = cache.on_page_selected(&mut host, &LIBRARY);

        assert_eq!(filter, FilterKind::All);
        assert!(cache.is_visited(&LIBRARY));
        assert_eq!(cache.selected_page(), Some(&LIBRARY));
        assert_eq!(cache.cached_filters(&LIBRARY), vec![FilterKind::All]);
        assert!(host.refreshes.is_empty());
    }

    #[test]
    fn select_filter_initialises_unvisited_page() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(4));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);

        assert_eq!(cache.active_filter(&LIBRARY), Some(FilterKind::Favourites));
        assert_eq!(host.displayed_ids(LIBRARY), vec![4, 5]);
        assert_eq!(host.refresh_count(LIBRARY), 1);
        assert_eq!(
            cache.cached_filters(&LIBRARY),
            vec![FilterKind::All, FilterKind::Favourites]
        );
    }

    #[test]
    fn select_filter_computes_only_the_requested_view() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.on_page_selected(&mut host, &LIBRARY);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);

        assert_eq!(host.displayed_ids(LIBRARY), vec![0, 1]);
        assert_eq!(
            cache.cached_filters(&LIBRARY),
            vec![FilterKind::All, FilterKind::Unrated]
        );
    }

    #[test]
    fn repeated_selection_reuses_the_cached_view() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        let first = Rc::clone(&host.displayed[LIBRARY]);

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        let second = Rc::clone(&host.displayed[LIBRARY]);

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(host.refresh_count(LIBRARY), 2);
    }

    #[test]
    fn all_view_is_the_page_source() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::All);

        assert!(Rc::ptr_eq(&host.displayed[LIBRARY], &host.sources[LIBRARY]));
    }

    #[test]
    fn threshold_change_refreshes_favourites_page_once() {
        let shared = threshold(3);
        let mut host = library_host();
        let mut cache = TestCache::new(Rc::clone(&shared));

        cache.on_page_selected(&mut host, &LIBRARY);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        assert_eq!(host.displayed_ids(LIBRARY), vec![3, 4, 5]);
        host.refreshes.clear();

        shared.set(Threshold::new(1).unwrap());
        cache.on_threshold_changed(&mut host);

        assert_eq!(host.displayed_ids(LIBRARY), vec![2, 3, 4, 5]);
        assert_eq!(host.refresh_count(LIBRARY), 1);
    }

    #[test]
    fn threshold_change_leaves_other_filters_alone() {
        let shared = threshold(3);
        let mut host = library_host();
        let mut cache = TestCache::new(Rc::clone(&shared));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        host.refreshes.clear();

        shared.set(Threshold::new(5).unwrap());
        cache.on_threshold_changed(&mut host);
        assert!(host.refreshes.is_empty());

        // The stale favourites view is recomputed on the next selection
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        assert_eq!(host.displayed_ids(LIBRARY), vec![4, 5]);
    }

    #[test]
    fn stale_favourites_detected_after_visiting_another_filter() {
        let shared = threshold(3);
        let mut host = library_host();
        let mut cache = TestCache::new(Rc::clone(&shared));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::All);

        shared.set(Threshold::new(5).unwrap());
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);

        assert_eq!(host.displayed_ids(LIBRARY), vec![4, 5]);
    }

    #[test]
    fn rating_change_evicts_rated_views_and_refreshes_selected_page() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.on_page_selected(&mut host, &LIBRARY);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);
        host.refreshes.clear();

        let track = Rc::clone(&host.sources[LIBRARY][0]);
        track.rating.set(4.0);
        cache.on_rating_changed(&mut host, &track);

        assert_eq!(host.refresh_count(LIBRARY), 1);
        assert_eq!(host.displayed_ids(LIBRARY), vec![0, 3, 4, 5]);
        assert_eq!(cache.active_filter(&LIBRARY), Some(FilterKind::Favourites));
        assert_eq!(
            cache.cached_filters(&LIBRARY),
            vec![FilterKind::All, FilterKind::Favourites]
        );
    }

    #[test]
    fn rating_change_on_absent_track_does_nothing() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.on_page_selected(&mut host, &LIBRARY);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        host.refreshes.clear();

        let stranger = Rc::clone(&rated_tracks(&[0.0; 10])[9]);
        cache.on_rating_changed(&mut host, &stranger);

        assert!(host.refreshes.is_empty());
        assert_eq!(
            cache.cached_filters(&LIBRARY),
            vec![FilterKind::All, FilterKind::Unrated]
        );
    }

    #[test]
    fn rating_change_on_background_page_evicts_without_refresh() {
        let tracks = rated_tracks(&[0.0, 4.0, 5.0]);
        let mut host = RecordingHost::with_page(LIBRARY, tracks[..1].iter().cloned().collect());
        host.sources.insert(PLAYLIST, tracks[1..].iter().cloned().collect());
        let mut cache = TestCache::new(threshold(3));

        cache.on_page_selected(&mut host, &PLAYLIST);
        cache.select_filter(&mut host, &PLAYLIST, FilterKind::Favourites);
        cache.on_page_selected(&mut host, &LIBRARY);
        host.refreshes.clear();

        tracks[1].rating.set(0.0);
        cache.on_rating_changed(&mut host, &tracks[1]);

        assert!(host.refreshes.is_empty());
        assert_eq!(cache.cached_filters(&PLAYLIST), vec![FilterKind::All]);

        cache.on_page_selected(&mut host, &PLAYLIST);
        assert_eq!(host.displayed_ids(PLAYLIST), vec![2]);
    }

    #[test]
    fn source_change_rebuilds_all_and_active_view() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Favourites);

        let narrowed: ViewModel<TestEntry> = host.sources[LIBRARY][..4].iter().cloned().collect();
        host.sources.insert(LIBRARY, narrowed);
        host.refreshes.clear();

        cache.on_source_changed(&mut host, &LIBRARY);

        assert_eq!(host.displayed_ids(LIBRARY), vec![3]);
        assert_eq!(host.refresh_count(LIBRARY), 1);
        assert_eq!(
            cache.cached_filters(&LIBRARY),
            vec![FilterKind::All, FilterKind::Favourites]
        );
    }

    #[test]
    fn source_change_on_unvisited_page_is_ignored() {
        let mut host = library_host();
        let mut cache = TestCache::new(threshold(3));

        cache.on_source_changed(&mut host, &LIBRARY);

        assert!(!cache.is_visited(&LIBRARY));
        assert!(host.refreshes.is_empty());
    }

    #[test]
    fn returning_to_a_page_restores_its_filter() {
        let mut host = library_host();
        host.sources.insert(PLAYLIST, rated_tracks(&[1.0, 0.0]));
        let mut cache = TestCache::new(threshold(3));

        cache.on_page_selected(&mut host, &LIBRARY);
        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);

        assert_eq!(cache.on_page_selected(&mut host, &PLAYLIST), FilterKind::All);
        assert_eq!(cache.on_page_selected(&mut host, &LIBRARY), FilterKind::Unrated);
        assert_eq!(host.displayed_ids(LIBRARY), vec![0, 1]);
    }

    #[test]
    fn deactivate_restores_unfiltered_views_and_forgets_pages() {
        let mut host = library_host();
        host.sources.insert(PLAYLIST, rated_tracks(&[1.0, 0.0]));
        let mut cache = TestCache::new(threshold(3));

        cache.select_filter(&mut host, &LIBRARY, FilterKind::Unrated);
        cache.select_filter(&mut host, &PLAYLIST, FilterKind::Favourites);

        cache.deactivate(&mut host);

        assert_eq!(host.displayed_ids(LIBRARY), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(host.displayed_ids(PLAYLIST), vec![0, 1]);
        assert!(!cache.is_visited(&LIBRARY));
        assert!(!cache.is_visited(&PLAYLIST));
        assert_eq!(cache.selected_page(), None);
    }
}
