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

//! Library pages and the track registry.
//!
//! This module provides state for the pages listed in the sidebar: the
//! library itself and one page per playlist. Each page keeps its unfiltered
//! tracks (its source) separately from what its track table displays, so the
//! rating filters can swap the displayed tracks without losing the source.
//!
//! Tracks are interned by durable id. A track listed by several pages is the
//! same [`TrackRef`] on all of them.

use std::{collections::HashMap, rc::Rc};

use crate::{
    components::TrackTableState,
    filter::{PageHost, ViewModel},
    model::{LibrarySnapshot, PageId, Playlist, TrackEntry, TrackInfo, TrackRef},
};

const LIBRARY_PAGE_NAME: &str = "Library";

pub(crate) struct Page {
    pub(crate) id: PageId,
    pub(crate) name: String,
    source: ViewModel<TrackRef>,
    pub(crate) table: TrackTableState,
}

impl Page {
    fn new(id: PageId, name: String) -> Self {
        Self {
            id,
            name,
            source: Vec::new().into(),
            table: TrackTableState::new(),
        }
    }

    pub(crate) fn source(&self) -> &ViewModel<TrackRef> {
        &self.source
    }
}

pub(crate) struct Library {
    entries: HashMap<i64, TrackRef>,
    pages: Vec<Page>,
    selected: usize,
    search: String,
}

impl Library {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            pages: vec![Page::new(PageId::Library, LIBRARY_PAGE_NAME.to_string())],
            selected: 0,
            search: String::new(),
        }
    }

    /// Replaces every page with freshly loaded tracks and playlists.
    ///
    /// Playlist pages that no longer exist are removed. Returns the pages whose
    /// tracks were replaced.
    pub(crate) fn load(&mut self, snapshot: LibrarySnapshot) -> Vec<PageId> {
        let mut previous = std::mem::take(&mut self.entries);
        let selected_id = self.selected_page_id();

        let library_tracks = self.intern(&mut previous, snapshot.tracks);
        self.search.clear();
        self.set_source(PageId::Library, library_tracks);

        let mut loaded = vec![PageId::Library];
        for (playlist, tracks) in snapshot.playlists {
            let tracks = self.intern(&mut previous, tracks);
            let id = self.upsert_playlist_page(playlist);
            self.set_source(id, tracks);
            loaded.push(id);
        }

        self.pages.retain(|page| loaded.contains(&page.id));
        self.selected = self
            .pages
            .iter()
            .position(|page| page.id == selected_id)
            .unwrap_or(0);

        loaded
    }

    /// Narrows the library page to the results of a search.
    pub(crate) fn set_search_results(&mut self, search: String, tracks: Vec<TrackInfo>) {
        let tracks = self.intern(&mut HashMap::new(), tracks);
        self.search = search;
        self.set_source(PageId::Library, tracks);
    }

    /// Replaces the tracks of a playlist page, creating the page if needed.
    pub(crate) fn set_playlist(&mut self, playlist: Playlist, tracks: Vec<TrackInfo>) -> PageId {
        let tracks = self.intern(&mut HashMap::new(), tracks);
        let id = self.upsert_playlist_page(playlist);
        self.set_source(id, tracks);
        id
    }

    pub(crate) fn entry(&self, durable_id: i64) -> Option<TrackRef> {
        self.entries.get(&durable_id).cloned()
    }

    pub(crate) fn search(&self) -> &str {
        &self.search
    }

    pub(crate) fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub(crate) fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == id)
    }

    pub(crate) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(crate) fn selected_page(&self) -> &Page {
        &self.pages[self.selected]
    }

    pub(crate) fn selected_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.selected]
    }

    pub(crate) fn selected_page_id(&self) -> PageId {
        self.selected_page().id
    }

    pub(crate) fn select_page(&mut self, id: PageId) -> bool {
        match self.pages.iter().position(|page| page.id == id) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    pub(crate) fn next_page_id(&self) -> PageId {
        let idx = (self.selected + 1) % self.pages.len();
        self.pages[idx].id
    }

    pub(crate) fn previous_page_id(&self) -> PageId {
        let len = self.pages.len();
        let idx = (self.selected + len - 1) % len;
        self.pages[idx].id
    }

    fn upsert_playlist_page(&mut self, playlist: Playlist) -> PageId {
        let id = PageId::Playlist(playlist.id);
        match self.page_mut(id) {
            Some(page) => page.name = playlist.name,
            None => self.pages.push(Page::new(id, playlist.name)),
        }
        id
    }

    fn set_source(&mut self, id: PageId, tracks: ViewModel<TrackRef>) {
        if let Some(page) = self.page_mut(id) {
            page.source = Rc::clone(&tracks);
            page.table.set_tracks(tracks);
        }
    }

    /// Maps database rows to shared entries, reusing the entry of a track
    /// already known either to the registry or to `previous`.
    ///
    /// A known entry keeps its rating. Ratings are only changed on the UI
    /// thread, and a worker reply may have been read before the latest rating
    /// reached the database.
    fn intern(
        &mut self,
        previous: &mut HashMap<i64, TrackRef>,
        tracks: Vec<TrackInfo>,
    ) -> ViewModel<TrackRef> {
        let mut entries = Vec::with_capacity(tracks.len());

        for info in tracks {
            let known = self
                .entries
                .get(&info.durable_id)
                .cloned()
                .or_else(|| previous.remove(&info.durable_id));

            let entry = match known {
                Some(entry) => entry,
                None => Rc::new(TrackEntry::new(info)),
            };

            self.entries.insert(entry.durable_id(), Rc::clone(&entry));
            entries.push(entry);
        }

        entries.into()
    }
}

impl PageHost<PageId, TrackRef> for Library {
    fn unfiltered_tracks(&self, page: &PageId) -> ViewModel<TrackRef> {
        let page = self
            .page(*page)
            .expect("rating filters only visit pages listed in the library");
        Rc::clone(&page.source)
    }

    fn set_displayed_tracks(&mut self, page: &PageId, view: ViewModel<TrackRef>) {
        // A page removed by a reload may still be known to the filters
        if let Some(page) = self.page_mut(*page) {
            page.table.set_tracks(view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_track;

    fn playlist(id: i64, name: &str) -> Playlist {
        Playlist {
            id,
            name: name.to_string(),
        }
    }

    fn snapshot() -> LibrarySnapshot {
        LibrarySnapshot {
            tracks: vec![
                test_track(1, "one", 0.0),
                test_track(2, "two", 3.0),
                test_track(3, "three", 5.0),
            ],
            playlists: vec![(playlist(7, "Mix"), vec![test_track(3, "three", 5.0)])],
        }
    }

    #[test]
    fn load_creates_playlist_pages() {
        let mut library = Library::new();
        let loaded = library.load(snapshot());

        assert_eq!(loaded, vec![PageId::Library, PageId::Playlist(7)]);
        assert_eq!(library.pages().len(), 2);
        assert_eq!(library.pages()[1].name, "Mix");
        assert_eq!(library.page(PageId::Library).unwrap().source().len(), 3);
    }

    #[test]
    fn pages_share_track_entries() {
        let mut library = Library::new();
        library.load(snapshot());

        let in_library = &library.page(PageId::Library).unwrap().source()[2];
        let in_playlist = &library.page(PageId::Playlist(7)).unwrap().source()[0];
        assert!(Rc::ptr_eq(in_library, in_playlist));

        in_library.set_rating(1.0);
        assert_eq!(in_playlist.rating(), 1.0);
    }

    #[test]
    fn reload_keeps_entries_and_drops_missing_playlists() {
        let mut library = Library::new();
        library.load(snapshot());
        let before = library.entry(2).unwrap();

        library.select_page(PageId::Playlist(7));
        library.load(LibrarySnapshot {
            tracks: vec![test_track(2, "two", 3.0)],
            playlists: vec![],
        });

        assert!(Rc::ptr_eq(&before, &library.entry(2).unwrap()));
        assert!(library.entry(1).is_none());
        assert_eq!(library.pages().len(), 1);
        assert_eq!(library.selected_page_id(), PageId::Library);
    }

    #[test]
    fn search_results_replace_library_source() {
        let mut library = Library::new();
        library.load(snapshot());

        library.set_search_results("thr".to_string(), vec![test_track(3, "three", 5.0)]);

        assert_eq!(library.search(), "thr");
        let source = library.unfiltered_tracks(&PageId::Library);
        assert_eq!(source.len(), 1);
        assert!(Rc::ptr_eq(&source[0], &library.entry(3).unwrap()));
    }

    #[test]
    fn replies_keep_the_live_rating() {
        let mut library = Library::new();
        library.load(snapshot());
        let entry = library.entry(3).unwrap();
        entry.set_rating(0.0);

        library.set_search_results("thr".to_string(), vec![test_track(3, "three", 5.0)]);
        library.set_playlist(playlist(7, "Mix"), vec![test_track(3, "three", 5.0)]);
        library.load(snapshot());

        assert!(Rc::ptr_eq(&entry, &library.entry(3).unwrap()));
        assert_eq!(entry.rating(), 0.0);
    }

    #[test]
    fn page_navigation_wraps() {
        let mut library = Library::new();
        library.load(snapshot());

        assert_eq!(library.next_page_id(), PageId::Playlist(7));
        assert_eq!(library.previous_page_id(), PageId::Playlist(7));

        assert!(library.select_page(PageId::Playlist(7)));
        assert_eq!(library.next_page_id(), PageId::Library);
        assert!(!library.select_page(PageId::Playlist(99)));
    }

    #[test]
    fn displayed_tracks_do_not_touch_source() {
        let mut library = Library::new();
        library.load(snapshot());

        let source = library.unfiltered_tracks(&PageId::Library);
        let favourites: ViewModel<TrackRef> = source[1..].iter().cloned().collect();
        library.set_displayed_tracks(&PageId::Library, favourites);

        let page = library.page(PageId::Library).unwrap();
        assert_eq!(page.source().len(), 3);
        assert_eq!(page.table.len(), 2);
    }

    #[test]
    fn displaying_on_a_removed_page_is_ignored() {
        let mut library = Library::new();
        library.set_displayed_tracks(&PageId::Playlist(1), Vec::new().into());

        assert_eq!(library.pages().len(), 1);
    }
}
