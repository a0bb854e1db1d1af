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

//! Test doubles for the filter core.

use std::{cell::Cell, collections::HashMap, rc::Rc};

use crate::filter::{PageHost, RatedEntry, ViewModel};

#[derive(Debug)]
pub(crate) struct TestTrack {
    pub(crate) id: u32,
    pub(crate) rating: Cell<f64>,
}

pub(crate) type TestEntry = Rc<TestTrack>;

impl RatedEntry for Rc<TestTrack> {
    type Id = u32;

    fn entry_id(&self) -> u32 {
        self.id
    }

    fn rating(&self) -> f64 {
        self.rating.get()
    }
}

/// Builds a view of tracks numbered from zero with the given ratings.
pub(crate) fn rated_tracks(ratings: &[f64]) -> ViewModel<TestEntry> {
    ratings
        .iter()
        .enumerate()
        .map(|(id, rating)| {
            Rc::new(TestTrack {
                id: id as u32,
                rating: Cell::new(*rating),
            })
        })
        .collect()
}

pub(crate) fn ids(view: &ViewModel<TestEntry>) -> Vec<u32> {
    view.iter().map(|track| track.id).collect()
}

/// A page host that records every refresh.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub(crate) sources: HashMap<&'static str, ViewModel<TestEntry>>,
    pub(crate) displayed: HashMap<&'static str, ViewModel<TestEntry>>,
    pub(crate) refreshes: Vec<&'static str>,
}

impl RecordingHost {
    pub(crate) fn with_page(page: &'static str, source: ViewModel<TestEntry>) -> Self {
        let mut host = Self::default();
        host.sources.insert(page, source);
        host
    }

    pub(crate) fn displayed_ids(&self, page: &'static str) -> Vec<u32> {
        self.displayed.get(page).map(ids).unwrap_or_default()
    }

    pub(crate) fn refresh_count(&self, page: &'static str) -> usize {
        self.refreshes.iter().filter(|p| **p == page).count()
    }
}

impl PageHost<&'static str, TestEntry> for RecordingHost {
    fn unfiltered_tracks(&self, page: &&'static str) -> ViewModel<TestEntry> {
        Rc::clone(self.sources.get(page).expect("test page has a source"))
    }

    fn set_displayed_tracks(&mut self, page: &&'static str, view: ViewModel<TestEntry>) {
        self.refreshes.push(*page);
        self.displayed.insert(*page, view);
    }
}
