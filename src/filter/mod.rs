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

//! Rating filters for track lists.
//!
//! This module contains the filtering core: the [`FilterKind`] modes shown as
//! toggles in the UI, the [`apply_filter`] function, and the per-page
//! [`FilterCache`] that memoises filtered views.
//!
//! The core knows nothing about the terminal, the database or the
//! configuration file. It talks to the rest of the application through two
//! seams:
//!
//! * [`PageHost`]: reads a page's unfiltered tracks and swaps the tracks a page
//!   displays.
//! * [`ThresholdProvider`]: supplies the current favourites threshold.

mod cache;
mod threshold;

#[cfg(test)]
mod testing;

pub(crate) use cache::FilterCache;
pub(crate) use threshold::{Threshold, ThresholdError, ThresholdProvider};

use std::{fmt, rc::Rc, str::FromStr};

use thiserror::Error;

/// An ordered sequence of tracks as shown by a page.
///
/// Cloning a view is cheap, it only bumps a reference count. The unfiltered
/// view of a page and its `All` view are the same allocation.
pub(crate) type ViewModel<E> = Rc<[E]>;

/// Whole-star rating values, indexed by star count.
const STAR_VALUES: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

/// A track handle that carries a star rating.
pub(crate) trait RatedEntry {
    type Id: Eq;

    /// Identity of the underlying track, stable across pages.
    fn entry_id(&self) -> Self::Id;

    /// Current rating, 0.0 (unrated) to 5.0.
    fn rating(&self) -> f64;
}

/// Page accessors provided by the application hosting the filters.
pub(crate) trait PageHost<P, E> {
    /// Returns the full, unfiltered track sequence of a page.
    fn unfiltered_tracks(&self, page: &P) -> ViewModel<E>;

    /// Replaces the tracks displayed by a page.
    ///
    /// Implementations keep whatever sort order the page currently shows.
    fn set_displayed_tracks(&mut self, page: &P, view: ViewModel<E>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) enum FilterKind {
    #[default]
    All,
    Favourites,
    Unrated,
}

impl FilterKind {
    /// All filters, in toggle order.
    pub(crate) const ALL: [FilterKind; 3] =
        [FilterKind::All, FilterKind::Favourites, FilterKind::Unrated];

    /// Label of the toggle control for this filter.
    pub(crate) fn label(self) -> &'static str {
        match self {
            FilterKind::All => "All Ratings",
            FilterKind::Favourites => "Favourites",
            FilterKind::Unrated => "Unrated",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            FilterKind::All => 0,
            FilterKind::Favourites => 1,
            FilterKind::Unrated => 2,
        }
    }

    /// The next filter in toggle order, wrapping around.
    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::All => "all",
            FilterKind::Favourites => "favourites",
            FilterKind::Unrated => "unrated",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rating filter '{0}', expected one of: all, favourites, unrated")]
pub(crate) struct ParseFilterKindError(String);

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterKind::All),
            "fav" | "favourites" | "favorites" => Ok(FilterKind::Favourites),
            "unrated" => Ok(FilterKind::Unrated),
            _ => Err(ParseFilterKindError(s.to_string())),
        }
    }
}

/// Applies a rating filter to a track sequence.
///
/// * `All` returns `source` itself, no copy is made.
/// * `Favourites` keeps tracks rated with a whole number of stars at or above
///   `threshold`.
/// * `Unrated` keeps tracks with a rating of exactly zero.
///
/// Source order is preserved. Sorting is left to the page displaying the
/// result.
pub(crate) fn apply_filter<E>(
    filter: FilterKind,
    source: &ViewModel<E>,
    threshold: Threshold,
) -> ViewModel<E>
where
    E: RatedEntry + Clone,
{
    match filter {
        FilterKind::All => Rc::clone(source),
        FilterKind::Favourites => {
            let ratings = &STAR_VALUES[usize::from(threshold.stars())..];
            source
                .iter()
                .filter(|entry| ratings.contains(&entry.rating()))
                .cloned()
                .collect()
        }
        FilterKind::Unrated => source
            .iter()
            .filter(|entry| entry.rating() == 0.0)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::testing::{ids, rated_tracks};

    fn threshold(stars: u8) -> Threshold {
        Threshold::new(stars).unwrap()
    }

    #[test]
    fn all_is_the_source_itself() {
        let source = rated_tracks(&[0.0, 3.0, 5.0]);
        let view = apply_filter(FilterKind::All, &source, threshold(3));

        assert!(Rc::ptr_eq(&view, &source));
    }

    #[test]
    fn unrated_ignores_threshold() {
        let source = rated_tracks(&[0.0, 1.0, 0.0, 4.0, 0.0]);

        for stars in 0..=5 {
            let view = apply_filter(FilterKind::Unrated, &source, threshold(stars));
            assert_eq!(ids(&view), vec![0, 2, 4]);
        }
    }

    #[test]
    fn favourites_at_or_above_threshold_in_source_order() {
        let source = rated_tracks(&[0.0, 0.0, 2.0, 3.0, 5.0, 5.0]);

        let favourites = apply_filter(FilterKind::Favourites, &source, threshold(3));
        assert_eq!(ids(&favourites), vec![3, 4, 5]);

        let favourites = apply_filter(FilterKind::Favourites, &source, threshold(4));
        assert_eq!(ids(&favourites), vec![4, 5]);

        let unrated = apply_filter(FilterKind::Unrated, &source, threshold(4));
        assert_eq!(ids(&unrated), vec![0, 1]);
    }

    #[test]
    fn favourites_disjoint_from_unrated_above_zero() {
        let source = rated_tracks(&[0.0, 1.0, 2.0, 0.0, 3.0, 4.0, 5.0]);

        for stars in 1..=5 {
            let favourites = ids(&apply_filter(FilterKind::Favourites, &source, threshold(stars)));
            let unrated = ids(&apply_filter(FilterKind::Unrated, &source, threshold(stars)));
            let all = ids(&apply_filter(FilterKind::All, &source, threshold(stars)));

            assert!(favourites.iter().all(|id| all.contains(id)));
            assert!(favourites.iter().all(|id| !unrated.contains(id)));
        }
    }

    #[test]
    fn zero_threshold_counts_unrated_as_favourite() {
        let source = rated_tracks(&[0.0, 2.0]);
        let favourites = apply_filter(FilterKind::Favourites, &source, threshold(0));

        assert_eq!(ids(&favourites), vec![0, 1]);
    }

    #[test]
    fn raising_threshold_never_grows_favourites() {
        let source = rated_tracks(&[5.0, 0.0, 1.0, 4.0, 2.0, 3.0, 5.0, 1.0]);

        let mut previous = source.len();
        for stars in 0..=5 {
            let count = apply_filter(FilterKind::Favourites, &source, threshold(stars)).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn fractional_ratings_are_not_favourites() {
        let source = rated_tracks(&[3.5, 4.0]);
        let favourites = apply_filter(FilterKind::Favourites, &source, threshold(3));

        assert_eq!(ids(&favourites), vec![1]);
    }

    #[test]
    fn parse_filter_names() {
        assert_eq!("all".parse(), Ok(FilterKind::All));
        assert_eq!("Favourites".parse(), Ok(FilterKind::Favourites));
        assert_eq!("fav".parse(), Ok(FilterKind::Favourites));
        assert_eq!(" unrated ".parse(), Ok(FilterKind::Unrated));
        assert!("loved".parse::<FilterKind>().is_err());
    }

    #[test]
    fn toggle_order_wraps() {
        assert_eq!(FilterKind::All.next(), FilterKind::Favourites);
        assert_eq!(FilterKind::Favourites.next(), FilterKind::Unrated);
        assert_eq!(FilterKind::Unrated.next(), FilterKind::All);
    }
}
