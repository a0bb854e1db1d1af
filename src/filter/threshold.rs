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

//! The favourites threshold.
//!
//! A track is a favourite when its star rating is at or above the threshold.
//! The value is persisted in the application configuration as a plain
//! integer, and validated on the way in.

use std::{cell::Cell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const MAX_STARS: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ThresholdError {
    #[error("favourites threshold must be between 0 and 5 stars, got {0}")]
    OutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) struct Threshold(u8);

impl Threshold {
    /// Three stars and above.
    pub(crate) const DEFAULT: Threshold = Threshold(3);

    /// Values offered by the preferences dialog, most selective first.
    pub(crate) const CHOICES: [Threshold; 5] = [
        Threshold(5),
        Threshold(4),
        Threshold(3),
        Threshold(2),
        Threshold(1),
    ];

    pub(crate) fn new(stars: u8) -> Result<Self, ThresholdError> {
        if stars > MAX_STARS {
            return Err(ThresholdError::OutOfRange(stars));
        }
        Ok(Self(stars))
    }

    pub(crate) fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Threshold {
    type Error = ThresholdError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            MAX_STARS => write!(f, "{MAX_STARS} stars only"),
            1 => write!(f, "1 star and above"),
            n => write!(f, "{n} stars and above"),
        }
    }
}

/// Supplies the favourites threshold currently in effect.
pub(crate) trait ThresholdProvider {
    fn favourites_threshold(&self) -> Threshold;
}

impl ThresholdProvider for Threshold {
    fn favourites_threshold(&self) -> Threshold {
        *self
    }
}

/// A threshold shared between the settings and the filter cache on the UI
/// thread.
impl ThresholdProvider for Rc<Cell<Threshold>> {
    fn favourites_threshold(&self) -> Threshold {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_than_five_stars() {
        assert_eq!(Threshold::new(6), Err(ThresholdError::OutOfRange(6)));
        assert_eq!(Threshold::try_from(5).map(u8::from), Ok(5));
        assert_eq!(Threshold::new(0).map(Threshold::stars), Ok(0));
    }

    #[test]
    fn defaults_to_three_stars() {
        assert_eq!(Threshold::default().stars(), 3);
        assert!(Threshold::CHOICES.contains(&Threshold::default()));
    }

    #[test]
    fn shared_threshold_follows_updates() {
        let shared = Rc::new(Cell::new(Threshold::DEFAULT));
        let provider = Rc::clone(&shared);

        shared.set(Threshold::new(1).unwrap());
        assert_eq!(provider.favourites_threshold().stars(), 1);
    }

    #[test]
    fn describes_choices() {
        assert_eq!(Threshold::new(5).unwrap().to_string(), "5 stars only");
        assert_eq!(Threshold::new(3).unwrap().to_string(), "3 stars and above");
        assert_eq!(Threshold::new(1).unwrap().to_string(), "1 star and above");
    }
}
