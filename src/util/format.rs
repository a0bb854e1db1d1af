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

//! Conversion of raw values into strings for the UI.

use crate::render::icons::{ICON_STAR_EMPTY, ICON_STAR_FILLED};

const MAX_STARS: usize = 5;

/// Formats a duration in seconds into a human-readable `MM:SS` string.
///
/// This is used primarily for displaying track durations in the track table.
///
/// # Arguments
///
/// * `total_seconds` - The duration to format, represented as a 64-bit integer.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65), "01:05");
/// assert_eq!(format_time(3600), "60:00");
/// ```
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats a star rating as five star glyphs, filled up to the rating rounded
/// to the nearest whole star.
pub(crate) fn format_stars(rating: f64) -> String {
    let filled = (rating.round().clamp(0.0, MAX_STARS as f64)) as usize;

    let mut stars = ICON_STAR_FILLED.repeat(filled);
    stars.push_str(&ICON_STAR_EMPTY.repeat(MAX_STARS - filled));
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn formats_whole_stars() {
        assert_eq!(format_stars(0.0), "☆☆☆☆☆");
        assert_eq!(format_stars(3.0), "★★★☆☆");
        assert_eq!(format_stars(5.0), "★★★★★");
    }

    #[test]
    fn rounds_and_clamps_ratings() {
        assert_eq!(format_stars(2.6), "★★★☆☆");
        assert_eq!(format_stars(7.0), "★★★★★");
        assert_eq!(format_stars(-1.0), "☆☆☆☆☆");
    }
}
