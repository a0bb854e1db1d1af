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

//! Terminal background colour control.
//!
//! The background is changed with OSC 11 and restored with OSC 111. Most
//! modern terminals (XTerm, iTerm2, Alacritty, Kitty) support these
//! sequences; others ignore them.

use std::io::{self, Write};

const OSC_SET_BG: &str = "\x1b]11;";
const OSC_RESET_BG: &str = "\x1b]111";
const BEL: &str = "\x07";

fn write_bg(out: &mut impl Write, hex_color: &str) -> io::Result<()> {
    write!(out, "{OSC_SET_BG}{hex_color}{BEL}")?;
    out.flush()
}

fn write_reset_bg(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{OSC_RESET_BG}{BEL}")?;
    out.flush()
}

/// Sets the terminal background to a colour such as `"#1e1e1e"`.
///
/// Best effort, a terminal that cannot be written to keeps its background.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    write_bg(&mut io::stdout(), hex_color).ok();
}

/// Resets the terminal background to the user's own configuration.
pub(crate) fn reset_terminal_bg() {
    write_reset_bg(&mut io::stdout()).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_osc_sequences() {
        let mut out = Vec::new();
        write_bg(&mut out, "#281432").unwrap();
        write_reset_bg(&mut out).unwrap();

        assert_eq!(out, b"\x1b]11;#281432\x07\x1b]111\x07");
    }
}
