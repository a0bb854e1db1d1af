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

//! UI rendering logic for the filter toggles.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Padding, Block, Tabs},
};

use crate::{components::FilterToggles, filter::FilterKind, theme::Theme};

impl FilterToggles {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_registered() {
            return;
        }

        let titles = FilterKind::ALL.map(|filter| Line::from(filter.label()));

        let tabs = Tabs::new(titles)
            .select(self.current().index())
            .style(Style::default().fg(theme.toggle_fg))
            .highlight_style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("|")
            .block(Block::default().padding(Padding::horizontal(1)));

        f.render_widget(tabs, area);
    }
}
