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

//! UI rendering logic for the preferences dialog.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Padding},
};

use crate::{components::PreferencesView, filter::Threshold, theme::Theme};

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 9;

impl PreferencesView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.is_active {
            return;
        }

        let area = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);

        let items = Threshold::CHOICES
            .iter()
            .map(|choice| ListItem::new(Line::from(choice.to_string())));

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Favourites threshold ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent_colour))
                    .padding(Padding::horizontal(1)),
            )
            .style(Style::default().bg(theme.background_colour))
            .highlight_style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
