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

//! UI rendering logic for the page sidebar.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    components::PageList, filter::FilterKind, model::library::Library, plugin::RatingFilters,
    theme::Theme,
};

impl PageList {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        library: &Library,
        filters: &RatingFilters,
        theme: &Theme,
    ) {
        let items: Vec<ListItem> = library
            .pages()
            .iter()
            .map(|page| {
                let mut spans = vec![
                    Span::raw(page.name.as_str()),
                    Span::styled(
                        format!(" {}", page.table.len()),
                        Style::default().fg(theme.table_time_fg),
                    ),
                ];

                // Pages showing a subset of their tracks
                if let Some(filter @ (FilterKind::Favourites | FilterKind::Unrated)) =
                    filters.active_filter(page.id)
                {
                    spans.push(Span::styled(
                        format!(" {}", filter),
                        Style::default().fg(theme.table_rating_fg),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        self.list_state.select(Some(library.selected_index()));

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Pages ")
                    .borders(Borders::RIGHT)
                    .border_style(Style::default().fg(theme.border_colour)),
            )
            .highlight_style(
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
