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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod commander;
pub(crate) mod icons;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    App, Status,
    model::PageId,
    render::{commander::draw_commander, icons::ICON_FILTER},
    theme::Theme,
};

const SIDEBAR_WIDTH: u16 = 24;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a page sidebar and the selected page, with a
/// status line and the command line along the bottom. The preferences dialog,
/// when open, is drawn over everything else.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let theme = app.theme;

    // Outer layout: main, status, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Main layout: sidebar, content
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(outer[0]);

    // Content layout: header, filter toggles, track table
    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(main[1]);

    app.page_list
        .draw(f, main[0], &app.library, &app.filters, &theme);

    draw_header(f, content[0], app);

    app.filters.toggles.draw(f, content[1], &theme);

    app.library
        .selected_page_mut()
        .table
        .as_widget()
        .draw(f, content[2], &theme);

    draw_status(f, outer[1], app);

    draw_commander(f, outer[2], app);

    app.preferences.draw(f, area, &theme);
}

/// Describes how many of a page's tracks the active filter shows.
fn track_count(shown: usize, total: usize) -> String {
    if shown == total {
        format!("  {} tracks", total)
    } else {
        format!("  {} of {} tracks", shown, total)
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let page = app.library.selected_page();

    let mut spans = vec![
        Span::styled(
            page.name.as_str(),
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            track_count(page.table.len(), page.source().len()),
            Style::default().fg(theme.table_time_fg),
        ),
        Span::styled(
            format!("  sort: {}", page.table.sort().label()),
            Style::default().fg(theme.table_time_fg),
        ),
    ];

    let selected = page.table.selected_count();
    if selected > 0 {
        spans.push(Span::styled(
            format!("  {} selected", selected),
            Style::default().fg(theme.accent_colour),
        ));
    }

    if !app.library.search().is_empty() && page.id == PageId::Library {
        spans.push(Span::styled(
            format!("  search: {}", app.library.search()),
            Style::default().fg(theme.table_album_fg),
        ));
    }

    if let Some(filter) = app.filters.active_filter(page.id) {
        spans.push(Span::styled(
            format!("  {} {} ({})", ICON_FILTER, filter, app.filters.threshold()),
            Style::default().fg(theme.table_rating_fg),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (text, fg) = match &app.status {
        Some(Status::Info(text)) => (text.as_str(), theme.commander_colour),
        Some(Status::Error(text)) => (text.as_str(), theme.error_colour),
        None => ("", theme.commander_colour),
    };

    f.render_widget(
        Paragraph::new(format!(" {}", text))
            .style(Style::default().fg(fg).bg(theme.status_bar_colour)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_count_shows_filtered_share() {
        assert_eq!(track_count(3, 3), "  3 tracks");
        assert_eq!(track_count(1, 3), "  1 of 3 tracks");
    }
}
