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

//! Keyboard routing.
//!
//! Key presses go to the first interested party, in order: the preferences
//! dialog while it is open, the command line, the global bindings, and
//! finally the track table of the selected page.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{
    App,
    components::TrackTableAction,
    events::AppEvent,
    filter::FilterKind,
};

/// Maps keyboard input to application events.
///
/// # Errors
///
/// Returns an error if an event fails to send.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    if app.preferences.is_active {
        return app.preferences.process_event(&event, &app.event_tx);
    }

    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if process_global_key_event(app, key)? {
        return Ok(());
    }

    let action = app.library.selected_page_mut().table.process_event(&event);
    if let Some(TrackTableAction::Rate(durable_id, rating)) = action {
        app.event_tx.send(AppEvent::RateTrack(durable_id, rating))?;
    }

    Ok(())
}

/// Handles application-wide bindings, returning whether the key was used.
fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    let event = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => AppEvent::ExitApplication,

        // Pages
        (KeyCode::Char(']'), _) | (KeyCode::Char('J'), _) => {
            AppEvent::PageSelected(app.library.next_page_id())
        }
        (KeyCode::Char('['), _) | (KeyCode::Char('K'), _) => {
            AppEvent::PageSelected(app.library.previous_page_id())
        }

        // Rating filter toggles
        (KeyCode::Char('a'), KeyModifiers::NONE) => AppEvent::FilterToggled(FilterKind::All),
        (KeyCode::Char('f'), KeyModifiers::NONE) => AppEvent::FilterToggled(FilterKind::Favourites),
        (KeyCode::Char('u'), KeyModifiers::NONE) => AppEvent::FilterToggled(FilterKind::Unrated),
        (KeyCode::Tab, _) => AppEvent::CycleFilter,

        (KeyCode::Char('p'), KeyModifiers::NONE) => AppEvent::OpenPreferences,

        (KeyCode::Char('/'), _) => {
            app.commander.open_with("find ");
            return Ok(true);
        }

        _ => return Ok(false),
    };

    app.event_tx.send(event)?;

    Ok(true)
}
