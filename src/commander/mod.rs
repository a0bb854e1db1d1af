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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching a corresponding
//! application event when typing is finished and a command is submitted.
//!
//! # Commands
//!
//! * `q` - quit.
//! * `find [text]` - narrow the library page to matching tracks, or clear the
//!   search when no text is given.
//! * `filter <all|favourites|unrated>` - show a rating filter on the selected
//!   page.
//! * `threshold <0-5>` - set the favourites threshold.
//! * `filters <on|off>` - activate or deactivate the rating filters.
//! * `pl add <name>` - add the selected tracks to a playlist.
//! * `prefs` - open the preferences dialog.
//! * `scan` - rescan the media directories.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    events::AppEvent,
    filter::{FilterKind, ParseFilterKindError, Threshold, ThresholdError},
};

#[derive(Debug, Error, PartialEq)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Filter(#[from] ParseFilterKindError),

    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Opens the command line with some text already typed.
    pub(crate) fn open_with(&mut self, text: &str) {
        self.input = Input::new(text.to_string());
        self.active = true;
    }

    /// Handles a terminal event, returning whether the command line consumed
    /// it.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                match parse_command(&buffer) {
                    Ok(Some(event)) => event_tx.send(event)?,
                    Ok(None) => {}
                    Err(e) => event_tx.send(AppEvent::Error(e.to_string()))?,
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

/// Parses a command line into the application event it requests.
///
/// An empty command line requests nothing.
pub(crate) fn parse_command(buffer: &str) -> Result<Option<AppEvent>, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        [] => return Ok(None),

        ["q"] => AppEvent::ExitApplication,

        ["scan"] => AppEvent::ScanCatalog,

        ["prefs"] => AppEvent::OpenPreferences,

        ["find", text @ ..] => AppEvent::Search(text.join(" ")),

        ["filter", name] => AppEvent::FilterToggled(name.parse::<FilterKind>()?),
        ["filter", ..] => return Err(CommandError::Usage("filter <all|favourites|unrated>")),

        ["threshold", stars] => {
            let stars: u8 = stars
                .parse()
                .map_err(|_| CommandError::Usage("threshold <0-5>"))?;
            AppEvent::SetThreshold(Threshold::new(stars)?)
        }
        ["threshold", ..] => return Err(CommandError::Usage("threshold <0-5>")),

        ["filters", "on"] => AppEvent::SetFiltersActive(true),
        ["filters", "off"] => AppEvent::SetFiltersActive(false),
        ["filters", ..] => return Err(CommandError::Usage("filters <on|off>")),

        ["pl", "add", name @ ..] if !name.is_empty() => {
            AppEvent::AddSelectionToPlaylist(name.join(" "))
        }
        ["pl", ..] => return Err(CommandError::Usage("pl add <name>")),

        [cmd, ..] => return Err(CommandError::Unknown(cmd.to_string())),
    };

    Ok(Some(event))
}
