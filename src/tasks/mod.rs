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

//! Background application task processing.
//!
//! This module implements the command pattern used to offload tasks such as
//! potentially blocking database queries from the main UI thread. It provides
//! a dedicated worker loop that translates [`AppTask`] requests into database
//! operations and broadcasts the results back to the application via
//! [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;
use handlers::*;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use rusqlite::Connection;
use tracing::{error, info};

use crate::{config::AppConfig, db, events::AppEvent};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Load the library tracks and every playlist.
    LoadLibrary,

    ScanCatalog,

    Search(String),

    /// Persist the star rating of the track with the given durable id.
    RateTrack(i64, f64),

    /// Append tracks, by durable id, to the named playlist.
    AddToPlaylist(String, Vec<i64>),
}

/// Spawns a background thread to process application tasks.
///
/// This worker thread initializes its own database connection and enters
/// a blocking loop, listening for incoming [`AppTask`]s. The loop ends when
/// every sender of the task channel has been dropped.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn = match db::init_db(&config.database_file) {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to initialise database: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
                return;
            }
        };

        info!("Task worker started");

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                config: &config,
                event_tx: &event_tx,
                conn: &mut conn,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }

        info!("Task worker stopped");
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    config: &'a AppConfig,
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadLibrary => load_library(ctx),
        AppTask::ScanCatalog => scan_catalog(ctx),
        AppTask::Search(text) => search(ctx, text),
        AppTask::RateTrack(durable_id, rating) => rate_track(ctx, durable_id, rating),
        AppTask::AddToPlaylist(name, durable_ids) => add_to_playlist(ctx, name, durable_ids),
    }
}
