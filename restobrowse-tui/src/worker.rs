//! Background worker thread: all backend calls run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each
//! request is handed to a private rayon::ThreadPool (not the global pool),
//! so responses come back in completion order, not issue order. The main
//! thread sorts that out with request tokens.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use restobrowse_core::{
    ApiError, ModeOutcome, RequestMode, RequestToken, RestaurantApi, RestaurantDetail,
    RestaurantId,
};

/// Commands sent from the TUI to the worker.
///
/// `epoch` identifies the screen mount that issued the request; the main
/// thread ignores responses addressed to a screen that is gone.
#[derive(Debug)]
pub enum WorkerCommand {
    Execute {
        epoch: u64,
        token: RequestToken,
        mode: RequestMode,
    },
    FetchDetail {
        epoch: u64,
        token: RequestToken,
        id: RestaurantId,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    List {
        epoch: u64,
        token: RequestToken,
        outcome: Result<ModeOutcome, ApiError>,
    },
    Detail {
        epoch: u64,
        token: RequestToken,
        outcome: Result<RestaurantDetail, ApiError>,
    },
}

/// Spawn the background worker thread with a private pool of `threads`
/// request threads.
pub fn spawn_worker(
    api: Arc<dyn RestaurantApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    threads: usize,
) -> Result<JoinHandle<()>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("restobrowse-http-{i}"))
        .build()
        .context("failed to build worker request pool")?;

    thread::Builder::new()
        .name("restobrowse-worker".into())
        .spawn(move || worker_loop(api, rx, tx, pool))
        .context("failed to spawn worker thread")
}

fn worker_loop(
    api: Arc<dyn RestaurantApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    pool: rayon::ThreadPool,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &api, &tx, &pool),
        }
    }
    tracing::debug!("worker stopped");
}

fn handle_command(
    cmd: WorkerCommand,
    api: &Arc<dyn RestaurantApi>,
    tx: &Sender<WorkerResponse>,
    pool: &rayon::ThreadPool,
) {
    let api = Arc::clone(api);
    let tx = tx.clone();
    match cmd {
        WorkerCommand::Execute { epoch, token, mode } => {
            pool.spawn(move || {
                let outcome = api.execute(&mode);
                let _ = tx.send(WorkerResponse::List {
                    epoch,
                    token,
                    outcome,
                });
            });
        }
        WorkerCommand::FetchDetail { epoch, token, id } => {
            pool.spawn(move || {
                let outcome = api.detail(id);
                let _ = tx.send(WorkerResponse::Detail {
                    epoch,
                    token,
                    outcome,
                });
            });
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}
