//! Background worker thread: every backend call runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels, one
//! command at a time. The worker creates a private rayon::ThreadPool (not the
//! global pool) for the concurrent reference data fetch.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use tradedesk_core::api::{ApiError, BrokerApi};
use tradedesk_core::domain::{NewOrder, Order, OrderId};
use tradedesk_core::ReferenceData;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    LoadOrders,
    LoadOrder { order_id: OrderId },
    LoadReferenceData,
    SubmitOrder { order: NewOrder },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    OrdersLoaded(Result<Vec<Order>, ApiError>),
    OrderLoaded {
        order_id: OrderId,
        result: Result<Order, ApiError>,
    },
    ReferenceDataLoaded(Result<ReferenceData, ApiError>),
    OrderSubmitted(Result<Order, ApiError>),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    api: Arc<dyn BrokerApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tradedesk-worker".into())
        .spawn(move || worker_loop(api, rx, tx))
}

fn worker_loop(api: Arc<dyn BrokerApi>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    // Two threads: instruments and prices are fetched side by side.
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .thread_name(|i| format!("tradedesk-pool-{i}"))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            error!(error = %e, "failed to build worker rayon pool, using the global pool");
            None
        }
    };

    info!("worker started");
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                debug!(command = ?cmd, "worker command");
                let resp = handle_command(api.as_ref(), pool.as_ref(), cmd);
                if let Some(resp) = resp {
                    if tx.send(resp).is_err() {
                        break;
                    }
                }
            }
        }
    }
    info!("worker stopped");
}

fn handle_command(
    api: &dyn BrokerApi,
    pool: Option<&rayon::ThreadPool>,
    cmd: WorkerCommand,
) -> Option<WorkerResponse> {
    let resp = match cmd {
        WorkerCommand::LoadOrders => WorkerResponse::OrdersLoaded(api.list_orders()),
        WorkerCommand::LoadOrder { order_id } => {
            let result = api.get_order(&order_id);
            WorkerResponse::OrderLoaded { order_id, result }
        }
        WorkerCommand::LoadReferenceData => {
            let result = match pool {
                Some(pool) => pool.install(|| ReferenceData::fetch(api)),
                None => ReferenceData::fetch(api),
            };
            WorkerResponse::ReferenceDataLoaded(result)
        }
        WorkerCommand::SubmitOrder { order } => {
            WorkerResponse::OrderSubmitted(api.create_order(&order))
        }
        WorkerCommand::Shutdown => return None,
    };
    Some(resp)
}
