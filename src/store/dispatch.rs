//! Request dispatcher
//!
//! Runs each store request on its own worker thread and queues the responses for
//! the UI loop to pick up between frames. Requests are never cancelled; a slow
//! response arrives whenever it arrives and the state decides what to keep.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::client::{FactStore, StoreError};
use super::request::{execute, StoreRequest, StoreResponse};

pub struct Dispatcher {
    store: Arc<dyn FactStore>,
    tx: Sender<StoreResponse>,
    rx: Receiver<StoreResponse>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { store, tx, rx }
    }

    /// Start a request in the background
    pub fn dispatch(&self, request: StoreRequest) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let id = request.id();
        log::debug!("Dispatching request {}: {:?}", id, request);
        let undelivered = request.clone();

        let spawned = thread::Builder::new()
            .name(format!("store-request-{}", id.0))
            .spawn(move || {
                let response = execute(store.as_ref(), request);
                // Receiver only goes away on shutdown
                let _ = tx.send(response);
            });

        if let Err(e) = spawned {
            self.report_undelivered(&undelivered, e);
        }
    }

    /// Answer a request that never reached a worker with a transport failure
    fn report_undelivered(&self, request: &StoreRequest, error: io::Error) {
        log::error!("Failed to spawn worker for request {}: {}", request.id(), error);
        let failure = StoreError::Transport(format!("could not start request worker: {}", error));
        let _ = self.tx.send(request.failed(failure));
    }

    /// Responses that have arrived since the last poll, in arrival order
    pub fn poll(&self) -> Vec<StoreResponse> {
        self.rx.try_iter().collect()
    }

    /// Block until the next response arrives or `timeout` elapses
    pub fn wait(&self, timeout: Duration) -> Option<StoreResponse> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) => None,
            // We hold a sender ourselves, so the channel cannot disconnect
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
