//! Session: application state wired to a store dispatcher

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::state::AppState;
use crate::facts::{CategoryFilter, FactId, VoteColumn};
use crate::store::{Dispatcher, FactStore, StoreRequest};

/// Running application: state plus the worker plumbing that serves its requests
pub struct Session {
    state: AppState,
    dispatcher: Dispatcher,
}

impl Session {
    pub fn new(store: Arc<dyn FactStore>, fetch_limit: usize, toast_lifetime: Duration) -> Self {
        Self {
            state: AppState::new(fetch_limit, toast_lifetime),
            dispatcher: Dispatcher::new(store),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    fn issue(&self, request: Option<StoreRequest>) {
        if let Some(request) = request {
            self.dispatcher.dispatch(request);
        }
    }

    /// Kick off the initial fetch
    pub fn start(&mut self) {
        let request = self.state.start();
        self.issue(Some(request));
    }

    pub fn select_category(&mut self, filter: CategoryFilter) {
        let request = self.state.select_category(filter);
        self.issue(request);
    }

    pub fn refresh(&mut self) {
        let request = self.state.refresh();
        self.issue(Some(request));
    }

    pub fn submit_form(&mut self) {
        let request = self.state.submit_form();
        self.issue(request);
    }

    pub fn vote(&mut self, fact_id: FactId, column: VoteColumn) {
        let request = self.state.vote(fact_id, column);
        self.issue(request);
    }

    /// Apply arrived responses and expire toasts (called every frame)
    pub fn update(&mut self, now: Instant) {
        for response in self.dispatcher.poll() {
            self.state.apply(response);
        }
        self.state.expire_notices(now);
    }

    /// Block until one response arrives and apply it. Returns false on timeout.
    pub fn wait_for_response(&mut self, timeout: Duration) -> bool {
        match self.dispatcher.wait(timeout) {
            Some(response) => {
                self.state.apply(response);
                true
            }
            None => false,
        }
    }
}
