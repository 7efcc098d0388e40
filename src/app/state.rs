//! Application state container
//!
//! Owns the active filter, the fetched facts, the form and every in-flight
//! request tag. Methods that need the store return the `StoreRequest` to issue;
//! the matching `StoreResponse` comes back through `apply`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::form::SubmissionForm;
use super::notice::{NoticeLevel, Notices};
use crate::facts::{CategoryFilter, Fact, FactId, VoteColumn};
use crate::store::{FactQuery, RequestCounter, RequestId, StoreError, StoreRequest, StoreResponse};

/// Alert raised when the fact list cannot be fetched
pub const FETCH_ERROR_MESSAGE: &str = "There was a problem getting data";

/// Request tag of a UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending(RequestId),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending(_))
    }

    /// True if this element waits on exactly `id`
    pub fn is_waiting_for(&self, id: RequestId) -> bool {
        *self == RequestState::Pending(id)
    }
}

pub struct AppState {
    /// Active sidebar filter
    filter: CategoryFilter,
    /// Local copy of the filtered facts, in store order
    facts: Vec<Fact>,
    /// Latest list fetch; responses to older fetches are dropped
    fetch: RequestState,
    /// Whether the share form is shown
    form_open: bool,
    form: SubmissionForm,
    /// Facts with a vote in flight
    votes: HashMap<FactId, RequestState>,
    notices: Notices,
    requests: RequestCounter,
    /// Row cap for list fetches
    fetch_limit: usize,
}

impl AppState {
    pub fn new(fetch_limit: usize, toast_lifetime: Duration) -> Self {
        Self {
            filter: CategoryFilter::All,
            facts: Vec::new(),
            fetch: RequestState::Idle,
            form_open: false,
            form: SubmissionForm::new(),
            votes: HashMap::new(),
            notices: Notices::new(toast_lifetime),
            requests: RequestCounter::default(),
            fetch_limit,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// A list fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.fetch.is_pending()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SubmissionForm {
        &mut self.form
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Request tag of one fact's vote buttons
    pub fn vote_state(&self, id: FactId) -> RequestState {
        self.votes.get(&id).copied().unwrap_or_default()
    }

    pub fn is_voting(&self, id: FactId) -> bool {
        self.vote_state(id).is_pending()
    }

    /// Initial fetch when the UI comes up
    pub fn start(&mut self) -> StoreRequest {
        self.fetch_current()
    }

    /// Switch the sidebar filter. Re-selecting the active filter fetches nothing.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Option<StoreRequest> {
        if filter == self.filter {
            return None;
        }
        log::debug!("Category filter: {} -> {}", self.filter, filter);
        self.filter = filter;
        Some(self.fetch_current())
    }

    /// Fetch the current filter again
    pub fn refresh(&mut self) -> StoreRequest {
        self.fetch_current()
    }

    fn fetch_current(&mut self) -> StoreRequest {
        let id = self.requests.next();
        self.fetch = RequestState::Pending(id);
        StoreRequest::Fetch {
            id,
            query: FactQuery::for_filter(self.filter, self.fetch_limit),
        }
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
        log::debug!("Share form {}", if self.form_open { "opened" } else { "closed" });
    }

    /// Validate the form and, if it passes, start the insert.
    /// Invalid input is a silent no-op.
    pub fn submit_form(&mut self) -> Option<StoreRequest> {
        if !self.form_open || self.form.is_pending() {
            return None;
        }
        match self.form.validate() {
            Ok(fact) => {
                let id = self.requests.next();
                self.form.mark_pending(id);
                Some(StoreRequest::Insert { id, fact })
            }
            Err(e) => {
                log::debug!("Submission held back: {}", e);
                None
            }
        }
    }

    /// Add one vote to a fact. Nothing is issued while that fact already has a vote in
    /// flight, or while the list is hidden behind a fetch.
    pub fn vote(&mut self, fact_id: FactId, column: VoteColumn) -> Option<StoreRequest> {
        if self.is_loading() || self.is_voting(fact_id) {
            return None;
        }
        let current = self.facts.iter().find(|f| f.id == fact_id)?;
        let count = column.count(current).saturating_add(1);

        let id = self.requests.next();
        self.votes.insert(fact_id, RequestState::Pending(id));
        Some(StoreRequest::Vote {
            id,
            fact_id,
            column,
            count,
        })
    }

    /// Feed back the outcome of an issued request
    pub fn apply(&mut self, response: StoreResponse) {
        match response {
            StoreResponse::Fetched { id, result } => self.apply_fetch(id, result),
            StoreResponse::Inserted { id, result } => self.apply_insert(id, result),
            StoreResponse::Voted { id, fact_id, result } => self.apply_vote(id, fact_id, result),
        }
    }

    fn apply_fetch(&mut self, id: RequestId, result: Result<Vec<Fact>, StoreError>) {
        if !self.fetch.is_waiting_for(id) {
            log::debug!("Discarding stale fetch response {}", id);
            return;
        }
        self.fetch = RequestState::Idle;

        match result {
            Ok(rows) => {
                log::info!("Loaded {} facts for filter {}", rows.len(), self.filter);
                self.facts = rows;
            }
            Err(e) => {
                log::warn!("Fetching facts failed: {}", e);
                self.notices.raise(NoticeLevel::Alert, FETCH_ERROR_MESSAGE);
            }
        }
    }

    fn apply_insert(&mut self, id: RequestId, result: Result<Fact, StoreError>) {
        if !self.form.request().is_waiting_for(id) {
            log::debug!("Ignoring insert response {} nobody waits for", id);
            return;
        }

        match result {
            Ok(row) => {
                log::info!("Shared fact {} in {}", row.id, row.category);
                self.facts.insert(0, row);
                self.form.reset();
                self.form_open = false;
                self.notices.raise(NoticeLevel::Info, "Fact shared");
            }
            Err(e) => {
                log::warn!("Sharing fact failed: {}", e);
                self.form.mark_idle();
                self.notices.raise(NoticeLevel::Warning, "Could not share the fact, try again");
            }
        }
    }

    fn apply_vote(&mut self, id: RequestId, fact_id: FactId, result: Result<Fact, StoreError>) {
        if !self.vote_state(fact_id).is_waiting_for(id) {
            log::debug!("Ignoring vote response {} for fact {}", id, fact_id);
            return;
        }
        self.votes.remove(&fact_id);

        match result {
            Ok(row) => {
                if let Some(slot) = self.facts.iter_mut().find(|f| f.id == fact_id) {
                    *slot = row;
                }
            }
            Err(e) => {
                log::warn!("Vote on fact {} failed: {}", fact_id, e);
                self.notices.raise(NoticeLevel::Warning, "Your vote could not be recorded");
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.notices.dismiss_alert();
    }

    /// Drop expired toasts (called every frame)
    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.expire(now);
    }
}
