//! Store requests and their responses
//!
//! The application state never performs I/O itself. It hands out `StoreRequest`s
//! tagged with a `RequestId` and later receives the matching `StoreResponse`.

use std::fmt;

use super::client::{FactQuery, FactStore, StoreError};
use crate::facts::{Fact, FactId, NewFact, VoteColumn};

/// Tag identifying one issued request; later requests get larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of request ids
#[derive(Debug, Default)]
pub struct RequestCounter {
    last: u64,
}

impl RequestCounter {
    pub fn next(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// A store call to perform on behalf of the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    Fetch {
        id: RequestId,
        query: FactQuery,
    },
    Insert {
        id: RequestId,
        fact: NewFact,
    },
    Vote {
        id: RequestId,
        fact_id: FactId,
        column: VoteColumn,
        count: u32,
    },
}

impl StoreRequest {
    pub fn id(&self) -> RequestId {
        match self {
            StoreRequest::Fetch { id, .. }
            | StoreRequest::Insert { id, .. }
            | StoreRequest::Vote { id, .. } => *id,
        }
    }

    /// Response reporting that this request never reached the store
    pub fn failed(&self, error: StoreError) -> StoreResponse {
        match self {
            StoreRequest::Fetch { id, .. } => StoreResponse::Fetched {
                id: *id,
                result: Err(error),
            },
            StoreRequest::Insert { id, .. } => StoreResponse::Inserted {
                id: *id,
                result: Err(error),
            },
            StoreRequest::Vote { id, fact_id, .. } => StoreResponse::Voted {
                id: *id,
                fact_id: *fact_id,
                result: Err(error),
            },
        }
    }
}

/// Outcome of a `StoreRequest`, carrying the same id
#[derive(Debug)]
pub enum StoreResponse {
    Fetched {
        id: RequestId,
        result: Result<Vec<Fact>, StoreError>,
    },
    Inserted {
        id: RequestId,
        result: Result<Fact, StoreError>,
    },
    Voted {
        id: RequestId,
        fact_id: FactId,
        result: Result<Fact, StoreError>,
    },
}

impl StoreResponse {
    pub fn id(&self) -> RequestId {
        match self {
            StoreResponse::Fetched { id, .. }
            | StoreResponse::Inserted { id, .. }
            | StoreResponse::Voted { id, .. } => *id,
        }
    }
}

/// Run one request against a store, blocking until it completes
pub fn execute(store: &dyn FactStore, request: StoreRequest) -> StoreResponse {
    match request {
        StoreRequest::Fetch { id, query } => StoreResponse::Fetched {
            id,
            result: store.select(&query),
        },
        StoreRequest::Insert { id, fact } => StoreResponse::Inserted {
            id,
            result: store.insert(&fact),
        },
        StoreRequest::Vote {
            id,
            fact_id,
            column,
            count,
        } => StoreResponse::Voted {
            id,
            fact_id,
            result: store.update_votes(fact_id, column, count),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Category, CategoryFilter};
    use crate::store::{MemoryStore, FETCH_LIMIT};

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = RequestCounter::default();
        let a = counter.next();
        let b = counter.next();
        assert!(b > a);
        assert_eq!(a, RequestId(1));
    }

    #[test]
    fn test_execute_keeps_id() {
        let store = MemoryStore::with_sample_facts();
        let request = StoreRequest::Fetch {
            id: RequestId(42),
            query: FactQuery::for_filter(CategoryFilter::Only(Category::Science), FETCH_LIMIT),
        };
        match execute(&store, request) {
            StoreResponse::Fetched { id, result } => {
                assert_eq!(id, RequestId(42));
                assert!(result.unwrap().iter().all(|f| f.category == "science"));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_execute_vote_on_missing_fact_fails() {
        let store = MemoryStore::new();
        let response = execute(
            &store,
            StoreRequest::Vote {
                id: RequestId(1),
                fact_id: FactId(9),
                column: VoteColumn::Interesting,
                count: 1,
            },
        );
        assert!(matches!(
            response,
            StoreResponse::Voted { result: Err(StoreError::NotFound(_)), .. }
        ));
    }

    #[test]
    fn test_failed_keeps_id_and_fact() {
        let request = StoreRequest::Vote {
            id: RequestId(4),
            fact_id: FactId(9),
            column: VoteColumn::False,
            count: 2,
        };
        match request.failed(StoreError::Transport("no worker".to_string())) {
            StoreResponse::Voted { id, fact_id, result } => {
                assert_eq!(id, RequestId(4));
                assert_eq!(fact_id, FactId(9));
                assert!(matches!(result, Err(StoreError::Transport(_))));
            }
            other => panic!("unexpected response {:?}", other),
        }

        let fetch = StoreRequest::Fetch {
            id: RequestId(5),
            query: FactQuery::for_filter(CategoryFilter::All, FETCH_LIMIT),
        };
        assert!(matches!(
            fetch.failed(StoreError::EmptyResponse),
            StoreResponse::Fetched { id: RequestId(5), result: Err(_) }
        ));
    }
}
