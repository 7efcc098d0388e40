//! Store client contract
//!
//! The three table operations the application consumes, and how they fail.

use thiserror::Error;

use crate::facts::{Category, CategoryFilter, Fact, FactId, NewFact, VoteColumn};

/// Maximum rows fetched per list request
pub const FETCH_LIMIT: usize = 1000;

/// Errors from the store. The UI only distinguishes success from failure,
/// the variants exist for the log.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("store responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode store response: {0}")]
    Decode(String),
    #[error("store returned no rows")]
    EmptyResponse,
    #[error("no fact with id {0}")]
    NotFound(FactId),
    #[error("invalid store url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

/// A list query against the facts table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactQuery {
    /// Exact category match, or every category when `None`
    pub category: Option<Category>,
    pub order_by: VoteColumn,
    pub descending: bool,
    pub limit: usize,
}

impl FactQuery {
    /// The list query for a sidebar filter: most interesting first, capped at `limit`
    pub fn for_filter(filter: CategoryFilter, limit: usize) -> Self {
        Self {
            category: filter.category(),
            order_by: VoteColumn::Interesting,
            descending: true,
            limit,
        }
    }
}

/// Operations the hosted facts table offers
pub trait FactStore: Send + Sync {
    /// Fetch rows matching `query`
    fn select(&self, query: &FactQuery) -> Result<Vec<Fact>, StoreError>;

    /// Create a row and return it as stored
    fn insert(&self, fact: &NewFact) -> Result<Fact, StoreError>;

    /// Set one vote column of a row and return the updated row
    fn update_votes(&self, id: FactId, column: VoteColumn, count: u32) -> Result<Fact, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_for_all() {
        let query = FactQuery::for_filter(CategoryFilter::All, FETCH_LIMIT);
        assert_eq!(query.category, None);
        assert_eq!(query.order_by, VoteColumn::Interesting);
        assert!(query.descending);
        assert_eq!(query.limit, 1000);
    }

    #[test]
    fn test_query_for_category() {
        let query = FactQuery::for_filter(CategoryFilter::Only(Category::Science), FETCH_LIMIT);
        assert_eq!(query.category, Some(Category::Science));
    }
}
