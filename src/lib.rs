//! todayILearned - browse, share and vote on short facts
//!
//! A terminal client for a hosted facts table: filter by category, share new
//! facts with a source, and vote them interesting, mindblowing or false.

pub mod facts;
pub mod store;
pub mod app;
pub mod config;
pub mod ui;

// Re-export commonly used types
pub use app::{AppState, Session};
pub use facts::{Category, CategoryFilter, Fact, FactId, VoteColumn};
pub use store::{FactStore, MemoryStore, RestStore, StoreError};
