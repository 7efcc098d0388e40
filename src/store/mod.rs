//! Remote data client
//!
//! The facts table lives in a hosted store. This module defines the operations
//! the application needs from it, a REST backend, an in-memory backend, and the
//! worker plumbing that keeps requests off the UI loop.

pub mod client;
pub mod rest;
pub mod memory;
pub mod request;
pub mod dispatch;

pub use client::{FactQuery, FactStore, StoreError, FETCH_LIMIT};
pub use rest::RestStore;
pub use memory::MemoryStore;
pub use request::{RequestCounter, RequestId, StoreRequest, StoreResponse, execute};
pub use dispatch::Dispatcher;
