//! Fact data model
//!
//! Rows of the remote facts table and the fixed set of categories they are tagged with.

pub mod category;
pub mod fact;

pub use category::{Category, CategoryFilter};
pub use fact::{Fact, FactId, NewFact, VoteColumn};
