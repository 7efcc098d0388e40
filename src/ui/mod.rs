//! User Interface module
//!
//! Terminal UI using ratatui: header, share form, category sidebar and fact list.

pub mod app;
pub mod widgets;

pub use app::{App, Focus};
