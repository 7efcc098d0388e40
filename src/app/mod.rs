//! Application state
//!
//! Everything the UI shows lives in `AppState`; `Session` wires it to the store.

mod state;
mod form;
mod notice;
mod session;

pub use state::{AppState, RequestState, FETCH_ERROR_MESSAGE};
pub use form::{FormField, SubmissionForm, FormError, MAX_TEXT_CHARS, SOURCE_PLACEHOLDER, is_valid_http_url};
pub use notice::{Notice, NoticeLevel, Notices};
pub use session::Session;
