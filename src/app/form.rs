//! Submission form
//!
//! Local state of the "share a fact" form and the validation gate in front of
//! the insert request.

use reqwest::Url;
use thiserror::Error;

use super::state::RequestState;
use crate::facts::{Category, NewFact};
use crate::store::RequestId;

/// Longest fact text accepted, in characters
pub const MAX_TEXT_CHARS: usize = 200;

/// Source value the form is reset to after a successful share
pub const SOURCE_PLACEHOLDER: &str = "http://example.com";

/// Input fields of the form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Source,
    Category,
    Post,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Text => FormField::Source,
            FormField::Source => FormField::Category,
            FormField::Category => FormField::Post,
            FormField::Post => FormField::Text,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Text => FormField::Post,
            FormField::Source => FormField::Text,
            FormField::Category => FormField::Source,
            FormField::Post => FormField::Category,
        }
    }
}

/// Why a submission was held back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("fact text is empty")]
    EmptyText,
    #[error("fact text is {0} characters, limit is 200")]
    TextTooLong(usize),
    #[error("source `{0}` is not an http(s) URL")]
    InvalidSource(String),
    #[error("no category chosen")]
    NoCategory,
}

/// Absolute URL with an `http` or `https` scheme
pub fn is_valid_http_url(source: &str) -> bool {
    match Url::parse(source) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// State of the submission form
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    text: String,
    source: String,
    category: Option<Category>,
    /// Pending while the insert request is in flight; all inputs are disabled then
    request: RequestState,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn request(&self) -> RequestState {
        self.request
    }

    pub fn is_pending(&self) -> bool {
        self.request.is_pending()
    }

    /// Characters left before the limit; negative once the text is too long
    pub fn remaining_chars(&self) -> i64 {
        MAX_TEXT_CHARS as i64 - self.text.chars().count() as i64
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if !self.is_pending() {
            self.text = text.into();
        }
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        if !self.is_pending() {
            self.source = source.into();
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        if !self.is_pending() {
            self.category = category;
        }
    }

    /// Type a character into a text field
    pub fn push_char(&mut self, field: FormField, c: char) {
        if self.is_pending() {
            return;
        }
        match field {
            FormField::Text => self.text.push(c),
            FormField::Source => self.source.push(c),
            FormField::Category | FormField::Post => {}
        }
    }

    /// Delete the last character of a text field
    pub fn pop_char(&mut self, field: FormField) {
        if self.is_pending() {
            return;
        }
        match field {
            FormField::Text => {
                self.text.pop();
            }
            FormField::Source => {
                self.source.pop();
            }
            FormField::Category | FormField::Post => {}
        }
    }

    /// Step the category selector. "Choose category" sits before the first entry.
    pub fn cycle_category(&mut self, forward: bool) {
        if self.is_pending() {
            return;
        }
        let first = Category::ALL[0];
        let last = Category::ALL[Category::ALL.len() - 1];
        self.category = match (self.category, forward) {
            (None, true) => Some(first),
            (None, false) => Some(last),
            (Some(c), true) if c == last => None,
            (Some(c), false) if c == first => None,
            (Some(c), true) => Some(c.next()),
            (Some(c), false) => Some(c.prev()),
        };
    }

    /// Check the inputs and build the insert payload
    pub fn validate(&self) -> Result<NewFact, FormError> {
        if self.text.is_empty() {
            return Err(FormError::EmptyText);
        }
        let len = self.text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(FormError::TextTooLong(len));
        }
        if !is_valid_http_url(&self.source) {
            return Err(FormError::InvalidSource(self.source.clone()));
        }
        let category = self.category.ok_or(FormError::NoCategory)?;

        Ok(NewFact {
            text: self.text.clone(),
            source: self.source.clone(),
            category,
        })
    }

    pub(crate) fn mark_pending(&mut self, id: RequestId) {
        self.request = RequestState::Pending(id);
    }

    pub(crate) fn mark_idle(&mut self) {
        self.request = RequestState::Idle;
    }

    /// Clear after a successful share
    pub(crate) fn reset(&mut self) {
        self.text.clear();
        self.source = SOURCE_PLACEHOLDER.to_string();
        self.category = None;
        self.request = RequestState::Idle;
    }
}
