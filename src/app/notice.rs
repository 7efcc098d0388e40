//! User-facing notices
//!
//! Single channel for reporting request outcomes. Alerts block the UI until
//! dismissed; warnings and infos show as toasts and expire on their own.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Modal; stays until dismissed
    Alert,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub raised_at: Instant,
}

/// Pending alerts and toasts
#[derive(Debug, Clone)]
pub struct Notices {
    alerts: VecDeque<Notice>,
    toasts: VecDeque<Notice>,
    toast_lifetime: Duration,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl Notices {
    pub fn new(toast_lifetime: Duration) -> Self {
        Self {
            alerts: VecDeque::new(),
            toasts: VecDeque::new(),
            toast_lifetime,
        }
    }

    pub fn raise(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.raise_at(level, text, Instant::now());
    }

    pub fn raise_at(&mut self, level: NoticeLevel, text: impl Into<String>, now: Instant) {
        let notice = Notice {
            level,
            text: text.into(),
            raised_at: now,
        };
        match level {
            NoticeLevel::Alert => {
                log::warn!("Alert: {}", notice.text);
                self.alerts.push_back(notice);
            }
            NoticeLevel::Warning | NoticeLevel::Info => {
                // Keep the toast line readable
                if self.toasts.len() >= 3 {
                    self.toasts.pop_front();
                }
                self.toasts.push_back(notice);
            }
        }
    }

    /// The alert currently blocking the UI
    pub fn current_alert(&self) -> Option<&Notice> {
        self.alerts.front()
    }

    pub fn has_alert(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Dismiss the front alert
    pub fn dismiss_alert(&mut self) -> Option<Notice> {
        self.alerts.pop_front()
    }

    /// Number of alerts waiting to be dismissed
    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Notice> {
        self.toasts.iter()
    }

    /// Drop toasts older than their lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.toast_lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.raised_at) < lifetime);
    }
}
