//! Main UI Application
//!
//! Coordinates rendering and input handling across the header, share form,
//! category sidebar and fact list.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
};

use super::widgets::{
    render_alert, render_category_filter, render_fact_form, render_fact_list, render_header,
    render_toasts,
};
use crate::app::{FormField, Session};
use crate::facts::{CategoryFilter, VoteColumn};

/// Width of the category sidebar
const SIDEBAR_WIDTH: u16 = 22;
/// Height of the share form including borders
const FORM_HEIGHT: u16 = 6;

/// Pane receiving keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Facts,
    Form,
}

/// Main UI application
pub struct App {
    /// Pane receiving keyboard input
    focus: Focus,
    /// Highlighted sidebar entry (index into `CategoryFilter::entries()`)
    category_cursor: usize,
    /// Highlighted fact
    fact_cursor: usize,
    /// Focused input of the share form
    form_field: FormField,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Facts,
            category_cursor: 0,
            fact_cursor: 0,
            form_field: FormField::Text,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn fact_cursor(&self) -> usize {
        self.fact_cursor
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        // Global quit shortcut
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return Ok(true);
        }

        // A blocking alert swallows everything until dismissed
        if session.state().notices().has_alert() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                session.state_mut().dismiss_alert();
            }
            return Ok(false);
        }

        // The form closes itself after a successful share
        self.focus = self.effective_focus(session);
        if self.focus == Focus::Form {
            self.handle_form_input(key, session);
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('s') => self.toggle_form(session),
            KeyCode::Char('r') => session.refresh(),
            KeyCode::Tab => self.cycle_focus(session, true),
            KeyCode::BackTab => self.cycle_focus(session, false),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(session, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(session, 1),
            KeyCode::Enter => {
                if self.focus == Focus::Categories {
                    let entries = CategoryFilter::entries();
                    let filter = entries[self.category_cursor.min(entries.len() - 1)];
                    session.select_category(filter);
                    self.fact_cursor = 0;
                }
            }
            KeyCode::Char('1') => self.vote_selected(session, VoteColumn::Interesting),
            KeyCode::Char('2') => self.vote_selected(session, VoteColumn::Mindblowing),
            KeyCode::Char('3') => self.vote_selected(session, VoteColumn::False),
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_input(&mut self, key: KeyEvent, session: &mut Session) {
        match key.code {
            KeyCode::Esc => self.toggle_form(session),
            KeyCode::Enter => session.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.prev(),
            KeyCode::Left if self.form_field == FormField::Category => {
                session.state_mut().form_mut().cycle_category(false);
            }
            KeyCode::Right | KeyCode::Char(' ') if self.form_field == FormField::Category => {
                session.state_mut().form_mut().cycle_category(true);
            }
            KeyCode::Backspace => session.state_mut().form_mut().pop_char(self.form_field),
            KeyCode::Char(c) => session.state_mut().form_mut().push_char(self.form_field, c),
            _ => {}
        }
    }

    fn effective_focus(&self, session: &Session) -> Focus {
        if self.focus == Focus::Form && !session.state().is_form_open() {
            Focus::Facts
        } else {
            self.focus
        }
    }

    fn toggle_form(&mut self, session: &mut Session) {
        session.state_mut().toggle_form();
        if session.state().is_form_open() {
            self.focus = Focus::Form;
            self.form_field = FormField::Text;
        } else if self.focus == Focus::Form {
            self.focus = Focus::Facts;
        }
    }

    fn cycle_focus(&mut self, session: &Session, forward: bool) {
        let form_open = session.state().is_form_open();
        self.focus = match (self.focus, forward) {
            (Focus::Categories, true) => Focus::Facts,
            (Focus::Facts, true) if form_open => Focus::Form,
            (Focus::Facts, true) => Focus::Categories,
            (Focus::Form, true) => Focus::Categories,
            (Focus::Categories, false) if form_open => Focus::Form,
            (Focus::Categories, false) => Focus::Facts,
            (Focus::Facts, false) => Focus::Categories,
            (Focus::Form, false) => Focus::Facts,
        };
    }

    fn move_cursor(&mut self, session: &Session, delta: i32) {
        match self.focus {
            Focus::Categories => {
                let last = CategoryFilter::entries().len() - 1;
                self.category_cursor = step(self.category_cursor, delta, last);
            }
            Focus::Facts => {
                let len = session.state().facts().len();
                if len > 0 {
                    self.fact_cursor = step(self.fact_cursor.min(len - 1), delta, len - 1);
                }
            }
            Focus::Form => {}
        }
    }

    fn vote_selected(&mut self, session: &mut Session, column: VoteColumn) {
        if self.focus != Focus::Facts {
            return;
        }
        let facts = session.state().facts();
        if facts.is_empty() {
            return;
        }
        let fact_id = facts[self.fact_cursor.min(facts.len() - 1)].id;
        session.vote(fact_id, column);
    }

    /// Render the whole screen
    pub fn render(&self, frame: &mut Frame, session: &Session) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        let state = session.state();
        let focus = self.effective_focus(session);
        let form_height = if state.is_form_open() { FORM_HEIGHT } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(form_height),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        render_header(frame, rows[0], state.is_form_open());

        if state.is_form_open() {
            render_fact_form(
                frame,
                rows[1],
                state.form(),
                self.form_field,
                focus == Focus::Form,
            );
        }

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[2]);

        render_category_filter(
            frame,
            main[0],
            state.filter(),
            self.category_cursor,
            focus == Focus::Categories,
        );
        render_fact_list(frame, main[1], state, self.fact_cursor, focus == Focus::Facts);

        render_toasts(frame, rows[3], state.notices());

        if let Some(alert) = state.notices().current_alert() {
            let area = centered_rect(50, 30, frame.area());
            render_alert(frame, area, alert, state.notices().alert_count());
        }
    }
}

/// Move `current` by `delta`, clamped to `0..=last`
fn step(current: usize, delta: i32, last: usize) -> usize {
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(last)
    }
}

/// Create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::app::FETCH_ERROR_MESSAGE;
    use crate::facts::{Category, FactId};
    use crate::store::{FactQuery, FactStore, MemoryStore, StoreError, FETCH_LIMIT};
    use crate::facts::{Fact, NewFact};

    const WAIT: Duration = Duration::from_secs(5);

    /// Store whose list fetches always fail
    struct BrokenStore;

    impl FactStore for BrokenStore {
        fn select(&self, _query: &FactQuery) -> Result<Vec<Fact>, StoreError> {
            Err(StoreError::Status { status: 503, body: "down".to_string() })
        }

        fn insert(&self, _fact: &NewFact) -> Result<Fact, StoreError> {
            Err(StoreError::EmptyResponse)
        }

        fn update_votes(&self, id: FactId, _column: VoteColumn, _count: u32) -> Result<Fact, StoreError> {
            Err(StoreError::NotFound(id))
        }
    }

    fn session_with(store: Arc<dyn FactStore>) -> Session {
        Session::new(store, FETCH_LIMIT, Duration::from_secs(4))
    }

    fn loaded_session(store: Arc<dyn FactStore>) -> Session {
        let mut session = session_with(store);
        session.start();
        assert!(session.wait_for_response(WAIT));
        session
    }

    fn press(app: &mut App, session: &mut Session, code: KeyCode) -> bool {
        app.handle_input(KeyEvent::new(code, KeyModifiers::NONE), session)
            .unwrap()
    }

    fn type_text(app: &mut App, session: &mut Session, text: &str) {
        for c in text.chars() {
            press(app, session, KeyCode::Char(c));
        }
    }

    fn screen(app: &App, session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
        terminal.draw(|frame| app.render(frame, session)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_then_list() {
        let mut session = session_with(Arc::new(MemoryStore::with_sample_facts()));
        let app = App::new();
        session.start();
        assert!(screen(&app, &session).contains("Loading..."));

        assert!(session.wait_for_response(WAIT));
        let text = screen(&app, &session);
        assert!(!text.contains("Loading..."));
        assert!(text.contains("Lisbon is the capital of Portugal"));
        assert!(text.contains("DISPUTED"));
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let session = loaded_session(Arc::new(MemoryStore::new()));
        let text = screen(&App::new(), &session);
        assert!(text.contains("No facts for this category yet!"));
    }

    #[test]
    fn test_select_category_from_sidebar() {
        let mut session = loaded_session(Arc::new(MemoryStore::with_sample_facts()));
        let mut app = App::new();

        press(&mut app, &mut session, KeyCode::BackTab);
        assert_eq!(app.focus(), Focus::Categories);
        press(&mut app, &mut session, KeyCode::Down);
        press(&mut app, &mut session, KeyCode::Down);
        press(&mut app, &mut session, KeyCode::Enter);

        assert_eq!(session.state().filter(), CategoryFilter::Only(Category::Science));
        assert!(session.state().is_loading());
        assert!(session.wait_for_response(WAIT));
        assert!(session.state().facts().iter().all(|f| f.category == "science"));

        // Back to "All"
        press(&mut app, &mut session, KeyCode::Up);
        press(&mut app, &mut session, KeyCode::Up);
        press(&mut app, &mut session, KeyCode::Enter);
        assert_eq!(session.state().filter(), CategoryFilter::All);
        assert!(session.wait_for_response(WAIT));
        assert_eq!(session.state().facts().len(), 4);
    }

    #[test]
    fn test_share_flow() {
        let mut session = loaded_session(Arc::new(MemoryStore::with_sample_facts()));
        let mut app = App::new();

        press(&mut app, &mut session, KeyCode::Char('s'));
        assert!(session.state().is_form_open());
        assert_eq!(app.focus(), Focus::Form);
        assert!(screen(&app, &session).contains("Close"));

        type_text(&mut app, &mut session, "Bees can fly.");
        press(&mut app, &mut session, KeyCode::Tab);
        type_text(&mut app, &mut session, "http://example.com");
        press(&mut app, &mut session, KeyCode::Tab);
        press(&mut app, &mut session, KeyCode::Right);
        press(&mut app, &mut session, KeyCode::Right);
        assert_eq!(session.state().form().category(), Some(Category::Science));
        assert_eq!(session.state().form().remaining_chars(), 187);

        press(&mut app, &mut session, KeyCode::Enter);
        assert!(session.state().form().is_pending());
        assert!(session.wait_for_response(WAIT));

        assert!(!session.state().is_form_open());
        assert_eq!(session.state().facts()[0].text, "Bees can fly.");
        assert_eq!(session.state().form().source(), "http://example.com");
        // Form closed, so keys go back to the list
        assert!(!press(&mut app, &mut session, KeyCode::Down));
        assert_eq!(app.focus(), Focus::Facts);
        assert!(press(&mut app, &mut session, KeyCode::Char('q')));
    }

    #[test]
    fn test_invalid_share_does_nothing() {
        let mut session = loaded_session(Arc::new(MemoryStore::with_sample_facts()));
        let mut app = App::new();
        press(&mut app, &mut session, KeyCode::Char('s'));
        type_text(&mut app, &mut session, "No source here");
        press(&mut app, &mut session, KeyCode::Enter);
        assert!(!session.state().form().is_pending());
        assert!(session.state().is_form_open());
        // 'q' is text while typing in the form
        assert!(!press(&mut app, &mut session, KeyCode::Char('q')));
        assert_eq!(session.state().form().text(), "No source hereq");
    }

    #[test]
    fn test_vote_on_selected_fact() {
        let mut session = loaded_session(Arc::new(MemoryStore::with_sample_facts()));
        let mut app = App::new();

        press(&mut app, &mut session, KeyCode::Down);
        assert_eq!(app.fact_cursor(), 1);
        let target = session.state().facts()[1].clone();

        press(&mut app, &mut session, KeyCode::Char('2'));
        assert!(session.state().is_voting(target.id));
        // Second press while in flight is ignored
        press(&mut app, &mut session, KeyCode::Char('2'));
        assert!(session.wait_for_response(WAIT));
        assert!(!session.wait_for_response(Duration::from_millis(200)));

        let updated = &session.state().facts()[1];
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.votes_mindblowing, target.votes_mindblowing + 1);
    }

    #[test]
    fn test_vote_keys_ignored_while_loading() {
        let mut session = loaded_session(Arc::new(MemoryStore::with_sample_facts()));
        let mut app = App::new();
        let first = session.state().facts()[0].clone();

        press(&mut app, &mut session, KeyCode::Char('r'));
        assert!(session.state().is_loading());
        assert!(screen(&app, &session).contains("Loading..."));
        press(&mut app, &mut session, KeyCode::Char('1'));
        assert!(!session.state().is_voting(first.id));

        // Only the refresh comes back
        assert!(session.wait_for_response(WAIT));
        assert!(!session.wait_for_response(Duration::from_millis(200)));
        assert_eq!(session.state().facts()[0], first);
    }

    #[test]
    fn test_fetch_failure_alert_blocks_until_dismissed() {
        let mut session = loaded_session(Arc::new(BrokenStore));
        let mut app = App::new();
        assert_eq!(session.state().notices().alert_count(), 1);
        assert!(screen(&app, &session).contains(FETCH_ERROR_MESSAGE));

        // Blocked: 'q' does not quit while the alert is up
        assert!(!press(&mut app, &mut session, KeyCode::Char('q')));
        press(&mut app, &mut session, KeyCode::Enter);
        assert!(!session.state().notices().has_alert());
        assert!(screen(&app, &session).contains("No facts for this category yet!"));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut session = session_with(Arc::new(MemoryStore::new()));
        let mut app = App::new();
        let quit = app
            .handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut session)
            .unwrap();
        assert!(quit);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(5, 1, 5), 5);
        assert_eq!(step(2, 1, 5), 3);
    }
}
