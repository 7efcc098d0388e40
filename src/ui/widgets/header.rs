//! Header bar with the share toggle

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Label of the share toggle for the current form visibility
pub fn toggle_label(form_open: bool) -> &'static str {
    if form_open { "Close" } else { "Share a fact" }
}

pub fn render_header(frame: &mut Frame, area: Rect, form_open: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(20)])
        .split(inner);

    let title = Line::from(vec![
        Span::styled("💡 ", Style::default()),
        Span::styled(
            "todayILearned",
            Style::default().fg(Color::Rgb(253, 242, 248)).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let button = Line::from(vec![
        Span::styled("[s] ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            toggle_label(form_open),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(0x3b, 0x82, 0xf6))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(button).right_aligned(), chunks[1]);
}
