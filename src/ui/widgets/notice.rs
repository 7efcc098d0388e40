//! Alert popup and toast line

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{Notice, NoticeLevel, Notices};

/// Blocking alert, drawn over everything else
pub fn render_alert(frame: &mut Frame, area: Rect, notice: &Notice, queued: usize) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Alert ")
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(Color::Yellow))),
    ];
    if queued > 1 {
        lines.push(Line::from(Span::styled(
            format!("({} more)", queued - 1),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let para = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(para, area);
}

/// Newest toast plus the key help
pub fn render_toasts(frame: &mut Frame, area: Rect, notices: &Notices) {
    let line = match notices.toasts().last() {
        Some(toast) => {
            let color = match toast.level {
                NoticeLevel::Alert => Color::Red,
                NoticeLevel::Warning => Color::LightRed,
                NoticeLevel::Info => Color::Green,
            };
            Line::from(Span::styled(toast.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "Tab focus · ↑↓ move · Enter select · 1/2/3 vote · s share · r refresh · q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
