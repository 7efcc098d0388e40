//! Share form
//!
//! Text input with a live character counter, source input, category selector
//! and the Post button. Everything dims while the insert is in flight.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{FormField, SubmissionForm};

const TEXT_PLACEHOLDER: &str = "Share a fact with the world...";
const SOURCE_PLACEHOLDER_HINT: &str = "Trustworthy source...";

fn input_line<'a>(value: &'a str, placeholder: &'a str, style: Style, selected: bool) -> Vec<Span<'a>> {
    let marker = if selected { "› " } else { "  " };
    let mut spans = vec![Span::styled(marker, Style::default().fg(Color::Yellow))];
    if value.is_empty() {
        spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(value, style));
    }
    if selected {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }
    spans
}

pub fn render_fact_form(
    frame: &mut Frame,
    area: Rect,
    form: &SubmissionForm,
    field: FormField,
    focused: bool,
) {
    let pending = form.is_pending();
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let title = if pending { " Posting... " } else { " Share a fact " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));

    let value_style = if pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let is_selected = |f: FormField| focused && !pending && field == f;

    let remaining = form.remaining_chars();
    let counter_color = if remaining < 0 { Color::Red } else { Color::Gray };
    let mut text_line = input_line(form.text(), TEXT_PLACEHOLDER, value_style, is_selected(FormField::Text));
    text_line.push(Span::styled(
        format!("  {}", remaining),
        Style::default().fg(counter_color),
    ));

    let source_line = input_line(
        form.source(),
        SOURCE_PLACEHOLDER_HINT,
        value_style,
        is_selected(FormField::Source),
    );

    let category_marker = if is_selected(FormField::Category) { "› " } else { "  " };
    let category_span = match form.category() {
        Some(category) => {
            let (r, g, b) = category.color();
            Span::styled(
                format!(" {} ", category.name().to_uppercase()),
                if pending {
                    value_style
                } else {
                    Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b))
                },
            )
        }
        None => Span::styled("Choose category:", Style::default().fg(Color::DarkGray)),
    };
    let category_line = vec![
        Span::styled(category_marker, Style::default().fg(Color::Yellow)),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        category_span,
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ];

    let post_style = if pending {
        Style::default().fg(Color::DarkGray)
    } else if is_selected(FormField::Post) {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let post_line = vec![
        Span::raw("  "),
        Span::styled("[ Post ]", post_style),
        Span::styled("  Enter to post · Esc to close", Style::default().fg(Color::DarkGray)),
    ];

    let lines = vec![
        Line::from(text_line),
        Line::from(source_line),
        Line::from(category_line),
        Line::from(post_line),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
