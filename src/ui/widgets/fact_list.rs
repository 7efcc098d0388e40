//! Fact list
//!
//! One entry per fact in store order: disputed flag, text, source, category tag
//! and the three vote buttons.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::facts::{Category, Fact, VoteColumn};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No facts for this category yet! Create the first one ✌️";

/// Tag color for a raw category name; unknown names get a neutral gray
pub fn category_color(name: &str) -> Color {
    match Category::from_name(name) {
        Some(category) => {
            let (r, g, b) = category.color();
            Color::Rgb(r, g, b)
        }
        None => Color::Gray,
    }
}

/// Lines of one fact entry. `voting` dims the vote buttons.
pub fn fact_lines(fact: &Fact, voting: bool, selected: bool) -> Vec<Line<'static>> {
    let mut first = Vec::new();
    if fact.is_disputed() {
        first.push(Span::styled(
            "[⛔️ DISPUTED] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    first.push(Span::styled(fact.text.clone(), Style::default().fg(Color::White)));

    let source = Line::from(vec![
        Span::raw("   "),
        Span::styled(
            format!("(Source) {}", fact.source),
            Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED),
        ),
    ]);

    let vote_style = if voting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut meta = vec![
        Span::raw("   "),
        Span::styled(
            format!(" {} ", fact.category),
            Style::default().fg(Color::Black).bg(category_color(&fact.category)),
        ),
        Span::raw("  "),
    ];
    for (n, column) in VoteColumn::ALL.iter().enumerate() {
        let key = if selected && !voting {
            format!("[{}]", n + 1)
        } else {
            "   ".to_string()
        };
        meta.push(Span::styled(key, Style::default().fg(Color::DarkGray)));
        meta.push(Span::styled(
            format!("{} {}  ", column.icon(), column.count(fact)),
            vote_style,
        ));
    }
    if voting {
        meta.push(Span::styled("…", Style::default().fg(Color::DarkGray)));
    }

    vec![Line::from(first), source, Line::from(meta), Line::from("")]
}

pub fn render_fact_list(frame: &mut Frame, area: Rect, state: &AppState, cursor: usize, focused: bool) {
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Facts · {} ", state.filter()))
        .border_style(Style::default().fg(border_color));

    if state.is_loading() {
        let para = Paragraph::new(LOADING_MESSAGE)
            .style(Style::default().fg(Color::Gray))
            .centered()
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let facts = state.facts();
    if facts.is_empty() {
        let para = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::Gray))
            .centered()
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let selected = cursor.min(facts.len() - 1);
    let items: Vec<ListItem> = facts
        .iter()
        .enumerate()
        .map(|(i, fact)| {
            let voting = state.is_voting(fact.id);
            ListItem::new(fact_lines(fact, voting, focused && i == selected))
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(Color::Rgb(40, 40, 48))
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
