//! Category sidebar
//!
//! "All" plus one entry per category, each in its category color.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::facts::CategoryFilter;

fn entry_style(entry: CategoryFilter) -> Style {
    match entry {
        CategoryFilter::All => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        CategoryFilter::Only(category) => {
            let (r, g, b) = category.color();
            Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b))
        }
    }
}

pub fn render_category_filter(
    frame: &mut Frame,
    area: Rect,
    active: CategoryFilter,
    cursor: usize,
    focused: bool,
) {
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Categories ")
        .border_style(Style::default().fg(border_color));

    let items: Vec<ListItem> = CategoryFilter::entries()
        .into_iter()
        .map(|entry| {
            let marker = if entry == active { "▶ " } else { "  " };
            let label = match entry {
                CategoryFilter::All => "All".to_string(),
                CategoryFilter::Only(category) => format!(" {} ", category.name()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(label, entry_style(entry)),
            ]))
        })
        .collect();

    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut list_state = ListState::default();
    list_state.select(Some(cursor.min(CategoryFilter::entries().len() - 1)));
    frame.render_stateful_widget(list, area, &mut list_state);
}
