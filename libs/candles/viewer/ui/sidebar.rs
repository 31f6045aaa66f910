//! Sidebar widget - list of markets

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::viewer::ViewerApp;

const MAX_NAME_CHARS: usize = 20;

/// Draw the sidebar with the market list
pub fn draw(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let selected = app.current_index();

    let items: Vec<ListItem> = app
        .markets()
        .into_iter()
        .enumerate()
        .map(|(i, market)| {
            let is_selected = Some(i) == selected;

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_selected { "> " } else { "  " };

            let name = if market.chars().count() > MAX_NAME_CHARS {
                let truncated: String = market.chars().take(MAX_NAME_CHARS - 3).collect();
                format!("{}...", truncated)
            } else {
                market
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(name, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Markets "));

    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}
