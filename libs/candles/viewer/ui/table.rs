//! Candle table widget for one market

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Row, Table},
    Frame,
};

use crate::render::{MarketTable, COLUMN_HEADERS};

const COLUMN_WIDTHS: [Constraint; 7] = [
    Constraint::Length(20), // Time
    Constraint::Length(12), // Open
    Constraint::Length(12), // High
    Constraint::Length(12), // Low
    Constraint::Length(12), // Close
    Constraint::Length(14), // Volume
    Constraint::Min(8),     // Source
];

/// Draw every row of `market` in input order
pub fn draw(frame: &mut Frame, market: &MarketTable, area: Rect) {
    let title = format!(" {} ({} rows) ", market.title, market.rows.len());

    let header = Row::new(COLUMN_HEADERS).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = market
        .rows
        .iter()
        .map(|row| Row::new(row.cells.iter().map(String::as_str)));

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
