//! UI widgets for the viewer

pub mod sidebar;
pub mod table;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ViewerApp;

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &ViewerApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let stats = app.stats();

    let (status, status_color) = if !app.is_polling() {
        ("Stopped", Color::Red)
    } else if stats.successes == 0 {
        ("Connecting...", Color::Yellow)
    } else if stats.last_error.is_some() && stats.cycles > stats.successes {
        ("Polling (errors)", Color::Yellow)
    } else {
        ("Polling", Color::Green)
    };

    let header_text = format!(
        " Status: {} | Feed: {} | Markets: {} | Rows: {}",
        status,
        app.feed_url,
        app.markets().len(),
        app.total_rows()
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title(" Candle Viewer "));

    frame.render_widget(header, area);
}

fn draw_main(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // Sidebar (market names)
            Constraint::Min(0),     // Candle table
        ])
        .split(area);

    sidebar::draw(frame, app, chunks[0]);

    match app.selected_table() {
        Some(market) => table::draw(frame, &market, chunks[1]),
        None => {
            let message = if app.has_data() {
                " Feed returned no candles."
            } else {
                " Waiting for first poll..."
            };
            let empty = Paragraph::new(message)
                .block(Block::default().borders(Borders::ALL).title(" Candles "));
            frame.render_widget(empty, chunks[1]);
        }
    }
}

fn draw_footer(frame: &mut Frame, app: &ViewerApp, area: Rect) {
    let stats = app.stats();
    let summary = format!(" ok={} failed={}", stats.successes, stats.failures);

    let footer_text = match (&app.status_message, &stats.last_error) {
        (Some(status), _) => format!("{} | {}", summary, status),
        (None, Some(error)) if stats.failures > 0 => format!("{} | last error: {}", summary, error),
        _ => format!("{} | q=quit j/k=nav r=refresh", summary),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
