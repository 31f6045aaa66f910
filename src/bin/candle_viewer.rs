//! Candle Viewer - Terminal UI for the candle feed
//!
//! Runs the same poller as the headless board but renders into memory and
//! draws the tables in the terminal.
//!
//! Usage: `candle_viewer [config.yaml]`

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use candle_board::bin_common::{config_path_from_args, parse_args};
use candles::viewer::{ui, ViewerApp};
use candles::{BoardConfig, CandlePoller, HttpCandleSource, MemoryBoard};

/// Input poll timeout; also bounds how stale a frame can be
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Note: Logging is disabled for TUI - it would corrupt the alternate screen display

    let args = parse_args();
    let config = BoardConfig::load_or_default(config_path_from_args(&args))?;

    let runtime = tokio::runtime::Runtime::new()?;

    let board = MemoryBoard::new();
    let source = HttpCandleSource::new(&config.base_url, config.request_timeout())?;
    let feed_url = source.url().to_string();

    let handle = {
        let _guard = runtime.enter();
        CandlePoller::new(Arc::new(source), Arc::new(board.clone())).start()
    };

    let mut app = ViewerApp::new(board, feed_url).with_poller(handle);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(handle) = app.take_poller() {
        runtime.block_on(handle.stop());
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ViewerApp,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
