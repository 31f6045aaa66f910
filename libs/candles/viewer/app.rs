//! Viewer application state

use crossterm::event::KeyCode;

use crate::poller::{PollStats, PollerHandle};
use crate::render::{MarketTable, MemoryBoard};

/// Main viewer state
pub struct ViewerApp {
    /// Latest plan rendered by the poller
    board: MemoryBoard,
    /// Running poller, if attached
    poller: Option<PollerHandle>,
    /// Feed URL shown in the header
    pub feed_url: String,
    /// Currently selected market index
    pub selected_index: usize,
    pub should_quit: bool,
    /// Status message to show in footer
    pub status_message: Option<String>,
}

impl ViewerApp {
    pub fn new(board: MemoryBoard, feed_url: impl Into<String>) -> Self {
        Self {
            board,
            poller: None,
            feed_url: feed_url.into(),
            selected_index: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn with_poller(mut self, poller: PollerHandle) -> Self {
        self.poller = Some(poller);
        self
    }

    /// Detach the poller so the caller can stop it
    pub fn take_poller(&mut self) -> Option<PollerHandle> {
        self.poller.take()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().map_or(false, |p| p.is_running())
    }

    pub fn stats(&self) -> PollStats {
        self.poller
            .as_ref()
            .map(|p| p.stats().read().clone())
            .unwrap_or_default()
    }

    pub fn has_data(&self) -> bool {
        self.board.with_plan(|plan| plan.is_some())
    }

    /// Market titles in display order
    pub fn markets(&self) -> Vec<String> {
        self.board.with_plan(|plan| {
            plan.map(|p| p.titles().map(str::to_string).collect())
                .unwrap_or_default()
        })
    }

    pub fn total_rows(&self) -> usize {
        self.board.with_plan(|plan| plan.map_or(0, |p| p.total_rows()))
    }

    /// Selected index clamped to the markets currently shown
    pub fn current_index(&self) -> Option<usize> {
        let count = self.board.with_plan(|plan| plan.map_or(0, |p| p.market_count()));
        if count == 0 {
            None
        } else {
            Some(self.selected_index.min(count - 1))
        }
    }

    pub fn selected_table(&self) -> Option<MarketTable> {
        let index = self.current_index()?;
        self.board
            .with_plan(|plan| plan.and_then(|p| p.tables.get(index).cloned()))
    }

    pub fn next_market(&mut self) {
        let count = self.markets().len();
        if count > 0 {
            let current = self.current_index().unwrap_or(0);
            self.selected_index = (current + 1) % count;
        }
    }

    pub fn prev_market(&mut self) {
        let count = self.markets().len();
        if count > 0 {
            let current = self.current_index().unwrap_or(0);
            self.selected_index = if current == 0 { count - 1 } else { current - 1 };
        }
    }

    /// Ask the poller for an immediate cycle
    pub fn refresh(&mut self) {
        match &self.poller {
            Some(poller) => {
                poller.poll_now();
                self.status_message = Some("Refresh requested".to_string());
            }
            None => {
                self.status_message = Some("Poller not running".to_string());
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.next_market(),
            KeyCode::Char('k') | KeyCode::Up => self.prev_market(),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderPlan, RenderTarget};

    fn board_with(markets: &[&str]) -> MemoryBoard {
        let board = MemoryBoard::new();
        let plan = RenderPlan {
            tables: markets
                .iter()
                .map(|m| MarketTable { title: m.to_string(), rows: vec![] })
                .collect(),
        };
        board.replace_contents(&plan).unwrap();
        board
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = ViewerApp::new(board_with(&["KRW-BTC", "KRW-ETH", "KRW-XRP"]), "http://x");

        app.handle_key(KeyCode::Char('k'));
        assert_eq!(app.selected_table().unwrap().title, "KRW-XRP");

        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_table().unwrap().title, "KRW-BTC");

        app.handle_key(KeyCode::Char('j'));
        assert_eq!(app.selected_table().unwrap().title, "KRW-ETH");
    }

    #[test]
    fn test_selection_clamped_when_markets_shrink() {
        let board = board_with(&["A", "B", "C"]);
        let mut app = ViewerApp::new(board.clone(), "http://x");
        app.selected_index = 2;

        board
            .replace_contents(&RenderPlan {
                tables: vec![MarketTable { title: "A".into(), rows: vec![] }],
            })
            .unwrap();

        assert_eq!(app.current_index(), Some(0));
        assert_eq!(app.selected_table().unwrap().title, "A");
    }

    #[test]
    fn test_no_data() {
        let mut app = ViewerApp::new(MemoryBoard::new(), "http://x");

        assert!(!app.has_data());
        assert!(app.selected_table().is_none());
        app.next_market();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_quit_and_refresh_keys() {
        let mut app = ViewerApp::new(MemoryBoard::new(), "http://x");

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.status_message.as_deref(), Some("Poller not running"));

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
