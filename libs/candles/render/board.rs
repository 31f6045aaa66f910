//! In-memory render target shared with the terminal viewer

use std::sync::Arc;

use parking_lot::RwLock;

use super::{RenderPlan, RenderTarget, Result};

#[derive(Debug, Default)]
struct BoardState {
    plan: Option<RenderPlan>,
    /// Incremented on every replace
    revision: u64,
}

/// Latest render plan, cheap to clone and share across tasks
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    inner: Arc<RwLock<BoardState>>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the plan currently shown, `None` before the first successful cycle
    pub fn snapshot(&self) -> Option<RenderPlan> {
        self.inner.read().plan.clone()
    }

    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Run `f` against the current plan without cloning it
    pub fn with_plan<R>(&self, f: impl FnOnce(Option<&RenderPlan>) -> R) -> R {
        let state = self.inner.read();
        f(state.plan.as_ref())
    }
}

impl RenderTarget for MemoryBoard {
    fn replace_contents(&self, plan: &RenderPlan) -> Result<()> {
        let mut state = self.inner.write();
        state.plan = Some(plan.clone());
        state.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MarketTable;

    #[test]
    fn test_replace_overwrites_previous_plan() {
        let board = MemoryBoard::new();
        assert!(board.snapshot().is_none());
        assert_eq!(board.revision(), 0);

        let first = RenderPlan {
            tables: vec![MarketTable { title: "KRW-BTC".into(), rows: vec![] }],
        };
        board.replace_contents(&first).unwrap();

        let second = RenderPlan {
            tables: vec![MarketTable { title: "KRW-ETH".into(), rows: vec![] }],
        };
        board.replace_contents(&second).unwrap();

        assert_eq!(board.snapshot(), Some(second));
        assert_eq!(board.revision(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let board = MemoryBoard::new();
        let viewer = board.clone();

        board.replace_contents(&RenderPlan::default()).unwrap();

        assert_eq!(viewer.revision(), 1);
        assert_eq!(viewer.with_plan(|p| p.map(|p| p.market_count())), Some(0));
    }
}
