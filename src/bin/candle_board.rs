//! Candle Board - headless poller
//!
//! Polls `<base_url>/api/data` every 5 seconds and rewrites an HTML page with
//! one table per market on every successful poll.
//!
//! Usage: `candle_board [config.yaml]`

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use candle_board::bin_common::{config_path_from_args, parse_args, BinaryRunner, RunConfig};
use candles::{
    init_tracing, BoardConfig, CandlePoller, HtmlFileTarget, HtmlPage, HttpCandleSource,
    SharedPollStats, ShutdownManager,
};

struct BoardRunner {
    run_config: RunConfig,
    board_config: BoardConfig,
    shutdown: ShutdownManager,
    stats: Option<SharedPollStats>,
}

impl BinaryRunner for BoardRunner {
    async fn run(&mut self) -> Result<()> {
        let template = self.board_config.load_template()?;
        let page = HtmlPage::from_template(&template, &self.board_config.container_id)?;
        let target = HtmlFileTarget::new(page, self.board_config.output_path.clone());

        let source = HttpCandleSource::new(
            &self.board_config.base_url,
            self.board_config.request_timeout(),
        )?;

        info!("Feed:   {}", source.url());
        info!("Output: {}", target.path().display());

        let poller = CandlePoller::new(Arc::new(source), Arc::new(target))
            .with_heartbeat(self.run_config.heartbeat_interval());
        let handle = poller.start();
        self.stats = Some(handle.stats());

        self.shutdown.wait().await;
        handle.stop().await;

        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }

    fn final_stats(&self) -> Option<String> {
        self.stats.as_ref().map(|stats| stats.read().summary())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = parse_args();
    let config_path = config_path_from_args(&args);
    let board_config = BoardConfig::load_or_default(&config_path)?;

    let shutdown = ShutdownManager::new();
    shutdown.spawn_signal_handler();

    let mut runner = BoardRunner {
        run_config: RunConfig::new("Candle Board"),
        board_config,
        shutdown,
        stats: None,
    };

    runner.execute().await
}
