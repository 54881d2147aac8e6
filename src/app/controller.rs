use crate::app::state::ExplorerState;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::fetch::{RateLimitedFetcher, RateLimiter};
use crate::ui::run_explorer;

/// Wires configuration, the shared rate limiter, and the explorer screen.
pub struct AppController {
    config: Config,
}

impl AppController {
    pub fn new(config: Config) -> Result<Self> {
        if config.tickers.is_empty() {
            return Err(AppError::message("No tickers configured in the application."));
        }
        Ok(Self { config })
    }

    pub async fn run(self) -> Result<()> {
        let limiter = RateLimiter::shared(self.config.api.cooldown);
        let fetcher = RateLimitedFetcher::from_config(&self.config.api, limiter)?;
        log::info!(
            "Starting explorer with {} tickers, credential {:?}",
            self.config.tickers.len(),
            self.config.api.credential.status()
        );

        let mut state = ExplorerState::new(self.config, fetcher);
        // The screen blocks on terminal input, keep it off the async workers.
        tokio::task::spawn_blocking(move || run_explorer(&mut state))
            .await?
            .map_err(AppError::from)
    }
}
