use std::time::Duration;

pub mod credential;
pub mod tickers;
pub mod validator;

pub use credential::{Credential, CredentialStatus, API_KEY_ENV, UNSET_SENTINEL};
pub use tickers::STOCK_TICKERS;

/// Environment variable that overrides the aggregates API host.
pub const BASE_URL_ENV: &str = "MASSIVE_API_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.massive.com";

/// Upstream allows 5 calls per minute, so one call every 12 seconds.
const CALLS_PER_MINUTE: u64 = 5;

/// Settings for the outbound aggregates request.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub credential: Credential,
    pub cooldown: Duration,
    pub timeout: Duration,
    pub history_days: i64,
}

/// Settings for the synthetic series shown in the plots.
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub num_points: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tickers: Vec<String>,
    pub api: ApiConfig,
    pub series: SeriesConfig,
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            tickers: STOCK_TICKERS.iter().map(|t| t.to_string()).collect(),
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                credential: Credential::unset(),
                cooldown: Duration::from_secs(60 / CALLS_PER_MINUTE),
                timeout: Duration::from_secs(10),
                history_days: 730,
            },
            series: SeriesConfig { num_points: 30 },
        }
    }

    /// Builtin defaults overlaid with `.env` and process environment values.
    pub fn from_env() -> crate::error::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("Ignoring unreadable .env file: {}", err),
        }

        let mut config = Self::builtin();
        config.api.credential = Credential::from_env();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            let trimmed = base_url.trim();
            if !trimmed.is_empty() {
                config.api.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }

        validator::validate_config(&config)?;
        Ok(config)
    }

    pub fn contains_ticker(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }
}
