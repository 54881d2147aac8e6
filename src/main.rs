mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;

use cli::{Cli, Commands};
use stock_explorer::app::bootstrap;
use stock_explorer::config::{Config, CredentialStatus, API_KEY_ENV};
use stock_explorer::fetch::{FetchResult, RateLimitedFetcher, RateLimiter};
use stock_explorer::series::{self, GeneratedSeries};
use stock_explorer::utils::truncate_preview;

const PAYLOAD_PREVIEW_CHARS: usize = 500;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the alternate screen, so the explorer stays quiet unless asked.
    let default_filter = if cli.is_interactive() { "off" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = Config::from_env()?;

    match cli.command {
        None | Some(Commands::Interactive) => bootstrap::run(config).await?,
        Some(Commands::Generate {
            ticker,
            points,
            json,
        }) => print_series(&series::generate(&ticker, points), json)?,
        Some(Commands::Fetch { ticker }) => fetch_once(&config, ticker).await?,
        Some(Commands::Tickers) => {
            for ticker in &config.tickers {
                println!("{ticker}");
            }
        }
        Some(Commands::CheckKey) => check_key(&config),
    }

    Ok(())
}

fn print_series(series: &GeneratedSeries, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(series)?);
        return Ok(());
    }

    println!("{} ({} days, mock data)", series.ticker, series.len());
    println!("{:>4}  {:>10}  {:>10}", "Day", "High", "Low");
    for sample in &series.samples {
        println!("{:>4}  {:>10.2}  {:>10.2}", sample.day, sample.high, sample.low);
    }
    Ok(())
}

async fn fetch_once(config: &Config, ticker: String) -> Result<()> {
    if !config.contains_ticker(&ticker) {
        log::warn!("{ticker} is not one of the built-in tickers; requesting anyway");
    }

    let limiter = RateLimiter::shared(config.api.cooldown);
    let fetcher = RateLimitedFetcher::from_config(&config.api, limiter)?;
    let credential = config.api.credential.expose().to_string();

    let result = tokio::task::spawn_blocking(move || fetcher.fetch(&ticker, &credential)).await?;

    match result {
        FetchResult::Success(payload) => {
            let pretty = serde_json::to_string_pretty(&payload)?;
            println!("{}", truncate_preview(&pretty, PAYLOAD_PREVIEW_CHARS));
            Ok(())
        }
        empty @ FetchResult::Empty => {
            println!("{}", empty.summary());
            Ok(())
        }
        other => bail!("{}", other.summary()),
    }
}

fn check_key(config: &Config) {
    let credential = &config.api.credential;
    match credential.status() {
        CredentialStatus::Configured => {
            println!("API key configured: {}", credential.preview());
        }
        CredentialStatus::Placeholder => {
            println!(
                "{API_KEY_ENV} still holds the placeholder value. Replace it with a real key."
            );
        }
        CredentialStatus::Missing => {
            println!("{API_KEY_ENV} is not set. Add it to your environment or a .env file.");
        }
    }
}
