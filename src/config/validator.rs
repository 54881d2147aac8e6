use std::collections::HashSet;

use crate::error::{AppError, Result};

use super::{ApiConfig, Config};

/// Validate the resolved configuration and surface every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_tickers(&config.tickers, &mut issues);
    validate_api(&config.api, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "configuration invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_tickers(tickers: &[String], issues: &mut Vec<String>) {
    if tickers.is_empty() {
        issues.push("ticker list must not be empty".to_string());
        return;
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for ticker in tickers {
        if ticker.trim().is_empty() {
            issues.push("ticker list contains an empty symbol".to_string());
            continue;
        }
        if *ticker != ticker.to_uppercase() {
            issues.push(format!("ticker `{ticker}` must be uppercase"));
        }
        if !seen.insert(ticker.as_str()) {
            duplicates.push(ticker.clone());
        }
    }

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        issues.push(format!(
            "ticker list contains duplicates: {}",
            duplicates.join(", ")
        ));
    }
}

fn validate_api(api: &ApiConfig, issues: &mut Vec<String>) {
    match reqwest::Url::parse(&api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => issues.push(format!(
            "api base url must use http or https, got `{}`",
            url.scheme()
        )),
        Err(err) => issues.push(format!("api base url `{}` is invalid: {err}", api.base_url)),
    }

    if api.cooldown.is_zero() {
        issues.push("api cooldown must be greater than zero".to_string());
    }
    if api.timeout.is_zero() {
        issues.push("api timeout must be greater than zero".to_string());
    }
    if api.history_days <= 0 {
        issues.push("api history window must span at least one day".to_string());
    }
}
