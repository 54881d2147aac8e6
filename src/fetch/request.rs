use chrono::{Duration as ChronoDuration, NaiveDate};
use reqwest::Url;

use crate::error::{AppError, Result};

const DATE_FMT: &str = "%Y-%m-%d";
const API_KEY_PARAM: &str = "apiKey";

/// Daily aggregates request for one ticker over a trailing date window.
#[derive(Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    url: Url,
}

impl HistoryRequest {
    /// `{base}/v2/aggs/ticker/{ticker}/range/1/day/{from}/{to}?apiKey={credential}`
    pub fn daily_aggregates(
        base_url: &Url,
        ticker: &str,
        credential: &str,
        today: NaiveDate,
        history_days: i64,
    ) -> Result<Self> {
        let from = today - ChronoDuration::days(history_days);
        let from_label = from.format(DATE_FMT).to_string();
        let to_label = today.format(DATE_FMT).to_string();

        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::message(format!("`{base_url}` cannot carry a request path")))?
            .pop_if_empty()
            .extend([
                "v2",
                "aggs",
                "ticker",
                ticker,
                "range",
                "1",
                "day",
                from_label.as_str(),
                to_label.as_str(),
            ]);
        url.query_pairs_mut().append_pair(API_KEY_PARAM, credential);

        Ok(Self {
            ticker: ticker.to_string(),
            from,
            to: today,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL with the API key replaced, safe for logs and error messages.
    pub fn redacted_url(&self) -> String {
        let mut redacted = self.url.clone();
        redacted.set_query(None);
        redacted
            .query_pairs_mut()
            .append_pair(API_KEY_PARAM, "***");
        redacted.to_string()
    }
}

impl std::fmt::Debug for HistoryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryRequest")
            .field("ticker", &self.ticker)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("url", &self.redacted_url())
            .finish()
    }
}
