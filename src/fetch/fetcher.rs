use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use reqwest::Url;
use serde_json::Value;

use crate::config::{credential::is_unset, ApiConfig};
use crate::error::{AppError, Result};

use super::limiter::RateLimiter;
use super::request::HistoryRequest;
use super::transport::{HistoryTransport, HttpResponse, ReqwestTransport, TransportError};
use super::{FetchResult, NetworkErrorKind};

/// Issues at most one aggregates request per call, gated by a shared [`RateLimiter`].
#[derive(Clone)]
pub struct RateLimitedFetcher {
    base_url: Url,
    history_days: i64,
    limiter: Arc<RateLimiter>,
    transport: Arc<dyn HistoryTransport>,
}

impl RateLimitedFetcher {
    pub fn new(
        api: &ApiConfig,
        limiter: Arc<RateLimiter>,
        transport: Arc<dyn HistoryTransport>,
    ) -> Result<Self> {
        let base_url = Url::parse(&api.base_url).map_err(|err| {
            AppError::message(format!("invalid api base url `{}`: {err}", api.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::message(format!(
                "api base url `{}` cannot carry a request path",
                api.base_url
            )));
        }

        Ok(Self {
            base_url,
            history_days: api.history_days,
            limiter,
            transport,
        })
    }

    /// Fetcher talking to the real API through `reqwest`.
    pub fn from_config(api: &ApiConfig, limiter: Arc<RateLimiter>) -> Result<Self> {
        Self::new(api, limiter, Arc::new(ReqwestTransport::new(api.timeout)))
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn fetch(&self, ticker: &str, credential: &str) -> FetchResult {
        self.fetch_at(ticker, credential, Instant::now(), Local::now().date_naive())
    }

    fn fetch_at(
        &self,
        ticker: &str,
        credential: &str,
        now: Instant,
        today: NaiveDate,
    ) -> FetchResult {
        if is_unset(credential) {
            log::info!("Skipping API call for {ticker}: no API key configured");
            return FetchResult::ConfigError;
        }

        if let Err(remaining) = self.limiter.try_acquire_at(now) {
            log::info!(
                "Refusing API call for {ticker}: {:.1}s of cooldown left",
                remaining.as_secs_f64()
            );
            return FetchResult::RateLimited(remaining);
        }

        // The slot is claimed from here on, whatever the outcome.
        let request = match HistoryRequest::daily_aggregates(
            &self.base_url,
            ticker,
            credential,
            today,
            self.history_days,
        ) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("Could not build aggregates request for {ticker}: {err}");
                return FetchResult::NetworkError(NetworkErrorKind::Connection);
            }
        };

        log::debug!("Requesting {}", request.redacted_url());
        match self.transport.get(&request) {
            Ok(response) => classify_response(response),
            Err(err) => {
                log::warn!("Aggregates request for {ticker} failed: {err}");
                FetchResult::NetworkError(match err {
                    TransportError::Connection(_) => NetworkErrorKind::Connection,
                    TransportError::Timeout(_) => NetworkErrorKind::Timeout,
                })
            }
        }
    }
}

/// Map a completed HTTP exchange onto a [`FetchResult`] without inspecting fields.
pub fn classify_response(response: HttpResponse) -> FetchResult {
    if !response.is_success() {
        log::warn!("Aggregates endpoint returned status {}", response.status);
        return FetchResult::NetworkError(NetworkErrorKind::Http {
            status: response.status,
        });
    }

    if response.body.trim().is_empty() {
        return FetchResult::Empty;
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) if is_structurally_empty(&value) => FetchResult::Empty,
        Ok(value) => FetchResult::Success(value),
        Err(err) => {
            log::warn!("Aggregates response is not JSON: {err}");
            FetchResult::NetworkError(NetworkErrorKind::InvalidPayload)
        }
    }
}

fn is_structurally_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
