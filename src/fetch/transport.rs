use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;

use super::request::HistoryRequest;

const CLIENT_USER_AGENT: &str = concat!("stock-explorer/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request timed out: {0}")]
    Timeout(String),
}

/// Blocking seam between the fetcher and the network.
pub trait HistoryTransport: Send + Sync {
    fn get(&self, request: &HistoryRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by `reqwest`'s blocking client.
///
/// A client is built per request, so the transport can be created on any
/// thread (including inside the tokio runtime) and used from worker threads.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self) -> Result<Client, TransportError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                TransportError::Connection(format!("failed to construct HTTP client: {err}"))
            })
    }
}

impl HistoryTransport for ReqwestTransport {
    fn get(&self, request: &HistoryRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .client()?
            .get(request.url().clone())
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(classify)?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    // Strip the URL: it carries the API key as a query parameter.
    let err = err.without_url();
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}
