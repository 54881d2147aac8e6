use std::fmt;
use std::time::Duration;

use serde_json::Value;

pub mod fetcher;
pub mod limiter;
pub mod request;
pub mod transport;
pub mod worker;

pub use fetcher::RateLimitedFetcher;
pub use limiter::RateLimiter;
pub use request::HistoryRequest;
pub use transport::{HistoryTransport, HttpResponse, ReqwestTransport, TransportError};
pub use worker::{spawn_fetch, FetchReceiver};

/// Transport-level reason a fetch produced no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Connection,
    Timeout,
    Http { status: u16 },
    /// The upstream answered 2xx with a body that is not JSON.
    InvalidPayload,
}

impl NetworkErrorKind {
    /// Short remediation hint for the display layer.
    pub fn hint(&self) -> &'static str {
        match self {
            NetworkErrorKind::Connection => {
                "Could not reach the API server. Check your connection."
            }
            NetworkErrorKind::Timeout => "The API server took too long to respond.",
            NetworkErrorKind::Http { status: 401 } => {
                "Authentication failed. The API key may be invalid or expired."
            }
            NetworkErrorKind::Http { status: 403 } => {
                "Access forbidden. The key may lack permission for this endpoint."
            }
            NetworkErrorKind::Http { status: 404 } => "Endpoint not found. Check the API base URL.",
            NetworkErrorKind::Http { status: 429 } => {
                "Upstream rate limit exceeded. Wait a minute and try again."
            }
            NetworkErrorKind::Http { .. } => "The API returned an unexpected status.",
            NetworkErrorKind::InvalidPayload => "The API response was not valid JSON.",
        }
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkErrorKind::Connection => f.write_str("connection failed"),
            NetworkErrorKind::Timeout => f.write_str("request timed out"),
            NetworkErrorKind::Http { status } => write!(f, "HTTP status {status}"),
            NetworkErrorKind::InvalidPayload => f.write_str("invalid JSON payload"),
        }
    }
}

/// Outcome of one call to [`RateLimitedFetcher::fetch`]. Every variant is
/// reported to the user; none of them is fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Raw JSON body, passed through untouched.
    Success(Value),
    /// Refused locally; carries the time left until the next call may proceed.
    RateLimited(Duration),
    /// No API key configured.
    ConfigError,
    NetworkError(NetworkErrorKind),
    /// Well-formed response with no content.
    Empty,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            FetchResult::Success(value) => Some(value),
            _ => None,
        }
    }

    /// One-line summary suitable for a status bar.
    pub fn summary(&self) -> String {
        match self {
            FetchResult::Success(_) => "API data received".to_string(),
            FetchResult::RateLimited(remaining) => format!(
                "Rate limited: wait {}s before the next API call",
                ceil_secs(*remaining)
            ),
            FetchResult::ConfigError => format!(
                "API key not configured. Set {} in your environment or .env file",
                crate::config::API_KEY_ENV
            ),
            FetchResult::NetworkError(kind) => format!("Network error ({kind}): {}", kind.hint()),
            FetchResult::Empty => "The API returned no data for this ticker".to_string(),
        }
    }
}

/// Whole seconds, rounded up so a countdown never shows 0 while still limited.
pub fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_partial_seconds_up() {
        assert_eq!(ceil_secs(Duration::from_millis(11_001)), 12);
        assert_eq!(ceil_secs(Duration::from_secs(3)), 3);
        assert_eq!(ceil_secs(Duration::from_millis(1)), 1);
        assert_eq!(ceil_secs(Duration::ZERO), 0);
    }

    #[test]
    fn summaries_name_the_failure() {
        assert!(FetchResult::RateLimited(Duration::from_millis(4_200))
            .summary()
            .contains("wait 5s"));
        assert!(FetchResult::ConfigError.summary().contains("MASSIVE_API_KEY"));
        let http = FetchResult::NetworkError(NetworkErrorKind::Http { status: 401 });
        assert!(http.summary().contains("HTTP status 401"));
        assert!(http.summary().contains("Authentication failed"));
    }

    #[test]
    fn only_success_carries_a_payload() {
        let ok = FetchResult::Success(serde_json::json!({"status": "OK"}));
        assert!(ok.is_success());
        assert!(ok.payload().is_some());
        assert!(FetchResult::Empty.payload().is_none());
    }
}
