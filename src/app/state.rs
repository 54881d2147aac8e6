use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, CredentialStatus};
use crate::fetch::{spawn_fetch, FetchReceiver, FetchResult, RateLimitedFetcher};
use crate::series::{GeneratedSeries, SeriesCache};
use crate::ui::components::ApiPanelState;

/// A fetch that has been handed to a worker and not yet answered.
struct PendingFetch {
    ticker: String,
    receiver: FetchReceiver,
}

/// Runtime data behind the explorer screen: cursor, selection, plots and API panel.
pub struct ExplorerState {
    config: Config,
    fetcher: RateLimitedFetcher,
    cache: SeriesCache,
    cursor: usize,
    selected: Option<String>,
    series: Option<Arc<GeneratedSeries>>,
    pending: Option<PendingFetch>,
    api: ApiPanelState,
}

impl ExplorerState {
    pub fn new(config: Config, fetcher: RateLimitedFetcher) -> Self {
        Self {
            config,
            fetcher,
            cache: SeriesCache::new(),
            cursor: 0,
            selected: None,
            series: None,
            pending: None,
            api: ApiPanelState::default(),
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.config.tickers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn series(&self) -> Option<&GeneratedSeries> {
        self.series.as_deref()
    }

    pub fn api(&self) -> &ApiPanelState {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut ApiPanelState {
        &mut self.api
    }

    pub fn credential_status(&self) -> CredentialStatus {
        self.config.api.credential.status()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the shared limiter admits another call.
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        self.fetcher.limiter().remaining()
    }

    pub fn move_up(&mut self) {
        let len = self.config.tickers.len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn move_down(&mut self) {
        let len = self.config.tickers.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Plot the ticker under the cursor and request its history.
    ///
    /// While an earlier request is still in flight the plot switches but no
    /// new request starts; that request holds the cooldown slot, so its
    /// payload is the one worth showing.
    pub fn select_current(&mut self) {
        let Some(ticker) = self.config.tickers.get(self.cursor).cloned() else {
            return;
        };

        self.series = Some(
            self.cache
                .get_or_generate(&ticker, self.config.series.num_points),
        );
        self.selected = Some(ticker.clone());
        self.start_fetch(ticker);
    }

    /// Request the selected ticker again without regenerating its plot.
    pub fn refetch(&mut self) {
        if let Some(ticker) = self.selected.clone() {
            self.start_fetch(ticker);
        }
    }

    fn start_fetch(&mut self, ticker: String) {
        if let Some(pending) = &self.pending {
            log::debug!("Keeping in-flight fetch for {}; {ticker} waits", pending.ticker);
            return;
        }

        let receiver = spawn_fetch(
            &self.fetcher,
            &ticker,
            self.config.api.credential.expose(),
        );
        self.api.set_loading(&ticker);
        self.pending = Some(PendingFetch { ticker, receiver });
    }

    /// Move a finished fetch into the API panel. Returns true when the panel changed.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };

        let outcome = match pending.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => None,
        };

        let Some(PendingFetch { ticker, .. }) = self.pending.take() else {
            return false;
        };

        match outcome {
            Some(result) => {
                self.api.set_result(&ticker, result);
                if let Some(selected) = self.selected.as_deref().filter(|s| *s != ticker) {
                    self.api
                        .set_note(format!("showing {ticker}; press r to request {selected}"));
                }
            }
            None => {
                log::error!("Fetch worker for {ticker} stopped before reporting a result");
                self.api.reset(format!(
                    "Request for {ticker} ended without a result; press r to retry"
                ));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;
    use crate::fetch::{
        HistoryRequest, HistoryTransport, HttpResponse, RateLimiter, TransportError,
    };
    use crate::ui::components::ApiStatus;
    use std::time::Instant;

    struct CannedTransport;

    impl HistoryTransport for CannedTransport {
        fn get(&self, _request: &HistoryRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::ok_json(r#"{"ticker":"AAPL","resultsCount":1}"#))
        }
    }

    fn state_with(credential: &str) -> ExplorerState {
        let mut config = Config::builtin();
        config.api.credential = Credential::new(credential);
        let limiter = RateLimiter::shared(config.api.cooldown);
        let fetcher =
            RateLimitedFetcher::new(&config.api, limiter, Arc::new(CannedTransport)).unwrap();
        ExplorerState::new(config, fetcher)
    }

    fn wait_for_result(state: &mut ExplorerState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll_fetch() {
            assert!(Instant::now() < deadline, "fetch never completed");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let mut state = state_with("");
        let last = state.tickers().len() - 1;

        state.move_up();
        assert_eq!(state.cursor(), last);
        state.move_down();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn selecting_plots_series_and_reports_missing_key() {
        let mut state = state_with("");
        state.move_down();
        state.select_current();

        assert_eq!(state.selected(), Some("MSFT"));
        let series = state.series().expect("series");
        assert_eq!(series.ticker, "MSFT");
        assert_eq!(series.len(), 30);
        assert!(state.is_loading());

        wait_for_result(&mut state);
        assert!(!state.is_loading());
        match state.api().status() {
            ApiStatus::Done { ticker, result, .. } => {
                assert_eq!(ticker, "MSFT");
                assert_eq!(result, &FetchResult::ConfigError);
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn second_request_inside_cooldown_is_rate_limited() {
        let mut state = state_with("abcd1234efgh5678");
        state.select_current();
        wait_for_result(&mut state);
        assert!(matches!(
            state.api().status(),
            ApiStatus::Done { result: FetchResult::Success(_), .. }
        ));
        assert!(state.cooldown_remaining().is_some());

        let plotted = state.series().cloned();
        state.refetch();
        wait_for_result(&mut state);
        assert!(matches!(
            state.api().status(),
            ApiStatus::Done { result: FetchResult::RateLimited(_), .. }
        ));
        assert_eq!(state.series().cloned(), plotted);
    }

    #[test]
    fn selecting_during_a_fetch_keeps_the_in_flight_request() {
        let mut state = state_with("abcd1234efgh5678");
        state.select_current();
        state.move_down();
        state.select_current();

        assert_eq!(state.selected(), Some("MSFT"));
        assert_eq!(state.series().map(|s| s.ticker.as_str()), Some("MSFT"));

        wait_for_result(&mut state);
        match state.api().status() {
            ApiStatus::Done { ticker, result, .. } => {
                assert_eq!(ticker, "AAPL");
                assert!(result.is_success());
            }
            other => panic!("unexpected status {other:?}"),
        }
        assert_eq!(state.api().note(), Some("showing AAPL; press r to request MSFT"));
        assert!(!state.is_loading());
    }

    #[test]
    fn vanished_worker_is_not_reported_as_a_network_error() {
        let mut state = state_with("");
        let (tx, receiver) = std::sync::mpsc::channel::<FetchResult>();
        drop(tx);
        state.selected = Some("AAPL".to_string());
        state.pending = Some(PendingFetch {
            ticker: "AAPL".to_string(),
            receiver,
        });

        assert!(state.poll_fetch());
        assert_eq!(state.api().status(), &ApiStatus::Idle);
        assert!(state.api().note().is_some_and(|n| n.contains("without a result")));
        assert!(!state.is_loading());
    }

    #[test]
    fn refetch_without_selection_does_nothing() {
        let mut state = state_with("");
        state.refetch();
        assert!(!state.is_loading());
        assert!(!state.poll_fetch());
    }
}
