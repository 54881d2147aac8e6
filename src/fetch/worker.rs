use std::sync::mpsc::{self, Receiver};
use std::thread;

use super::{FetchResult, RateLimitedFetcher};

pub type FetchReceiver = Receiver<FetchResult>;

/// Run one fetch on a background thread so the UI keeps drawing while the
/// request is in flight. The receiver yields exactly one result.
pub fn spawn_fetch(fetcher: &RateLimitedFetcher, ticker: &str, credential: &str) -> FetchReceiver {
    let fetcher = fetcher.clone();
    let ticker = ticker.to_string();
    let credential = credential.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = fetcher.fetch(&ticker, &credential);
        let _ = tx.send(result);
    });

    rx
}
