use std::collections::HashMap;
use std::sync::Arc;

use super::{generate, GeneratedSeries};

/// Memoizes generated series. Entries never go stale since generation is pure.
#[derive(Default)]
pub struct SeriesCache {
    entries: HashMap<(String, usize), Arc<GeneratedSeries>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&mut self, ticker: &str, num_points: usize) -> Arc<GeneratedSeries> {
        let key = (ticker.to_string(), num_points);
        Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::new(generate(ticker, num_points))),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
