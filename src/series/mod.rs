//! Deterministic synthetic price series.
//!
//! Each ticker maps to a fixed seed, so the plotted series for a symbol is
//! the same on every run. Nothing here touches the network; fetched payloads
//! are handled by [`crate::fetch`] and never feed into these values.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

pub mod cache;
pub mod seed;

pub use cache::SeriesCache;
pub use seed::seed_for;

/// Number of days generated when the caller does not ask for a length.
pub const DEFAULT_POINTS: usize = 30;

/// Smallest price a sample may carry.
pub const PRICE_FLOOR: f64 = 0.01;

const BASE_PRICE_MIN: f64 = 50.0;
const BASE_PRICE_MAX: f64 = 500.0;
/// Largest daily move, as a fraction of the base price.
const WALK_STEP: f64 = 0.05;
/// The walk never drifts further than this fraction away from the base price.
const WALK_LIMIT: f64 = 0.40;
const SPREAD_MIN: f64 = 0.005;
const SPREAD_MAX: f64 = 0.04;

/// One generated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSample {
    pub day: usize,
    pub high: f64,
    pub low: f64,
}

impl SeriesSample {
    /// Build a sample that satisfies `0 < low <= high` whatever the draws were.
    fn normalized(day: usize, high: f64, low: f64) -> Self {
        let (mut high, mut low) = if low > high { (low, high) } else { (high, low) };
        high = round_cents(high.max(PRICE_FLOOR));
        low = round_cents(low.max(PRICE_FLOOR)).min(high);
        Self { day, high, low }
    }
}

/// A full run of samples for one ticker, days `1..=len` in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSeries {
    pub ticker: String,
    pub samples: Vec<SeriesSample>,
}

impl GeneratedSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn days(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.day).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.low).collect()
    }

    /// Lowest low and highest high, or `None` for an empty series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let min = self
            .samples
            .iter()
            .map(|s| s.low)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .samples
            .iter()
            .map(|s| s.high)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Generate `num_points` days of high/low prices for `ticker`.
///
/// Any string is accepted, including the empty string. Output depends only on
/// the arguments.
pub fn generate(ticker: &str, num_points: usize) -> GeneratedSeries {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_for(ticker));
    let base: f64 = rng.gen_range(BASE_PRICE_MIN..BASE_PRICE_MAX);
    let walk_bound = base * WALK_LIMIT;

    let mut walk = 0.0_f64;
    let mut samples = Vec::with_capacity(num_points);
    for day in 1..=num_points {
        let step = rng.gen_range(-WALK_STEP..=WALK_STEP) * base;
        walk = (walk + step).clamp(-walk_bound, walk_bound);

        let high = base + walk;
        let spread = rng.gen_range(SPREAD_MIN..=SPREAD_MAX) * high.abs();
        let low = high - spread;

        samples.push(SeriesSample::normalized(day, high, low));
    }

    GeneratedSeries {
        ticker: ticker.to_string(),
        samples,
    }
}

pub fn generate_default(ticker: &str) -> GeneratedSeries {
    generate(ticker, DEFAULT_POINTS)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STOCK_TICKERS;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn every_length_is_honoured(ticker: String, num_points: u8) -> bool {
        let n = usize::from(num_points);
        let series = generate(&ticker, n);
        series.len() == n
            && series.days() == (1..=n).collect::<Vec<_>>()
            && series.highs().len() == n
            && series.lows().len() == n
    }

    #[quickcheck]
    fn prices_are_positive_and_ordered(ticker: String, num_points: u8) -> bool {
        generate(&ticker, usize::from(num_points))
            .samples
            .iter()
            .all(|s| s.low > 0.0 && s.high > 0.0 && s.low <= s.high)
    }

    #[quickcheck]
    fn repeated_calls_are_identical(ticker: String, num_points: u8) -> bool {
        let n = usize::from(num_points);
        generate(&ticker, n) == generate(&ticker, n)
    }

    #[test]
    fn default_length_is_thirty_days() {
        let series = generate_default("AAPL");
        assert_eq!(series.len(), 30);
        assert_eq!(series.days().first(), Some(&1));
        assert_eq!(series.days().last(), Some(&30));
    }

    #[test]
    fn aapl_is_stable_and_differs_from_googl() {
        let first = generate("AAPL", 30);
        let second = generate("AAPL", 30);
        assert_eq!(first, second);

        let other = generate("GOOGL", 30);
        assert!(first.highs() != other.highs() || first.lows() != other.lows());
    }

    #[test]
    fn each_listed_ticker_gets_its_own_series() {
        let all: Vec<GeneratedSeries> = STOCK_TICKERS
            .iter()
            .map(|t| generate_default(t))
            .collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.samples, b.samples, "{} and {} collide", a.ticker, b.ticker);
            }
        }
    }

    #[test]
    fn zero_points_yields_empty_series() {
        let series = generate("AAPL", 0);
        assert!(series.is_empty());
        assert_eq!(series.price_bounds(), None);
    }

    #[test]
    fn odd_tickers_do_not_panic() {
        for ticker in ["", " ", "brk.b", "日本株", "\u{0}\n\t", "🚀🚀🚀"] {
            let series = generate(ticker, 10);
            assert_eq!(series.len(), 10);
            assert!(series.samples.iter().all(|s| s.low <= s.high));
        }
    }

    #[test]
    fn base_prices_stay_near_the_configured_band() {
        for ticker in STOCK_TICKERS {
            let (min, max) = generate(ticker, 60).price_bounds().expect("non-empty");
            assert!(min >= BASE_PRICE_MIN * (1.0 - WALK_LIMIT) * (1.0 - SPREAD_MAX) - 0.01);
            assert!(max <= BASE_PRICE_MAX * (1.0 + WALK_LIMIT) + 0.01);
        }
    }

    #[test]
    fn normalization_swaps_and_floors() {
        let swapped = SeriesSample::normalized(1, 10.0, 12.5);
        assert_eq!((swapped.high, swapped.low), (12.5, 10.0));

        let floored = SeriesSample::normalized(2, -3.0, -7.0);
        assert_eq!((floored.high, floored.low), (PRICE_FLOOR, PRICE_FLOOR));
    }
}
