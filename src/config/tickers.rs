/// Tickers offered in the explorer, in display order.
pub const STOCK_TICKERS: [&str; 20] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "JPM", "V", "JNJ", "WMT", "PG", "MA",
    "UNH", "HD", "DIS", "BAC", "XOM", "NFLX", "KO",
];
