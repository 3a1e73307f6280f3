use async_trait::async_trait;

use crate::{PriceSeries, Result};

/// Parameters of one price-history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Ticker symbol, e.g. "^NSEI" or "RELIANCE.NS".
    pub symbol: String,
    /// Lookback window, e.g. "6mo".
    pub range: String,
    /// Bar interval, e.g. "1d".
    pub interval: String,
}

impl HistoryRequest {
    pub fn new(
        symbol: impl Into<String>,
        range: impl Into<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            range: range.into(),
            interval: interval.into(),
        }
    }
}

/// Abstraction over the price-history provider.
///
/// `YahooClient` in `crates/market` implements this over HTTP. Tests use
/// in-memory implementations. The analysis core never calls this itself;
/// callers fetch a `PriceSeries` first and hand it over.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the price history described by `request`, oldest bar first.
    async fn price_history(&self, request: &HistoryRequest) -> Result<PriceSeries>;
}
