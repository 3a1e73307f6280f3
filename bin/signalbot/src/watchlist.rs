use serde::{Deserialize, Serialize};

use common::{Error, HistoryRequest, Result};

/// Watchlist file (TOML), analyzed when no symbols are given on the command line.
///
/// Example `config/watchlist.toml`:
/// ```toml
/// [[ticker]]
/// symbol = "^NSEI"
///
/// [[ticker]]
/// symbol = "TATAMOTORS.NS"
/// range = "1y"
/// interval = "1d"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchlistFile {
    #[serde(rename = "ticker", default)]
    pub tickers: Vec<WatchlistEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchlistEntry {
    /// Ticker symbol, e.g. "RELIANCE.NS".
    pub symbol: String,
    /// Lookback window override, e.g. "6mo".
    #[serde(default)]
    pub range: Option<String>,
    /// Bar interval override, e.g. "1d".
    #[serde(default)]
    pub interval: Option<String>,
}

impl WatchlistFile {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Failed to parse watchlist at '{path}': {e}")))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        if let Some(entry) = file.tickers.iter().find(|t| t.symbol.trim().is_empty()) {
            return Err(Error::Config(format!("empty symbol in watchlist entry {entry:?}")));
        }
        Ok(file)
    }

    /// One request per entry, filling unset fields from the given defaults.
    pub fn requests(&self, default_range: &str, default_interval: &str) -> Vec<HistoryRequest> {
        self.tickers
            .iter()
            .map(|t| {
                HistoryRequest::new(
                    t.symbol.trim(),
                    t.range.as_deref().unwrap_or(default_range),
                    t.interval.as_deref().unwrap_or(default_interval),
                )
            })
            .collect()
    }
}
