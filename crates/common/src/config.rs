use std::time::Duration;

use crate::{Error, Result};

/// Settings for the collaborators around the analysis core, loaded from
/// environment variables at startup. Every variable is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Market data
    pub market_data_url: String,
    pub market_data_timeout: Duration,

    // Request defaults
    pub lookback_range: String,
    pub bar_interval: String,

    // Watchlist file path
    pub watchlist_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            market_data_url: "https://query1.finance.yahoo.com".to_string(),
            market_data_timeout: Duration::from_secs(10),
            lookback_range: "6mo".to_string(),
            bar_interval: "1d".to_string(),
            watchlist_path: "config/watchlist.toml".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` if present. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let market_data_timeout = match lookup("MARKET_DATA_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "MARKET_DATA_TIMEOUT_SECS must be a whole number of seconds, got: '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "MARKET_DATA_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.market_data_timeout,
        };

        Ok(Config {
            market_data_url: lookup("MARKET_DATA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.market_data_url),
            market_data_timeout,
            lookback_range: lookup("LOOKBACK_RANGE").unwrap_or(defaults.lookback_range),
            bar_interval: lookup("BAR_INTERVAL").unwrap_or(defaults.bar_interval),
            watchlist_path: lookup("WATCHLIST_PATH").unwrap_or(defaults.watchlist_path),
        })
    }
}
