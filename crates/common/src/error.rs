use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The series is empty or too short to yield a complete indicator reading.
    #[error("Insufficient data: {bars} bars, at least {required} required")]
    InsufficientData { bars: usize, required: usize },

    /// Scoring was attempted against a reading that is still warming up.
    #[error("Incomplete indicators: {missing} is undefined")]
    IncompleteIndicators { missing: &'static str },

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unrecognized verdict: {0}")]
    Verdict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
