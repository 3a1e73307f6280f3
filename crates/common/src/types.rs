use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One OHLCV bar of price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Price history for a single instrument, oldest bar first.
///
/// Construction guarantees strictly ascending timestamps and a finite,
/// positive close on every bar. The series may be empty; indicator
/// computation rejects that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self> {
        let symbol = symbol.into();

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(Error::InvalidSeries(format!(
                    "{symbol}: close at index {i} is not a positive number ({})",
                    bar.close
                )));
            }
        }

        if let Some(i) = bars
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(Error::InvalidSeries(format!(
                "{symbol}: timestamp at index {} does not follow {}",
                i + 1,
                bars[i].timestamp
            )));
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

/// Indicator values for one bar. `None` marks a value still inside its
/// warm-up window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub rsi14: Option<f64>,
    pub ema50: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl IndicatorReading {
    pub fn is_complete(&self) -> bool {
        self.rsi14.is_some()
            && self.ema50.is_some()
            && self.macd.is_some()
            && self.macd_signal.is_some()
    }
}

/// Price position relative to the 50-period EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "Up"),
            Trend::Down => write!(f, "Down"),
            Trend::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Discrete technical signal produced by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Bullish => write!(f, "BULLISH (BUY CALL)"),
            Signal::Bearish => write!(f, "BEARISH (BUY PUT)"),
            Signal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Result of one analysis request. Only ever built from a complete reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub latest_price: f64,
    pub latest_rsi: f64,
    pub latest_ema50: f64,
    pub latest_macd: f64,
    pub latest_macd_signal: f64,
    pub trend: Trend,
    pub signal: Signal,
    /// Sum of the RSI, trend and MACD votes, in `-3..=3`.
    pub score: i8,
}
