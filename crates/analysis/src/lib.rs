//! Technical-indicator core: RSI/EMA/MACD derivation and deterministic
//! signal scoring. Pure functions of their inputs, no I/O.

pub mod engine;
pub mod indicators;
pub mod scorer;
pub mod verdict;

pub use engine::{latest_complete, IndicatorEngine, TREND_WARMUP_BARS};
pub use scorer::SignalScorer;
pub use verdict::Verdict;

use common::{AnalysisReport, Error, IndicatorReading, PriceSeries, Result};

/// Compute one indicator reading per bar of `series`.
pub fn compute_indicators(series: &PriceSeries) -> Result<Vec<IndicatorReading>> {
    IndicatorEngine::default().compute(series)
}

/// Score a complete reading against the close of the same bar.
pub fn score_signal(latest_reading: &IndicatorReading, latest_close: f64) -> Result<AnalysisReport> {
    SignalScorer.score(latest_reading, latest_close)
}

/// Full pipeline: indicators, then the latest complete reading scored
/// against its own bar's close.
pub fn analyze(series: &PriceSeries) -> Result<AnalysisReport> {
    let engine = IndicatorEngine::default();
    let readings = engine.compute(series)?;

    let (index, reading) = latest_complete(&readings).ok_or(Error::InsufficientData {
        bars: series.len(),
        required: engine.min_bars(),
    })?;

    score_signal(reading, series.bars()[index].close)
}
