use common::{AnalysisReport, Error, IndicatorReading, Result, Signal, Trend};

/// RSI at or below this never votes bullish; strictly below it does.
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI at or above this never votes bearish; strictly above it does.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Absolute score needed for a directional signal.
pub const SIGNAL_THRESHOLD: i8 = 2;

/// Fixed three-vote rule table turning the latest indicators into a signal.
///
/// | vote  | +1                  | −1                     |
/// |-------|---------------------|------------------------|
/// | RSI   | rsi < 30            | rsi > 70               |
/// | trend | close > ema50       | close <= ema50         |
/// | MACD  | macd > macd_signal  | macd <= macd_signal    |
///
/// A score of 2 or more is `Bullish`, −2 or less is `Bearish`, anything else
/// `Neutral`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalScorer;

impl SignalScorer {
    pub fn score(&self, reading: &IndicatorReading, latest_close: f64) -> Result<AnalysisReport> {
        let rsi = require(reading.rsi14, "rsi14")?;
        let ema50 = require(reading.ema50, "ema50")?;
        let macd = require(reading.macd, "macd")?;
        let macd_signal = require(reading.macd_signal, "macd_signal")?;

        let score = rsi_vote(rsi) + trend_vote(latest_close, ema50) + macd_vote(macd, macd_signal);

        Ok(AnalysisReport {
            latest_price: latest_close,
            latest_rsi: rsi,
            latest_ema50: ema50,
            latest_macd: macd,
            latest_macd_signal: macd_signal,
            trend: trend(latest_close, ema50),
            signal: signal_for(score),
            score,
        })
    }
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64> {
    value.ok_or(Error::IncompleteIndicators { missing: field })
}

fn rsi_vote(rsi: f64) -> i8 {
    if rsi < RSI_OVERSOLD {
        1
    } else if rsi > RSI_OVERBOUGHT {
        -1
    } else {
        0
    }
}

fn trend_vote(close: f64, ema50: f64) -> i8 {
    if close > ema50 { 1 } else { -1 }
}

fn macd_vote(macd: f64, macd_signal: f64) -> i8 {
    if macd > macd_signal { 1 } else { -1 }
}

fn trend(close: f64, ema50: f64) -> Trend {
    if close > ema50 {
        Trend::Up
    } else if close < ema50 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

fn signal_for(score: i8) -> Signal {
    if score >= SIGNAL_THRESHOLD {
        Signal::Bullish
    } else if score <= -SIGNAL_THRESHOLD {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}
