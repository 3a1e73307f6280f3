use tracing::debug;

use common::{Error, IndicatorReading, PriceSeries, Result};

use crate::indicators::{EmaIndicator, MacdIndicator, RsiIndicator};

pub const RSI_PERIOD: usize = 14;
pub const TREND_EMA_SPAN: usize = 50;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Bars after which the 50-period EMA is considered settled. Not enforced by
/// the engine: shorter series still get an `ema50` value.
pub const TREND_WARMUP_BARS: usize = TREND_EMA_SPAN;

/// Derives RSI(14), EMA(50) and MACD(12, 26, 9) from a price series.
///
/// Holds only the fixed indicator definitions, so one engine can be shared
/// freely across threads and requests.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    rsi: RsiIndicator,
    trend_ema: EmaIndicator,
    macd: MacdIndicator,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            rsi: RsiIndicator::new(RSI_PERIOD),
            trend_ema: EmaIndicator::new(TREND_EMA_SPAN),
            macd: MacdIndicator::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        }
    }
}

impl IndicatorEngine {
    /// Smallest series that yields a complete reading.
    pub fn min_bars(&self) -> usize {
        self.rsi.period
    }

    /// One reading per bar of `series`, in bar order.
    ///
    /// Fails with `InsufficientData` when the series is empty or shorter than
    /// the RSI window, since no bar could then carry a complete reading.
    pub fn compute(&self, series: &PriceSeries) -> Result<Vec<IndicatorReading>> {
        let required = self.min_bars();
        if series.len() < required {
            return Err(Error::InsufficientData {
                bars: series.len(),
                required,
            });
        }

        let closes = series.closes();
        let rsi = self.rsi.compute(&closes);
        let ema = self.trend_ema.compute(&closes);
        let macd = self.macd.compute(&closes);

        let readings: Vec<IndicatorReading> = rsi
            .into_iter()
            .zip(ema)
            .zip(macd)
            .map(|((rsi14, ema50), point)| IndicatorReading {
                rsi14,
                ema50: Some(ema50),
                macd: Some(point.macd),
                macd_signal: Some(point.signal),
            })
            .collect();

        debug!(
            symbol = %series.symbol(),
            bars = readings.len(),
            "Computed indicators"
        );
        Ok(readings)
    }
}

/// Index and value of the most recent complete reading.
pub fn latest_complete(readings: &[IndicatorReading]) -> Option<(usize, &IndicatorReading)> {
    readings
        .iter()
        .enumerate()
        .rev()
        .find(|(_, r)| r.is_complete())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use common::Bar;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn empty_series_is_insufficient() {
        let err = IndicatorEngine::default().compute(&series(&[])).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { bars: 0, required: 14 }));
    }

    #[test]
    fn single_bar_is_insufficient() {
        let err = IndicatorEngine::default()
            .compute(&series(&[100.0]))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData { bars: 1, .. }));
    }

    #[test]
    fn thirteen_bars_is_insufficient() {
        let closes: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
        assert!(IndicatorEngine::default().compute(&series(&closes)).is_err());
    }

    #[test]
    fn readings_align_with_bars() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 7) as f64).collect();
        let readings = IndicatorEngine::default().compute(&series(&closes)).unwrap();
        assert_eq!(readings.len(), closes.len());
        // EMA and MACD have no warm-up gate.
        assert!(readings.iter().all(|r| r.ema50.is_some() && r.macd.is_some()));
        assert!(readings[..13].iter().all(|r| r.rsi14.is_none()));
        assert!(readings[13..].iter().all(IndicatorReading::is_complete));
    }

    #[test]
    fn latest_complete_skips_warming_tail() {
        let complete = IndicatorReading {
            rsi14: Some(40.0),
            ema50: Some(1.0),
            macd: Some(0.1),
            macd_signal: Some(0.0),
        };
        let readings = vec![IndicatorReading::default(), complete, IndicatorReading::default()];
        let (index, reading) = latest_complete(&readings).unwrap();
        assert_eq!(index, 1);
        assert_eq!(*reading, complete);
        assert!(latest_complete(&[IndicatorReading::default()]).is_none());
    }
}
