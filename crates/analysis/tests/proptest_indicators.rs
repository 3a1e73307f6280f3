use analysis::{analyze, compute_indicators};
use chrono::{Duration, TimeZone, Utc};
use common::{Bar, PriceSeries, Signal, Trend};
use proptest::prelude::*;

fn series(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: start + Duration::hours(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        })
        .collect();
    PriceSeries::new("PROP", bars).unwrap()
}

proptest! {
    /// Indicator derivation on arbitrary positive prices must never panic and
    /// must keep RSI inside its bounds.
    #[test]
    fn rsi_stays_bounded(closes in prop::collection::vec(0.01f64..100_000.0f64, 14..200)) {
        let readings = compute_indicators(&series(&closes)).unwrap();
        prop_assert_eq!(readings.len(), closes.len());
        for r in readings.iter().skip(13) {
            let rsi = r.rsi14.unwrap();
            prop_assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
        }
    }

    #[test]
    fn recomputation_is_identical(closes in prop::collection::vec(0.01f64..10_000.0f64, 1..120)) {
        let s = series(&closes);
        match (compute_indicators(&s), compute_indicators(&s)) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => prop_assert!(closes.len() < 14),
            _ => prop_assert!(false, "inconsistent outcome"),
        }
    }

    /// The report is always consistent with its own fields.
    #[test]
    fn report_is_self_consistent(closes in prop::collection::vec(1.0f64..1_000.0f64, 14..150)) {
        let report = analyze(&series(&closes)).unwrap();
        prop_assert!((-3..=3).contains(&report.score));
        prop_assert_eq!(report.latest_price, *closes.last().unwrap());

        let expected_trend = if report.latest_price > report.latest_ema50 {
            Trend::Up
        } else if report.latest_price < report.latest_ema50 {
            Trend::Down
        } else {
            Trend::Neutral
        };
        prop_assert_eq!(report.trend, expected_trend);

        let expected_signal = match report.score {
            s if s >= 2 => Signal::Bullish,
            s if s <= -2 => Signal::Bearish,
            _ => Signal::Neutral,
        };
        prop_assert_eq!(report.signal, expected_signal);
    }
}
