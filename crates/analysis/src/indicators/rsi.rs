/// RSI (Relative Strength Index) indicator.
///
/// Averages gains and losses with a simple moving average over the trailing
/// `period` bars. The first bar has no predecessor and contributes zero gain
/// and zero loss, so the first value appears at index `period - 1`.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// Compute RSI for every close (oldest first).
    /// Entries before index `period - 1` are `None`.
    pub fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut gains = Vec::with_capacity(closes.len());
        let mut losses = Vec::with_capacity(closes.len());
        for i in 0..closes.len() {
            let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let period = self.period as f64;
        (0..closes.len())
            .map(|i| {
                if i + 1 < self.period {
                    return None;
                }
                // Summed per window rather than rolled, so a window with no
                // losses averages to exactly zero.
                let start = i + 1 - self.period;
                let avg_gain = gains[start..=i].iter().sum::<f64>() / period;
                let avg_loss = losses[start..=i].iter().sum::<f64>() / period;
                Some(rsi_from_averages(avg_gain, avg_loss))
            })
            .collect()
    }
}

/// Zero average loss maps to 100, including the flat case where the average
/// gain is zero too.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_is_none_before_window_fills() {
        let rsi = RsiIndicator::new(14);
        let prices: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
        assert!(rsi.compute(&prices).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_first_value_at_last_index_of_first_window() {
        let rsi = RsiIndicator::new(14);
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        let values = rsi.compute(&prices);
        assert_eq!(values.len(), 14);
        assert!(values[..13].iter().all(Option::is_none));
        assert!(values[13].is_some());
    }

    #[test]
    fn rsi_all_gains_returns_100() {
        let rsi = RsiIndicator::new(3);
        let prices = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let values = rsi.compute(&prices);
        for v in values.into_iter().flatten() {
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn rsi_all_losses_returns_0() {
        let rsi = RsiIndicator::new(3);
        let prices = vec![14.0, 13.0, 12.0, 11.0, 10.0];
        let value = rsi.compute(&prices)[4].unwrap();
        assert!(value.abs() < 1e-12, "Expected ~0, got {value}");
    }

    #[test]
    fn rsi_flat_prices_return_100() {
        let rsi = RsiIndicator::new(14);
        let values = rsi.compute(&[100.0; 20]);
        assert_eq!(values[13], Some(100.0));
        assert_eq!(values[19], Some(100.0));
    }

    #[test]
    fn rsi_known_value() {
        // gains [0, 1, 0, 2], losses [0, 0, 1, 0]
        let rsi = RsiIndicator::new(3);
        let values = rsi.compute(&[10.0, 11.0, 10.0, 12.0]);
        // index 2: avg gain 1/3, avg loss 1/3 -> RS 1
        assert!((values[2].unwrap() - 50.0).abs() < 1e-9);
        // index 3: avg gain 3/3, avg loss 1/3 -> RS 3
        assert!((values[3].unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_loss_leaving_window_restores_100() {
        let rsi = RsiIndicator::new(3);
        // Single drop at index 1, then only gains.
        let values = rsi.compute(&[10.0, 9.0, 10.0, 11.0, 12.0, 13.0]);
        assert!(values[3].unwrap() < 100.0);
        assert_eq!(values[4], Some(100.0));
    }

    #[test]
    fn rsi_empty_input() {
        assert!(RsiIndicator::new(14).compute(&[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "RSI period must be >= 2")]
    fn rsi_rejects_degenerate_period() {
        RsiIndicator::new(1);
    }
}
