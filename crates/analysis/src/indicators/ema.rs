/// Exponential Moving Average with smoothing factor `2 / (span + 1)`.
///
/// Seeded with the first value and defined from the first bar onward. Early
/// values carry little history; treating a long-span EMA as settled only after
/// `span` bars is up to the caller.
#[derive(Debug, Clone)]
pub struct EmaIndicator {
    pub span: usize,
}

impl EmaIndicator {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self { span }
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.span as f64 + 1.0)
    }

    /// EMA of `values` (oldest first), one output per input.
    pub fn compute(&self, values: &[f64]) -> Vec<f64> {
        let alpha = self.alpha();
        let mut out = Vec::with_capacity(values.len());
        let mut iter = values.iter();

        let Some(&seed) = iter.next() else {
            return out;
        };
        let mut ema = seed;
        out.push(ema);

        for &value in iter {
            // Same as alpha * value + (1 - alpha) * ema, but leaves `ema`
            // untouched when value == ema.
            ema += alpha * (value - ema);
            out.push(ema);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_seeds_with_first_value() {
        let ema = EmaIndicator::new(3); // alpha 0.5
        let values = ema.compute(&[10.0, 11.0, 12.0]);
        assert_eq!(values, vec![10.0, 10.5, 11.25]);
    }

    #[test]
    fn ema_defined_from_first_bar() {
        let ema = EmaIndicator::new(50);
        let values = ema.compute(&[42.0]);
        assert_eq!(values, vec![42.0]);
    }

    #[test]
    fn ema_of_constant_series_is_exact() {
        let ema = EmaIndicator::new(50);
        let values = ema.compute(&[123.45; 80]);
        assert!(values.iter().all(|&v| v == 123.45));
    }

    #[test]
    fn ema_lags_a_rising_series() {
        let ema = EmaIndicator::new(5);
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let values = ema.compute(&closes);
        for (v, c) in values.iter().zip(&closes).skip(1) {
            assert!(v < c);
        }
        // Converges toward a lag of (1 - alpha) / alpha = 2 bars.
        let lag = closes[29] - values[29];
        assert!((lag - 2.0).abs() < 0.01, "lag {lag}");
    }

    #[test]
    fn ema_empty_input() {
        assert!(EmaIndicator::new(12).compute(&[]).is_empty());
    }
}
