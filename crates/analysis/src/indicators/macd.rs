use super::EmaIndicator;

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal).
/// Every EMA involved is seeded with the first value of its own input, so the
/// output is defined from the first bar.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    fast: EmaIndicator,
    slow: EmaIndicator,
    signal: EmaIndicator,
}

/// MACD line and signal line for one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
}

impl MacdPoint {
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast < slow,
            "MACD fast period must be less than slow period"
        );
        Self {
            fast: EmaIndicator::new(fast),
            slow: EmaIndicator::new(slow),
            signal: EmaIndicator::new(signal),
        }
    }

    /// Compute MACD and signal for every close (oldest first).
    pub fn compute(&self, closes: &[f64]) -> Vec<MacdPoint> {
        let fast = self.fast.compute(closes);
        let slow = self.slow.compute(closes);

        let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_line = self.signal.compute(&macd_line);

        macd_line
            .into_iter()
            .zip(signal_line)
            .map(|(macd, signal)| MacdPoint { macd, signal })
            .collect()
    }
}
