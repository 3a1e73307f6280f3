pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::EmaIndicator;
pub use macd::{MacdIndicator, MacdPoint};
pub use rsi::RsiIndicator;
