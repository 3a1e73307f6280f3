use serde::Serialize;
use tracing::{info, warn};

use analysis::TREND_WARMUP_BARS;
use common::{AnalysisReport, HistoryRequest, MarketDataSource, Result};

/// Report for one ticker plus the context needed to present it.
#[derive(Debug, Clone, Serialize)]
pub struct TickerAnalysis {
    pub symbol: String,
    pub bars: usize,
    /// Fewer than 50 bars: the EMA50 trend is not yet settled.
    pub trend_warming_up: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// Fetch price history for one ticker and run the indicator pipeline on it.
pub async fn run_analysis(
    source: &dyn MarketDataSource,
    request: &HistoryRequest,
) -> Result<TickerAnalysis> {
    let series = source.price_history(request).await?;
    let report = analysis::analyze(&series)?;

    let trend_warming_up = series.len() < TREND_WARMUP_BARS;
    if trend_warming_up {
        warn!(
            symbol = %request.symbol,
            bars = series.len(),
            required = TREND_WARMUP_BARS,
            "Short history: EMA50 trend is not settled"
        );
    }

    info!(
        symbol = %request.symbol,
        signal = %report.signal,
        trend = %report.trend,
        score = report.score,
        "Analysis complete"
    );

    Ok(TickerAnalysis {
        symbol: series.symbol().to_string(),
        bars: series.len(),
        trend_warming_up,
        report,
    })
}

/// Human-readable block, values rounded to two decimals.
pub fn render_text(a: &TickerAnalysis) -> String {
    let r = &a.report;
    let trend_note = if a.trend_warming_up { " (unsettled)" } else { "" };
    format!(
        "{symbol}\n\
         \x20 Price:  {price:.2}\n\
         \x20 RSI:    {rsi:.2}\n\
         \x20 EMA50:  {ema:.2}\n\
         \x20 MACD:   {macd:.2} / signal {sig:.2}\n\
         \x20 Trend:  {trend}{trend_note}\n\
         \x20 Signal: {signal} (score {score:+})",
        symbol = a.symbol,
        price = r.latest_price,
        rsi = r.latest_rsi,
        ema = r.latest_ema50,
        macd = r.latest_macd,
        sig = r.latest_macd_signal,
        trend = r.trend,
        signal = r.signal,
        score = r.score,
    )
}
