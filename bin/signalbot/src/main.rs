mod report;
mod watchlist;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, HistoryRequest};
use market::YahooClient;
use report::{render_text, run_analysis};
use watchlist::WatchlistFile;

/// Technical signal (RSI 14, EMA 50, MACD 12/26/9) for one or more tickers.
#[derive(Debug, Parser)]
#[command(name = "signalbot", version, about)]
struct Args {
    /// Ticker symbols, e.g. ^NSEI RELIANCE.NS. Defaults to the watchlist.
    symbols: Vec<String>,

    /// Lookback window passed to the market data provider (e.g. 6mo, 1y).
    #[arg(long)]
    range: Option<String>,

    /// Bar interval (e.g. 1d, 1h).
    #[arg(long)]
    interval: Option<String>,

    /// Watchlist file used when no symbols are given.
    #[arg(long)]
    watchlist: Option<String>,

    /// Print one JSON object per ticker instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let args = Args::parse();
    let cfg = Config::from_env().context("loading configuration")?;
    let range = args.range.as_deref().unwrap_or(&cfg.lookback_range);
    let interval = args.interval.as_deref().unwrap_or(&cfg.bar_interval);

    // ── Requests ──────────────────────────────────────────────────────────────
    let requests: Vec<HistoryRequest> = if args.symbols.is_empty() {
        let path = args.watchlist.as_deref().unwrap_or(&cfg.watchlist_path);
        let file = WatchlistFile::load(path)
            .with_context(|| format!("loading watchlist '{path}'"))?;
        info!(path, tickers = file.tickers.len(), "Loaded watchlist");
        file.requests(range, interval)
    } else {
        args.symbols
            .iter()
            .map(|s| HistoryRequest::new(s.trim(), range, interval))
            .collect()
    };

    if requests.is_empty() {
        bail!("no tickers to analyze");
    }

    // ── Market data ───────────────────────────────────────────────────────────
    let client = YahooClient::new(&cfg).context("building market data client")?;

    // Each ticker is its own request: a failure is reported and the rest go on.
    let mut failures = 0usize;
    for request in &requests {
        match run_analysis(&client, request).await {
            Ok(analysis) => {
                if args.json {
                    println!("{}", serde_json::to_string(&analysis)?);
                } else {
                    println!("{}\n", render_text(&analysis));
                }
            }
            Err(e) => {
                failures += 1;
                warn!(symbol = %request.symbol, error = %e, "Analysis failed");
            }
        }
    }

    if failures == requests.len() {
        bail!("all {failures} ticker(s) failed");
    }
    Ok(())
}
