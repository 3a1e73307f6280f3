use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use common::{Bar, Config, Error, HistoryRequest, MarketDataSource, PriceSeries, Result};

const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; signalbot/", env!("CARGO_PKG_VERSION"), ")");

/// HTTP client for the Yahoo Finance chart endpoint. Used to fetch daily (or
/// intraday) price history for a ticker.
pub struct YahooClient {
    base_url: String,
    http: Client,
}

impl YahooClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(cfg.market_data_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: cfg.market_data_url.clone(),
            http,
        })
    }

    fn chart_url(&self, request: &HistoryRequest) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("bad market data URL '{}': {e}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("market data URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", request.symbol.as_str()]);

        url.query_pairs_mut()
            .append_pair("range", &request.range)
            .append_pair("interval", &request.interval);

        Ok(url)
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn price_history(&self, request: &HistoryRequest) -> Result<PriceSeries> {
        let url = self.chart_url(request)?;
        debug!(symbol = %request.symbol, %url, "Fetching price history");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            // Unknown symbols still come back as a chart error payload.
            if let Ok(ChartEnvelope { chart: Chart { error: Some(err), .. } }) =
                serde_json::from_str::<ChartEnvelope>(&body)
            {
                return Err(err.into_error(&request.symbol));
            }
            return Err(Error::MarketData(format!("HTTP {status}: {body}")));
        }

        let series = parse_chart(&request.symbol, &body)?;
        info!(
            symbol = %request.symbol,
            bars = series.len(),
            range = %request.range,
            interval = %request.interval,
            "Fetched price history"
        );
        Ok(series)
    }
}

/// Build a `PriceSeries` from a chart response body.
///
/// Rows missing any of open/high/low/close are dropped, a missing volume
/// counts as zero, and rows sharing a timestamp keep the last one.
pub fn parse_chart(symbol: &str, body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.chart.error {
        return Err(err.into_error(symbol));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| Error::MarketData(format!("{symbol}: chart response has no result")))?;

    let Some(quote) = result.indicators.quote.into_iter().next() else {
        if result.timestamp.is_empty() {
            return PriceSeries::new(symbol, Vec::new());
        }
        return Err(Error::MarketData(format!("{symbol}: chart response has no quotes")));
    };

    let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut bars: Vec<Bar> = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let row = (
            DateTime::<Utc>::from_timestamp(ts, 0),
            field(&quote.open, i),
            field(&quote.high, i),
            field(&quote.low, i),
            field(&quote.close, i),
        );
        let (Some(timestamp), Some(open), Some(high), Some(low), Some(close)) = row else {
            skipped += 1;
            continue;
        };
        bars.push(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume: field(&quote.volume, i).unwrap_or(0.0),
        });
    }

    bars.sort_by_key(|b| b.timestamp);
    let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match deduped.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            _ => deduped.push(bar),
        }
    }

    if skipped > 0 {
        debug!(symbol, skipped, "Dropped incomplete chart rows");
    }

    PriceSeries::new(symbol, deduped)
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

impl ChartError {
    fn into_error(self, symbol: &str) -> Error {
        Error::MarketData(format!("{symbol}: {}: {}", self.code, self.description))
    }
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
