use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime, UtcOffset, Weekday};
use tracing::{debug, warn};

use crate::data_source::{HistoryRequest, HistorySource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::{DailyBar, PriceHistory, Symbol, ValidationError};

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REFERER: &str = "https://finance.yahoo.com/";

/// Yahoo Finance daily history adapter.
///
/// Built on a real transport it calls the public chart endpoint; built on
/// [`NoopHttpClient`] it serves a deterministic synthetic series instead.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
            timeout_ms: 10_000,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_real_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        let endpoint = format!(
            "{CHART_ENDPOINT}/{}?range={}&interval=1d",
            urlencoding::encode(req.symbol.as_str()),
            req.period.as_str(),
        );
        debug!(symbol = %req.symbol, period = %req.period, "requesting yahoo chart");

        let request = HttpRequest::get(&endpoint)
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.timed_out() {
                SourceError::unavailable(format!(
                    "yahoo request timed out after {}ms: {}",
                    self.timeout_ms,
                    e.message()
                ))
            } else {
                SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
            }
        })?;

        if response.status == 429 {
            return Err(SourceError::rate_limited("yahoo returned status 429"));
        }
        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart(&req.symbol, &response.body)
    }

    fn synthetic_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        let count = req.period.approx_trading_days();
        let seed = symbol_seed(&req.symbol);
        let dates = trailing_business_days(OffsetDateTime::now_utc().date(), count);
        let base = 40.0 + (seed % 400) as f64 / 2.0;

        let bars = dates
            .into_iter()
            .enumerate()
            .map(|(index, date)| {
                let phase = (index as f64 + (seed % 17) as f64) / 9.0;
                let drift = index as f64 * 0.02;
                let close = base + drift + phase.sin() * base * 0.03;
                let open = close - (phase * 1.7).cos() * 0.4;
                let high = close.max(open) + 0.6;
                let low = (close.min(open) - 0.5).max(0.0);
                let volume = 1_000_000.0 + ((seed + index as u64) % 5_000) as f64 * 150.0;
                DailyBar::new(date, open, high, low, close, volume)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::internal(format!("invalid synthetic bar: {e}")))?;

        PriceHistory::new(req.symbol.clone(), bars)
            .map_err(|e| SourceError::internal(format!("invalid synthetic history: {e}")))
    }
}

impl HistorySource for YahooAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn daily_history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.use_real_api {
                self.fetch_real_history(&req).await
            } else {
                self.synthetic_history(&req)
            }
        })
    }
}

fn parse_chart(symbol: &Symbol, body: &str) -> Result<PriceHistory, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart_response.chart.error.filter(|e| !e.is_null()) {
        return Err(SourceError::malformed(format!("yahoo chart API error: {error}")));
    }

    let result = chart_response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::malformed("no chart data in response"))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| SourceError::malformed("no timestamp data"))?;
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|series| series.adjclose)
        .unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::malformed("no quote data"))?;

    let offset_secs = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(|secs| UtcOffset::from_whole_seconds(secs).ok())
        .unwrap_or(UtcOffset::UTC);

    let mut bars: Vec<DailyBar> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0_usize;

    for (i, &ts_value) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts_value)
            .map_err(|e| SourceError::malformed(format!("invalid timestamp: {e}")))?
            .to_offset(offset)
            .date();

        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) else {
            skipped += 1;
            continue;
        };
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);

        // Prices are dividend/split adjusted when the adjusted close is known;
        // volume stays raw.
        let ratio = match adjclose.get(i).copied().flatten() {
            Some(adjusted) if *close > 0.0 => adjusted / close,
            _ => 1.0,
        };

        let bar = match DailyBar::new(
            date,
            open * ratio,
            high * ratio,
            low * ratio,
            close * ratio,
            volume,
        ) {
            Ok(bar) => bar,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        // A live session can be reported twice for the same day; the later row wins.
        match bars.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            Some(last) if last.date > bar.date => skipped += 1,
            _ => bars.push(bar),
        }
    }

    if skipped > 0 {
        warn!(symbol = %symbol, skipped, "dropped incomplete yahoo chart rows");
    }

    PriceHistory::new(symbol.clone(), bars).map_err(validation_to_error)
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
    #[serde(default)]
    adjclose: Vec<YahooChartAdjClose>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
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

/// The `count` most recent weekdays ending on or before `end`, oldest first.
fn trailing_business_days(end: Date, count: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(count);
    let mut cursor = end;
    while dates.len() < count {
        if !matches!(cursor.weekday(), Weekday::Saturday | Weekday::Sunday) {
            dates.push(cursor);
        }
        match cursor.checked_sub(Duration::days(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    dates.reverse();
    dates
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::malformed(error.to_string())
}
