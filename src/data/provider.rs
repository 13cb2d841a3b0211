use std::error::Error;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat};
use serde::Deserialize;

use crate::config::{COINBASE, Ticker, Timescale};
use crate::domain::Candle;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Http(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            FetchError::Http(msg) => write!(f, "Request failed: {}", msg),
            FetchError::Status(code) => write!(f, "Exchange answered with HTTP status {}", code),
            FetchError::Decode(msg) => write!(f, "Could not decode exchange response: {}", msg),
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

/// Time window and bucket size of one candle request. Times are epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleRequest {
    pub start: i64,
    pub end: i64,
    pub granularity: u32,
}

impl CandleRequest {
    /// The lookback window of `timescale` ending at `now`.
    pub fn for_timescale(timescale: Timescale, now: i64) -> Self {
        Self {
            start: now - timescale.lookback().as_secs() as i64,
            end: now,
            granularity: timescale.granularity(),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let iso = |t: i64| {
            DateTime::from_timestamp(t, 0)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default()
        };
        vec![
            ("start", iso(self.start)),
            ("end", iso(self.end)),
            ("granularity", self.granularity.to_string()),
        ]
    }
}

/// Abstract interface for fetching historical candles.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_candles(
        &self,
        ticker: Ticker,
        request: CandleRequest,
    ) -> Result<Vec<Candle>, FetchError>;
}

/// Abstract interface for the live spot price.
#[async_trait]
pub trait TickerSource: Send + Sync {
    async fn fetch_price(&self, ticker: Ticker) -> Result<f64, FetchError>;
}

/// Coinbase Exchange public REST endpoints.
pub struct CoinbaseProvider {
    client: reqwest::Client,
}

impl CoinbaseProvider {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(COINBASE.user_agent)
            .timeout(Duration::from_millis(COINBASE.timeout_ms))
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, FetchError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketDataProvider for CoinbaseProvider {
    async fn fetch_candles(
        &self,
        ticker: Ticker,
        request: CandleRequest,
    ) -> Result<Vec<Candle>, FetchError> {
        let url = COINBASE.candles_url(&ticker.product_id());
        let body = self.get_text(&url, &request.query()).await?;
        let mut candles = parse_candles(&body)?;
        candles.truncate(COINBASE.max_candles);
        Ok(candles)
    }
}

#[async_trait]
impl TickerSource for CoinbaseProvider {
    async fn fetch_price(&self, ticker: Ticker) -> Result<f64, FetchError> {
        let url = COINBASE.ticker_url(&ticker.product_id());
        let body = self.get_text(&url, &[]).await?;
        parse_price(&body)
    }
}

// Coinbase sends prices as strings, but accept plain numbers too.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(f64),
}

#[derive(Deserialize)]
struct TickerResponse {
    price: PriceField,
}

/// Decodes a `{"price": ...}` ticker body.
pub fn parse_price(body: &str) -> Result<f64, FetchError> {
    let response: TickerResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let price = match response.price {
        PriceField::Number(p) => p,
        PriceField::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| FetchError::Decode(format!("price '{}': {}", s, e)))?,
    };
    if !price.is_finite() {
        return Err(FetchError::Decode(format!("price {} is not finite", price)));
    }
    Ok(price)
}

/// Decodes `[[time, low, high, open, close, volume], ...]`.
pub fn parse_candles(body: &str) -> Result<Vec<Candle>, FetchError> {
    let rows: Vec<[f64; 6]> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(rows.into_iter().map(Candle::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_string_or_number() {
        assert_eq!(parse_price(r#"{"price": "43250.17", "size": "0.1"}"#), Ok(43250.17));
        assert_eq!(parse_price(r#"{"price": 12.5}"#), Ok(12.5));
        assert!(matches!(parse_price(r#"{"price": "abc"}"#), Err(FetchError::Decode(_))));
        assert!(matches!(parse_price("not json"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn candle_rows_decode_in_wire_order() {
        let body = "[[1700000060, 9, 11, 9.5, 10.5, 3.25], [1700000000, 8, 10, 8.5, 9.5, 1]]";
        let candles = parse_candles(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_700_000_060);
        assert_eq!(candles[0].open_price, 9.5);
        assert_eq!(candles[1].volume, 1.0);

        assert!(parse_candles("[[1, 2, 3]]").is_err());
    }

    #[test]
    fn request_covers_timescale_lookback() {
        let req = CandleRequest::for_timescale(Timescale::H1, 1_000_000);
        assert_eq!(req.end - req.start, 4 * 24 * 3600);
        assert_eq!(req.granularity, 3600);

        let query = CandleRequest { start: 0, end: 60, granularity: 60 }.query();
        assert_eq!(query[0], ("start", "1970-01-01T00:00:00Z".to_string()));
        assert_eq!(query[2], ("granularity", "60".to_string()));
    }
}
