//! Alpha Vantage API client

use crate::error::{Result, StockError};
use crate::model::PricePoint;
use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

/// Company overview data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: String,
    pub description: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client with API key and rate limit
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (5 on the free tier)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Use a client with a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Send queries to another endpoint
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get split/dividend-adjusted daily bars, oldest first
    ///
    /// Uses the compact output size, so at most the last 100 trading days are
    /// returned. The adjusted close is reported as the close.
    #[instrument(skip(self))]
    pub async fn get_daily_adjusted(&self, symbol: &str) -> Result<Vec<PricePoint>> {
        let data = self
            .query(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", symbol),
                ("outputsize", "compact"),
            ])
            .await?;

        let series = data
            .get("Time Series (Daily)")
            .and_then(Value::as_object)
            .ok_or_else(|| StockError::AlphaVantageError("No daily data found".to_string()))?;

        let mut points: Vec<PricePoint> = series
            .iter()
            .filter_map(|(date, values)| parse_daily_bar(date, values))
            .collect();
        points.sort_by_key(|p| p.date);

        debug!("Alpha Vantage returned {} daily bars", points.len());
        Ok(points)
    }

    /// Get company overview and fundamental data
    #[instrument(skip(self))]
    pub async fn get_company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let data = self
            .query(&[("function", "OVERVIEW"), ("symbol", symbol)])
            .await?;

        // An unknown symbol yields an empty object
        if data.as_object().is_none_or(serde_json::Map::is_empty) {
            return Err(StockError::InvalidSymbol(symbol.to_string()));
        }

        Ok(serde_json::from_value(data)?)
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StockError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        check_api_errors(data)
    }
}

/// Map the in-band error payloads to errors
fn check_api_errors(data: Value) -> Result<Value> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::AlphaVantageError(
            error.as_str().unwrap_or_default().to_string(),
        ));
    }

    // "Note" is the classic throttle notice; "Information" covers daily caps
    // and premium-only endpoints
    if data.get("Note").is_some() || data.get("Information").is_some() {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    Ok(data)
}

fn parse_daily_bar(date: &str, values: &Value) -> Option<PricePoint> {
    let field = |key: &str| values.get(key)?.as_str()?.trim().parse::<f64>().ok();

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let Some(close) = field("5. adjusted close").or_else(|| field("4. close")) else {
        debug!("Skipping bar without a close on {}", date);
        return None;
    };

    let volume = values
        .get("6. volume")
        .or_else(|| values.get("5. volume"))
        .and_then(Value::as_str)
        .and_then(|v| v.trim().parse::<u64>().ok());

    Some(PricePoint {
        date,
        open: field("1. open").unwrap_or(close),
        high: field("2. high").unwrap_or(close),
        low: field("3. low").unwrap_or(close),
        close,
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn bar(close: &str, adjusted: &str, volume: &str) -> Value {
        json!({
            "1. open": "10.0",
            "2. high": "12.0",
            "3. low": "9.0",
            "4. close": close,
            "5. adjusted close": adjusted,
            "6. volume": volume,
            "7. dividend amount": "0.0000",
            "8. split coefficient": "1.0"
        })
    }

    fn client_for(server: &mockito::ServerGuard) -> AlphaVantageClient {
        AlphaVantageClient::new("test_key", 600).with_base_url(format!("{}/query", server.url()))
    }

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5);
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.base_url, BASE_URL);
    }

    #[test]
    fn test_parse_daily_bar_prefers_adjusted_close() {
        let point = parse_daily_bar("2024-06-03", &bar("11.0", "10.5", "1200")).unwrap();
        assert_eq!(point.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert!((point.close - 10.5).abs() < f64::EPSILON);
        assert!((point.high - 12.0).abs() < f64::EPSILON);
        assert_eq!(point.volume, Some(1200));

        assert!(parse_daily_bar("not-a-date", &bar("1", "1", "1")).is_none());
        assert!(parse_daily_bar("2024-06-03", &json!({"1. open": "1"})).is_none());
    }

    #[test]
    fn test_check_api_errors() {
        assert!(matches!(
            check_api_errors(json!({"Error Message": "Invalid API call"})),
            Err(StockError::AlphaVantageError(msg)) if msg == "Invalid API call"
        ));
        assert!(matches!(
            check_api_errors(json!({"Note": "Thank you for using Alpha Vantage!"})),
            Err(StockError::RateLimitExceeded { .. })
        ));
        assert!(matches!(
            check_api_errors(json!({"Information": "premium endpoint"})),
            Err(StockError::RateLimitExceeded { .. })
        ));
        assert!(check_api_errors(json!({"Meta Data": {}})).is_ok());
    }

    #[tokio::test]
    async fn test_get_daily_adjusted_sorted() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2024-06-05": bar("12.0", "12.0", "300"),
                "2024-06-03": bar("10.0", "10.0", "100"),
                "2024-06-04": bar("11.0", "11.0", "200")
            }
        });
        let mock = server
            .mock("GET", "/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("function".into(), "TIME_SERIES_DAILY_ADJUSTED".into()),
                Matcher::UrlEncoded("symbol".into(), "IBM".into()),
                Matcher::UrlEncoded("outputsize".into(), "compact".into()),
                Matcher::UrlEncoded("apikey".into(), "test_key".into()),
            ]))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let points = client.get_daily_adjusted("IBM").await.unwrap();

        mock.assert_async().await;
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![10.0, 11.0, 12.0]);
    }

    #[tokio::test]
    async fn test_get_daily_adjusted_missing_series() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"Meta Data": {}}).to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_daily_adjusted("IBM").await.unwrap_err();
        assert!(matches!(err, StockError::AlphaVantageError(_)));
    }

    #[tokio::test]
    async fn test_get_company_overview() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::UrlEncoded("function".into(), "OVERVIEW".into()))
            .with_status(200)
            .with_body(
                json!({
                    "Symbol": "IBM",
                    "Name": "International Business Machines",
                    "Description": "IBM is an American multinational technology company.",
                    "Sector": "TECHNOLOGY",
                    "Industry": "COMPUTER & OFFICE EQUIPMENT",
                    "MarketCapitalization": "157000000000"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let overview = client.get_company_overview("IBM").await.unwrap();
        assert_eq!(overview.name, "International Business Machines");
        assert_eq!(overview.market_cap.as_deref(), Some("157000000000"));
        assert!(overview.exchange.is_none());
    }

    #[tokio::test]
    async fn test_get_company_overview_unknown_symbol() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get_company_overview("ZZZZ").await.unwrap_err();
        assert!(matches!(err, StockError::InvalidSymbol(_)));
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_live_daily_adjusted() {
        let key = std::env::var("ALPHA_VANTAGE_KEY").unwrap();
        let client = AlphaVantageClient::new(key, 5);
        let data = client.get_daily_adjusted("AAPL").await.unwrap();
        assert!(!data.is_empty());
    }
}
