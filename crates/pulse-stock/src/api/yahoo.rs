//! Yahoo Finance API client

use crate::error::{Result, StockError};
use crate::model::{NOT_AVAILABLE, Period, PricePoint};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
// The search endpoint rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stockpulse";
const DAILY_INTERVAL: &str = "1d";

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    connector: yahoo::YahooConnector,
    client: Client,
    search_url: String,
}

/// Company description from the Yahoo symbol search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooProfile {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: String,
    #[serde(default)]
    longname: Option<String>,
    #[serde(default)]
    shortname: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            connector,
            client,
            search_url: SEARCH_URL.to_string(),
        })
    }

    /// Point the profile lookup at another search endpoint
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Get daily quotes for a named period ending now
    ///
    /// The period string is passed to Yahoo as a range, so `1d` and `5d` mean
    /// trading days. Prices are split/dividend adjusted: open, high and low
    /// are scaled by the same factor that maps the raw close onto the
    /// adjusted close.
    #[instrument(skip(self))]
    pub async fn get_historical_range(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<PricePoint>> {
        let response = self
            .connector
            .get_quote_range(symbol, DAILY_INTERVAL, period.as_str())
            .await
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        debug!("Yahoo returned {} quotes", quotes.len());

        Ok(quotes
            .iter()
            .filter_map(|q| {
                let date = DateTime::from_timestamp(q.timestamp, 0)?.date_naive();
                Some(adjusted_point(
                    date, q.open, q.high, q.low, q.close, q.adjclose, q.volume,
                ))
            })
            .collect())
    }

    /// Look up the company name, sector and industry
    #[instrument(skip(self))]
    pub async fn get_profile(&self, symbol: &str) -> Result<YahooProfile> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", symbol), ("quotesCount", "5"), ("newsCount", "0")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StockError::YahooFinanceError(format!(
                "search HTTP error: {}",
                response.status()
            )));
        }

        let search: SearchResponse = response.json().await?;
        profile_from_search(symbol, search)
    }
}

fn adjusted_point(
    date: chrono::NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adjclose: f64,
    volume: u64,
) -> PricePoint {
    let factor = if close != 0.0 && adjclose.is_finite() && adjclose > 0.0 {
        adjclose / close
    } else {
        1.0
    };
    let adjusted_close = if factor == 1.0 { close } else { adjclose };

    PricePoint {
        date,
        open: open * factor,
        high: high * factor,
        low: low * factor,
        close: adjusted_close,
        volume: Some(volume),
    }
}

fn profile_from_search(symbol: &str, search: SearchResponse) -> Result<YahooProfile> {
    let quote = search
        .quotes
        .into_iter()
        .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "symbol not found in Yahoo search".to_string(),
        })?;

    let or_sentinel = |value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    Ok(YahooProfile {
        name: quote
            .longname
            .or(quote.shortname)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| quote.symbol.clone()),
        sector: or_sentinel(quote.sector),
        industry: or_sentinel(quote.industry),
        symbol: quote.symbol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adjusted_point_scales_ohlc() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let p = adjusted_point(date, 100.0, 110.0, 90.0, 100.0, 50.0, 7);
        assert!((p.close - 50.0).abs() < 1e-12);
        assert!((p.open - 50.0).abs() < 1e-12);
        assert!((p.high - 55.0).abs() < 1e-12);
        assert!((p.low - 45.0).abs() < 1e-12);
        assert_eq!(p.volume, Some(7));

        let raw = adjusted_point(date, 1.0, 2.0, 0.5, 1.5, f64::NAN, 0);
        assert!((raw.close - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_profile_from_search() {
        let search: SearchResponse = serde_json::from_value(json!({
            "quotes": [
                {"symbol": "AAPL.MX", "shortname": "Apple MX"},
                {"symbol": "AAPL", "longname": "Apple Inc.", "shortname": "Apple",
                 "sector": "Technology", "industry": "Consumer Electronics"}
            ]
        }))
        .unwrap();

        let profile = profile_from_search("aapl", search).unwrap();
        assert_eq!(profile.name, "Apple Inc.");
        assert_eq!(profile.sector, "Technology");
        assert_eq!(profile.industry, "Consumer Electronics");
    }

    #[test]
    fn test_profile_defaults_missing_fields() {
        let search: SearchResponse =
            serde_json::from_value(json!({"quotes": [{"symbol": "SPY", "shortname": "SPDR"}]}))
                .unwrap();
        let profile = profile_from_search("SPY", search).unwrap();
        assert_eq!(profile.name, "SPDR");
        assert_eq!(profile.sector, NOT_AVAILABLE);

        let empty: SearchResponse = serde_json::from_value(json!({"quotes": []})).unwrap();
        assert!(matches!(
            profile_from_search("ZZZZ", empty),
            Err(StockError::DataUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_profile_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "MSFT".into()))
            .with_status(200)
            .with_body(
                json!({"quotes": [{"symbol": "MSFT", "longname": "Microsoft Corporation",
                                   "sector": "Technology", "industry": "Software"}]})
                .to_string(),
            )
            .create_async()
            .await;

        let client = YahooFinanceClient::new(Duration::from_secs(5))
            .unwrap()
            .with_search_url(format!("{}/search", server.url()));
        let profile = client.get_profile("MSFT").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.name, "Microsoft Corporation");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_historical_range() {
        let client = YahooFinanceClient::new(Duration::from_secs(30)).unwrap();
        let quotes = client
            .get_historical_range("AAPL", Period::OneMonth)
            .await
            .unwrap();
        assert!(!quotes.is_empty());
    }
}
