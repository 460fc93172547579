//! Market data retrieval with ordered fallback
//!
//! A [`MarketDataProvider`] asks each [`DataSource`] in turn and returns the
//! first answer. Failures are logged and the next source is tried; when every
//! source fails the last error is returned as-is.

mod sources;

pub use sources::{ALPHA_VANTAGE_SOURCE, AlphaVantageSource, YAHOO_SOURCE, YahooSource};

use crate::api::{AlphaVantageClient, YahooFinanceClient};
use crate::config::PulseConfig;
use crate::error::{Result, StockError};
use crate::model::{MarketData, Period};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A place price history and company metadata can be fetched from
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short identifier used in logs and results
    fn name(&self) -> &str;

    /// Fetch daily history for `ticker` over `period`
    async fn fetch(&self, ticker: &str, period: Period) -> Result<MarketData>;
}

/// Ordered list of data sources
pub struct MarketDataProvider {
    sources: Vec<Arc<dyn DataSource>>,
}

impl MarketDataProvider {
    /// Create a provider trying `sources` in the given order
    pub fn new(sources: Vec<Arc<dyn DataSource>>) -> Result<Self> {
        if sources.is_empty() {
            return Err(StockError::ConfigError(
                "at least one data source is required".to_string(),
            ));
        }
        Ok(Self { sources })
    }

    /// Yahoo Finance first, Alpha Vantage as the fallback
    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        let alpha_vantage = config
            .alpha_vantage_api_key
            .as_deref()
            .map(|key| {
                AlphaVantageClient::new(key, config.alpha_vantage_rate_limit)
                    .with_timeout(config.request_timeout)
            })
            .transpose()?;

        let yahoo: Arc<dyn DataSource> = Arc::new(
            YahooSource::new(YahooFinanceClient::new(config.request_timeout)?)
                .with_overview(alpha_vantage.clone()),
        );
        let fallback: Arc<dyn DataSource> = Arc::new(AlphaVantageSource::new(
            alpha_vantage,
            config.fallback_limit,
        ));

        Self::new(vec![yahoo, fallback])
    }

    /// Source names in the order they are tried
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Fetch market data from the first source that answers
    #[instrument(skip(self))]
    pub async fn fetch(&self, ticker: &str, period: Period) -> Result<MarketData> {
        let ticker = normalize_ticker(ticker)?;
        let mut last_error = None;

        for source in &self.sources {
            let result = source.fetch(&ticker, period).await.and_then(|data| {
                if data.series.is_empty() {
                    Err(StockError::DataUnavailable {
                        symbol: ticker.clone(),
                        reason: format!("{} returned no prices", source.name()),
                    })
                } else {
                    Ok(data)
                }
            });

            match result {
                Ok(data) => {
                    info!(
                        "Fetched {} points for {} from {}",
                        data.series.len(),
                        ticker,
                        source.name()
                    );
                    return Ok(data);
                }
                Err(e) => {
                    warn!("Source {} failed for {}: {}", source.name(), ticker, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            StockError::ConfigError("no data sources configured".to_string())
        }))
    }
}

/// Trim and upper-case a ticker, rejecting empty or malformed input
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    let valid = !ticker.is_empty()
        && ticker.len() <= 15
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if !valid {
        return Err(StockError::InvalidSymbol(ticker.to_string()));
    }
    Ok(ticker.to_ascii_uppercase())
}
