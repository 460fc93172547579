use super::DataSource;
use crate::api::{AlphaVantageClient, YahooFinanceClient};
use crate::error::{Result, StockError};
use crate::model::{CompanyInfo, MarketData, NOT_AVAILABLE, Period, PriceSeries};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

pub const YAHOO_SOURCE: &str = "yahoo";
pub const ALPHA_VANTAGE_SOURCE: &str = "alpha_vantage";

/// Yahoo Finance history plus search metadata
pub struct YahooSource {
    client: YahooFinanceClient,
    overview: Option<AlphaVantageClient>,
}

impl YahooSource {
    pub fn new(client: YahooFinanceClient) -> Self {
        Self {
            client,
            overview: None,
        }
    }

    /// Fill market cap and summary from Alpha Vantage when a client is given
    pub fn with_overview(mut self, client: Option<AlphaVantageClient>) -> Self {
        self.overview = client;
        self
    }

    /// Company metadata; a failed profile lookup fails the whole source
    async fn company_info(&self, ticker: &str) -> Result<CompanyInfo> {
        let profile = self.client.get_profile(ticker).await?;
        let mut info = CompanyInfo {
            name: profile.name,
            sector: profile.sector,
            industry: profile.industry,
            market_cap: NOT_AVAILABLE.to_string(),
            summary: NOT_AVAILABLE.to_string(),
        };

        if let Some(client) = &self.overview {
            match client.get_company_overview(ticker).await {
                Ok(overview) => {
                    let present = |v: Option<String>| {
                        v.filter(|s| !s.trim().is_empty() && s != "None")
                    };
                    if let Some(cap) = present(overview.market_cap) {
                        info.market_cap = cap;
                    }
                    if let Some(summary) = present(overview.description) {
                        info.summary = summary;
                    }
                }
                Err(e) => warn!("Company overview unavailable for {}: {}", ticker, e),
            }
        }

        Ok(info)
    }
}

#[async_trait]
impl DataSource for YahooSource {
    fn name(&self) -> &str {
        YAHOO_SOURCE
    }

    #[instrument(skip(self))]
    async fn fetch(&self, ticker: &str, period: Period) -> Result<MarketData> {
        let points = self.client.get_historical_range(ticker, period).await?;
        if points.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: format!("Yahoo returned no quotes for period {period}"),
            });
        }

        let series = PriceSeries::new(ticker, points);
        let company = self.company_info(ticker).await?;

        Ok(MarketData {
            series,
            company,
            source: YAHOO_SOURCE.to_string(),
        })
    }
}

/// Alpha Vantage adjusted daily series, without metadata
///
/// The period is ignored: the compact series is fetched and cut to the most
/// recent `limit` observations.
pub struct AlphaVantageSource {
    client: Option<AlphaVantageClient>,
    limit: usize,
}

impl AlphaVantageSource {
    /// A source without a client fails every fetch with a configuration error
    pub fn new(client: Option<AlphaVantageClient>, limit: usize) -> Self {
        Self { client, limit }
    }
}

#[async_trait]
impl DataSource for AlphaVantageSource {
    fn name(&self) -> &str {
        ALPHA_VANTAGE_SOURCE
    }

    #[instrument(skip(self))]
    async fn fetch(&self, ticker: &str, period: Period) -> Result<MarketData> {
        let client = self.client.as_ref().ok_or_else(|| {
            StockError::ConfigError(
                "Alpha Vantage API key not set (ALPHA_VANTAGE_KEY)".to_string(),
            )
        })?;

        let points = client.get_daily_adjusted(ticker).await?;
        let series = PriceSeries::new(ticker, points).tail(self.limit);
        if series.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: "Alpha Vantage returned an empty series".to_string(),
            });
        }
        debug!("Kept {} of the fallback observations", series.len());

        Ok(MarketData {
            series,
            company: CompanyInfo::placeholder(ticker),
            source: ALPHA_VANTAGE_SOURCE.to_string(),
        })
    }
}
