//! End-to-end stock analysis pipeline
//!
//! Fetch history, derive indicators, ask for a sentiment digest, and
//! optionally write a SWOT report. Every step is awaited in order.

use crate::config::PulseConfig;
use crate::error::Result;
use crate::indicators::compute_indicators;
use crate::market::MarketDataProvider;
use crate::model::{CompanyInfo, Period, PriceSeries, SentimentSummary, SeriesRow};
use crate::report::{ReportGenerator, SwotReport};
use crate::sentiment::SentimentFetcher;
use pulse_llm::LLMProvider;
use pulse_llm::providers::OpenAIProvider;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of one `stock_analysis` run
#[derive(Debug, Clone, Serialize)]
pub struct StockAnalysis {
    pub ticker: String,
    pub period: Period,
    /// Data source that supplied the prices
    pub source: String,
    pub company: CompanyInfo,
    pub sentiment: SentimentSummary,
    /// Prices with indicator columns attached
    pub series: PriceSeries,
}

impl StockAnalysis {
    /// Most recent row, if any
    pub fn latest(&self) -> Option<SeriesRow> {
        self.series.rows().pop()
    }
}

/// Runs the analysis pipeline
pub struct StockAnalyzer {
    market: MarketDataProvider,
    sentiment: SentimentFetcher,
    reports: ReportGenerator,
    report_path: PathBuf,
}

impl StockAnalyzer {
    /// Assemble the pipeline from explicit parts
    pub fn new(
        market: MarketDataProvider,
        provider: Arc<dyn LLMProvider>,
        config: &PulseConfig,
    ) -> Self {
        Self {
            market,
            sentiment: SentimentFetcher::new(provider.clone(), config.sentiment.clone()),
            reports: ReportGenerator::new(provider, config.swot.clone()),
            report_path: config.report_path.clone(),
        }
    }

    /// Live data sources and the configured chat-completion gateway
    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        let market = MarketDataProvider::from_config(config)?;
        let provider = OpenAIProvider::with_config(config.llm_config()?)?;
        Ok(Self::new(market, Arc::new(provider), config))
    }

    /// Default location of SWOT reports
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Fetch prices, compute indicators and summarize news sentiment
    #[instrument(skip(self))]
    pub async fn analyze(&self, ticker: &str, period: Period) -> Result<StockAnalysis> {
        let data = self.market.fetch(ticker, period).await?;
        let ticker = data.series.symbol().to_string();

        let series = compute_indicators(data.series)?;
        let sentiment = self.sentiment.fetch_sentiment(&ticker).await?;

        info!(
            "Analyzed {} over {} ({} points from {})",
            ticker,
            period,
            series.len(),
            data.source
        );

        Ok(StockAnalysis {
            ticker,
            period,
            source: data.source,
            company: data.company,
            sentiment,
            series,
        })
    }

    /// Write a SWOT report for a finished analysis
    ///
    /// Uses the configured report path when `path` is `None`.
    pub async fn write_swot_report(
        &self,
        analysis: &StockAnalysis,
        path: Option<&Path>,
    ) -> Result<SwotReport> {
        let path = path.unwrap_or(self.report_path.as_path());
        self.reports
            .write_report(&analysis.company, &analysis.sentiment, path)
            .await
    }
}
