//! Stock analysis pipeline
//!
//! This crate turns a ticker symbol into an analysis:
//!
//! - Daily price history from Yahoo Finance, with Alpha Vantage as fallback
//! - Technical indicators: MA20, MA50, RSI(14), MACD and its signal line
//! - A short news-sentiment digest from a hosted chat-completion model
//! - An optional SWOT analysis exported to PDF
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse_stock::{Period, PulseConfig, StockAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     pulse_utils::load_dotenv();
//!     let config = PulseConfig::from_env()?;
//!     let analyzer = StockAnalyzer::from_config(&config)?;
//!
//!     let analysis = analyzer.analyze("AAPL", Period::SixMonths).await?;
//!     println!("{}", analysis.sentiment);
//!
//!     let report = analyzer.write_swot_report(&analysis, None).await?;
//!     println!("SWOT written to {}", report.path.display());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod market;
pub mod model;
pub mod prompts;
pub mod report;
pub mod sentiment;
pub mod tools;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use analysis::{StockAnalysis, StockAnalyzer};
pub use config::{CompletionSettings, PulseConfig};
pub use error::{Result, StockError};
pub use indicators::{compute_indicators, interpret_rsi};
pub use market::{DataSource, MarketDataProvider};
pub use model::{
    CompanyInfo, IndicatorSet, MarketData, NOT_AVAILABLE, Period, PricePoint, PriceSeries,
    SentimentSummary, SeriesRow,
};
pub use report::{ReportGenerator, SwotReport, render_to_document, sanitize_latin1};
pub use sentiment::SentimentFetcher;
pub use tools::{StockAnalysisTool, SwotReportTool, register_tools};
