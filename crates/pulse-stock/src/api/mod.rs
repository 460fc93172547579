//! API clients for stock data providers

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::{AlphaVantageClient, CompanyOverview};
pub use yahoo::{YahooFinanceClient, YahooProfile};
