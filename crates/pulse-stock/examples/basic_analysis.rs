//! Basic stock analysis example
//!
//! To run this example:
//! ```bash
//! export EURI_API_KEY=your_key_here
//! export ALPHA_VANTAGE_API_KEY=your_key_here  # Optional, enables the fallback
//!
//! cargo run --example basic_analysis AAPL 1y
//! ```

use pulse_stock::{Period, PulseConfig, StockAnalyzer};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pulse_utils::load_dotenv();
    pulse_utils::init_tracing();

    let mut args = env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "AAPL".to_string());
    let period: Period = match args.next() {
        Some(p) => p.parse()?,
        None => Period::default(),
    };

    let config = PulseConfig::from_env()?;
    println!("Sentiment model: {}", config.sentiment.model);
    println!("SWOT model:      {}", config.swot.model);

    let analyzer = StockAnalyzer::from_config(&config)?;
    let analysis = analyzer.analyze(&symbol, period).await?;

    println!("\n{} ({}) via {}", analysis.company.name, analysis.ticker, analysis.source);
    if let Some(row) = analysis.latest() {
        println!(
            "{}: close {:.2}, RSI {:?}, MACD {:?}",
            row.date, row.close, row.rsi, row.macd
        );
    }
    println!("\n{}", analysis.sentiment);

    let report = analyzer.write_swot_report(&analysis, None).await?;
    println!("\nSWOT report: {}", report.path.display());
    Ok(())
}
