//! Command-line interface for stockpulse
//!
//! ```bash
//! export EURI_API_KEY=...
//! stockpulse analyze AAPL --period 1y --rows 15
//! stockpulse analyze MSFT --swot --output msft_swot.pdf
//! stockpulse serve
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use pulse_mcp::{ServerInfo, StdioServer};
use pulse_stock::{Period, PulseConfig, StockAnalysis, StockAnalyzer, interpret_rsi};
use pulse_tools::ToolRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stockpulse", version)]
#[command(about = "Stock indicators, news sentiment and SWOT reports", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one ticker and print the result
    Analyze {
        /// Ticker symbol, e.g. AAPL
        ticker: String,

        /// History window (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)
        #[arg(short, long, default_value = "6mo", value_parser = parse_period)]
        period: Period,

        /// Number of most recent rows to show
        #[arg(short, long, default_value_t = 10)]
        rows: usize,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Also write a SWOT report PDF
        #[arg(long)]
        swot: bool,

        /// Where to write the SWOT report
        #[arg(short, long, requires = "swot")]
        output: Option<PathBuf>,
    },

    /// Serve the analysis tools over MCP stdio
    Serve,
}

fn parse_period(s: &str) -> Result<Period, String> {
    s.parse().map_err(|e: pulse_stock::StockError| e.to_string())
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn print_analysis(analysis: &StockAnalysis, rows: usize) {
    let company = &analysis.company;
    println!("{} ({})", company.name, analysis.ticker);
    println!("  Sector:     {}", company.sector);
    println!("  Industry:   {}", company.industry);
    println!("  Market cap: {}", company.market_cap);
    println!("  Source:     {} ({})", analysis.source, analysis.period);
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Date", "Close", "Volume", "MA20", "MA50", "RSI", "MACD", "Signal",
        ]);

    let all = analysis.series.rows();
    for row in &all[all.len().saturating_sub(rows)..] {
        table.add_row(vec![
            row.date.to_string(),
            format!("{:.2}", row.close),
            row.volume.map_or_else(|| "-".to_string(), |v| v.to_string()),
            fmt_value(row.ma20),
            fmt_value(row.ma50),
            fmt_value(row.rsi),
            fmt_value(row.macd),
            fmt_value(row.signal),
        ]);
    }
    println!("{table}");

    if let Some(rsi) = analysis.latest().and_then(|row| row.rsi) {
        println!("RSI {rsi:.1}: {}", interpret_rsi(rsi));
    }

    println!();
    println!("News sentiment:");
    println!("{}", analysis.sentiment);
}

async fn analyze(
    analyzer: &StockAnalyzer,
    ticker: &str,
    period: Period,
    rows: usize,
    json: bool,
    swot: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let analysis = analyzer
        .analyze(ticker, period)
        .await
        .with_context(|| format!("analysis of {ticker} failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, rows);
    }

    if swot {
        let report = analyzer
            .write_swot_report(&analysis, output.as_deref())
            .await
            .context("SWOT report failed")?;
        println!();
        println!("SWOT report written to {}", report.path.display());
    }

    Ok(())
}

async fn serve(analyzer: Arc<StockAnalyzer>) -> anyhow::Result<()> {
    let registry = Arc::new(ToolRegistry::new());
    pulse_stock::register_tools(&registry, analyzer);

    let server = StdioServer::new(
        ServerInfo::new("stockpulse", env!("CARGO_PKG_VERSION")),
        registry,
    );
    server.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Before tracing so RUST_LOG can come from .env
    let dotenv = pulse_utils::load_dotenv();

    if cli.json_logs {
        pulse_utils::init_json_tracing();
    } else {
        pulse_utils::init_tracing();
    }

    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = PulseConfig::from_env().context("invalid configuration")?;
    let analyzer = Arc::new(StockAnalyzer::from_config(&config)?);

    match cli.command {
        Command::Analyze {
            ticker,
            period,
            rows,
            json,
            swot,
            output,
        } => analyze(&analyzer, &ticker, period, rows, json, swot, output).await,
        Command::Serve => serve(analyzer).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["stockpulse", "analyze", "AAPL", "-p", "1y", "--swot"]).unwrap();
        match cli.command {
            Command::Analyze {
                ticker,
                period,
                rows,
                swot,
                output,
                ..
            } => {
                assert_eq!(ticker, "AAPL");
                assert_eq!(period, Period::OneYear);
                assert_eq!(rows, 10);
                assert!(swot);
                assert!(output.is_none());
            }
            Command::Serve => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["stockpulse", "analyze", "AAPL", "--period", "7w"]).is_err());
        assert!(Cli::try_parse_from(["stockpulse", "analyze", "AAPL", "-o", "x.pdf"]).is_err());
    }

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(Some(12.346)), "12.35");
        assert_eq!(fmt_value(None), "-");
    }
}
