//! Tool for writing a SWOT report to PDF

use async_trait::async_trait;
use pulse_tools::{Result as ToolResult, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::StockAnalyzer;
use crate::model::Period;

/// Runs the analysis, then asks for a SWOT analysis and renders it to PDF
pub struct SwotReportTool {
    analyzer: Arc<StockAnalyzer>,
}

#[derive(Debug, Deserialize)]
struct SwotReportParams {
    ticker: String,
    #[serde(default)]
    period: Period,
    #[serde(default)]
    output: Option<PathBuf>,
}

impl SwotReportTool {
    pub fn new(analyzer: Arc<StockAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl Tool for SwotReportTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: SwotReportParams = serde_json::from_value(params)?;

        let analysis = self.analyzer.analyze(&params.ticker, params.period).await?;
        let report = self
            .analyzer
            .write_swot_report(&analysis, params.output.as_deref())
            .await?;

        Ok(json!({
            "ticker": analysis.ticker,
            "path": report.path,
            "swot": report.text,
        }))
    }

    fn name(&self) -> &str {
        "swot_report"
    }

    fn description(&self) -> &str {
        "Generate a SWOT analysis (strengths, weaknesses, opportunities, threats) \
         for a company from its profile and current news sentiment, and save it as a PDF."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g. AAPL)"
                },
                "period": {
                    "type": "string",
                    "description": "History window",
                    "enum": Period::ALL.map(|p| p.as_str()),
                    "default": Period::default().as_str()
                },
                "output": {
                    "type": "string",
                    "description": "Path of the PDF to write",
                    "default": self.analyzer.report_path().display().to_string()
                }
            },
            "required": ["ticker"]
        })
    }
}
