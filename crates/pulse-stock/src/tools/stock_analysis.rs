//! Tool for running the full stock analysis

use async_trait::async_trait;
use pulse_tools::{Result as ToolResult, Tool, ToolError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::analysis::StockAnalyzer;
use crate::model::Period;

/// Fetches prices, computes indicators and summarizes news sentiment
pub struct StockAnalysisTool {
    analyzer: Arc<StockAnalyzer>,
}

#[derive(Debug, Deserialize)]
struct StockAnalysisParams {
    ticker: String,
    #[serde(default)]
    period: Period,
}

impl StockAnalysisTool {
    pub fn new(analyzer: Arc<StockAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl Tool for StockAnalysisTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: StockAnalysisParams = serde_json::from_value(params)?;
        let analysis = self.analyzer.analyze(&params.ticker, params.period).await?;
        serde_json::to_value(analysis).map_err(|e| ToolError::ExecutionFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "stock_analysis"
    }

    fn description(&self) -> &str {
        "Analyze a stock: daily price history with MA20, MA50, RSI(14), MACD and \
         signal columns, company profile, and a short news-sentiment summary."
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
                }
            },
            "required": ["ticker"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PulseConfig;
    use crate::testing::{default_llm, static_analyzer};

    fn tool(points: usize) -> StockAnalysisTool {
        let analyzer = static_analyzer(points, Arc::new(default_llm()), &PulseConfig::default());
        StockAnalysisTool::new(Arc::new(analyzer))
    }

    #[tokio::test]
    async fn test_execute_defaults_period() {
        let output = tool(80).execute(json!({"ticker": "AAPL"})).await.unwrap();

        assert_eq!(output["ticker"], "AAPL");
        assert_eq!(output["period"], "6mo");
        assert_eq!(output["company"]["name"], "Apple Inc.");
        assert_eq!(output["sentiment"], "Positive: strong services growth.");

        let rows = output["series"].as_array().unwrap();
        assert_eq!(rows.len(), 80);
        assert!(rows[0]["ma20"].is_null());
        assert!(rows[79]["ma50"].is_number());
        assert!(rows[79]["macd"].is_number());
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let err = tool(80)
            .execute(json!({"ticker": "AAPL", "period": "7w"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));

        let err = tool(80).execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));

        let err = tool(80).execute(json!({"ticker": "  "})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_data_failure_is_execution_error() {
        let err = tool(0).execute(json!({"ticker": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[test]
    fn test_schema() {
        let schema = tool(1).input_schema();
        assert_eq!(schema["required"], json!(["ticker"]));
        assert_eq!(schema["properties"]["period"]["default"], "6mo");
        assert_eq!(schema["properties"]["period"]["enum"].as_array().unwrap().len(), 11);
    }
}
