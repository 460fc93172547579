//! Stock analysis tools exposed to tool-calling hosts

pub mod stock_analysis;
pub mod swot_report;

pub use stock_analysis::StockAnalysisTool;
pub use swot_report::SwotReportTool;

use crate::analysis::StockAnalyzer;
use pulse_tools::ToolRegistry;
use std::sync::Arc;

/// Register every stock tool backed by `analyzer`
pub fn register_tools(registry: &ToolRegistry, analyzer: Arc<StockAnalyzer>) {
    registry.register(Arc::new(StockAnalysisTool::new(analyzer.clone())));
    registry.register(Arc::new(SwotReportTool::new(analyzer)));
}
