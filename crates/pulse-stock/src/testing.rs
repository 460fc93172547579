//! Canned collaborators for unit tests

use crate::analysis::StockAnalyzer;
use crate::config::PulseConfig;
use crate::error::{Result as StockResult, StockError};
use crate::market::{DataSource, MarketDataProvider};
use crate::model::{CompanyInfo, MarketData, Period, PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use pulse_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Answers each model with a fixed reply and records every request
#[derive(Default)]
pub struct FakeLlm {
    replies: HashMap<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), text.to_string());
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for FakeLlm {
    async fn complete(&self, request: CompletionRequest) -> pulse_llm::Result<CompletionResponse> {
        let reply = self.replies.get(&request.model).cloned();
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        let text = reply.ok_or(LLMError::ModelNotFound(model))?;
        Ok(CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Deterministic wavy closes starting 2024-01-02
pub fn sample_points(n: usize) -> Vec<PricePoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 180.0 + 0.2 * t + 4.0 * (t / 5.0).sin();
            PricePoint {
                date: start + Duration::days(i as i64),
                open: close - 1.0,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume: Some(50_000_000 + i as u64),
            }
        })
        .collect()
}

/// Always answers with `points` sample observations and fixed metadata
pub struct StaticSource {
    pub points: usize,
}

#[async_trait]
impl DataSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, ticker: &str, _period: Period) -> StockResult<MarketData> {
        if self.points == 0 {
            return Err(StockError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: "no data".to_string(),
            });
        }
        Ok(MarketData {
            series: PriceSeries::new(ticker, sample_points(self.points)),
            company: CompanyInfo {
                name: "Apple Inc.".to_string(),
                sector: "Technology".to_string(),
                industry: "Consumer Electronics".to_string(),
                market_cap: "3400000000000".to_string(),
                summary: "Designs smartphones and computers.".to_string(),
            },
            source: "static".to_string(),
        })
    }
}

/// Analyzer over a [`StaticSource`] and the given model replies
pub fn static_analyzer(points: usize, llm: Arc<FakeLlm>, config: &PulseConfig) -> StockAnalyzer {
    let source: Arc<dyn DataSource> = Arc::new(StaticSource { points });
    let market = MarketDataProvider::new(vec![source]).unwrap();
    StockAnalyzer::new(market, llm, config)
}

/// Replies for both default models
pub fn default_llm() -> FakeLlm {
    FakeLlm::new()
        .reply("gemini-2.0-flash-001", "Positive: strong services growth.")
        .reply("gpt-4.1-nano", "Strengths:\n- Ecosystem\nThreats:\n- Regulation")
}
