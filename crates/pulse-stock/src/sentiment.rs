//! News-sentiment digest via one chat-completion call

use crate::config::CompletionSettings;
use crate::error::{Result, StockError};
use crate::model::SentimentSummary;
use crate::prompts;
use pulse_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Send a single user prompt and return the reply text
///
/// A reply without text is an error. Nothing is retried.
pub(crate) async fn complete_text(
    provider: &dyn LLMProvider,
    settings: &CompletionSettings,
    prompt: String,
) -> Result<String> {
    let request = CompletionRequest::builder(settings.model.as_str())
        .add_message(Message::user(prompt))
        .max_tokens(settings.max_tokens)
        .temperature(settings.temperature)
        .build();

    let response = provider.complete(request).await?;
    debug!(
        "{} answered with {} tokens ({:?})",
        settings.model,
        response.usage.total(),
        response.stop_reason
    );

    response
        .text()
        .map(str::to_string)
        .ok_or_else(|| StockError::EmptyCompletion {
            model: settings.model.clone(),
        })
}

/// Fetches a short summary of recent news sentiment for a ticker
pub struct SentimentFetcher {
    provider: Arc<dyn LLMProvider>,
    settings: CompletionSettings,
}

impl SentimentFetcher {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    #[instrument(skip(self))]
    pub async fn fetch_sentiment(&self, ticker: &str) -> Result<SentimentSummary> {
        info!("Requesting news sentiment from {}", self.settings.model);
        let prompt = prompts::sentiment_prompt(ticker)?;
        let text = complete_text(self.provider.as_ref(), &self.settings, prompt).await?;
        Ok(SentimentSummary::new(text))
    }
}
