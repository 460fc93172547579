//! SWOT report generation and PDF export

mod pdf;

pub use pdf::{render_to_document, sanitize_latin1};

use crate::config::CompletionSettings;
use crate::error::Result;
use crate::model::{CompanyInfo, SentimentSummary};
use crate::prompts;
use crate::sentiment::complete_text;
use pulse_llm::LLMProvider;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// A written SWOT report
#[derive(Debug, Clone, Serialize)]
pub struct SwotReport {
    /// Text as returned by the model, before sanitization
    pub text: String,
    pub path: PathBuf,
}

/// Produces SWOT analyses from company metadata and sentiment
pub struct ReportGenerator {
    provider: Arc<dyn LLMProvider>,
    settings: CompletionSettings,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    /// Ask the model for a four-section SWOT analysis
    #[instrument(skip_all, fields(company = %company.name))]
    pub async fn generate_swot(
        &self,
        company: &CompanyInfo,
        sentiment: &SentimentSummary,
    ) -> Result<String> {
        info!("Requesting SWOT analysis from {}", self.settings.model);
        let prompt = prompts::swot_prompt(company, sentiment)?;
        complete_text(self.provider.as_ref(), &self.settings, prompt).await
    }

    /// Generate the SWOT text and render it to `path`
    pub async fn write_report(
        &self,
        company: &CompanyInfo,
        sentiment: &SentimentSummary,
        path: impl AsRef<Path>,
    ) -> Result<SwotReport> {
        let text = self.generate_swot(company, sentiment).await?;
        let path = render_to_document(&text, path)?;
        Ok(SwotReport { text, path })
    }
}
