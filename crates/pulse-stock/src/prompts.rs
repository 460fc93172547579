//! Prompt templates for the chat-completion calls

use crate::error::Result;
use crate::model::{CompanyInfo, SentimentSummary};
use minijinja::{Environment, context};

pub const SENTIMENT_TEMPLATE: &str =
    "Search the latest 3 news about {{ ticker }}. Summarize sentiment and cite headlines.";

pub const SWOT_TEMPLATE: &str = "\
Create a SWOT analysis of the company with this context:
- Company: {{ company.name }}
- Sector: {{ company.sector }}
- Market Cap: {{ company.market_cap }}
- Summary: {{ company.summary }}
- Real-time Sentiment: {{ sentiment }}

Format it with clear headings:
Strengths:
Weaknesses:
Opportunities:
Threats:";

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    // Plain-text prompts; no HTML escaping
    let env = Environment::new();
    Ok(env.render_str(template, ctx)?)
}

/// News-sentiment request for `ticker`
pub fn sentiment_prompt(ticker: &str) -> Result<String> {
    render(SENTIMENT_TEMPLATE, context! { ticker => ticker })
}

/// SWOT request built from company metadata and the sentiment digest
pub fn swot_prompt(company: &CompanyInfo, sentiment: &SentimentSummary) -> Result<String> {
    render(
        SWOT_TEMPLATE,
        context! { company => company, sentiment => sentiment.as_str() },
    )
}
