// Insight panels: one completion-backed analysis per category.
// Prompt building, schema declaration and fallback content live here; all
// completion calls go through the `CompletionService` trait in llm_client.

pub mod builder;
pub mod completion;
pub mod fallbacks;
pub mod handlers;
pub mod panel;
pub mod prompts;
pub mod runner;
pub mod schemas;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::llm_client::schema::ResponseSchema;
use crate::llm_client::InsightRequest;
use crate::models::company::Company;

/// Analysis categories, one per insight panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Strategic,
    Stock,
    Latest,
    Competitor,
    Executive,
    Investment,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 6] = [
        InsightCategory::Strategic,
        InsightCategory::Stock,
        InsightCategory::Latest,
        InsightCategory::Competitor,
        InsightCategory::Executive,
        InsightCategory::Investment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InsightCategory::Strategic => "strategic",
            InsightCategory::Stock => "stock",
            InsightCategory::Latest => "latest",
            InsightCategory::Competitor => "competitor",
            InsightCategory::Executive => "executive",
            InsightCategory::Investment => "investment",
        }
    }

    /// Sub-tab id of this panel inside the AI insights tab.
    pub fn tab_id(self) -> &'static str {
        match self {
            InsightCategory::Strategic => "strategic",
            InsightCategory::Stock => "performance",
            InsightCategory::Latest => "insights",
            InsightCategory::Competitor => "competitors",
            InsightCategory::Executive => "executives",
            InsightCategory::Investment => "investment",
        }
    }

    /// Strategic analysis works from the company record alone; every other
    /// category asks for internet-grounded context.
    pub fn uses_internet_context(self) -> bool {
        !matches!(self, InsightCategory::Strategic)
    }

    pub fn schema(self) -> Option<ResponseSchema> {
        match self {
            InsightCategory::Competitor => Some(schemas::competitor_schema()),
            InsightCategory::Executive => Some(schemas::executive_schema()),
            InsightCategory::Investment => Some(schemas::investment_schema()),
            InsightCategory::Strategic | InsightCategory::Stock | InsightCategory::Latest => None,
        }
    }

    /// Builds the completion request this panel issues for `company`.
    pub fn request_for(self, company: &Company) -> InsightRequest {
        InsightRequest::new(builder::build_prompt(self, company))
            .with_internet_context(self.uses_internet_context())
            .with_schema(self.schema())
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown insight category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for InsightCategory {
    type Err = UnknownCategory;

    /// Accepts both category names and AI-insights sub-tab ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        InsightCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle || c.tab_id() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
