use serde::{Deserialize, Serialize};

/// A company record as supplied by the company data provider.
///
/// Every field is optional: records come from hand-maintained data and any
/// subset may be missing. Prompt rendering substitutes placeholders for gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ticker_symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Billions of USD.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Billions of USD.
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub employee_count: Option<u64>,
    #[serde(default)]
    pub ceo: Option<String>,
    #[serde(default)]
    pub leadership_team: Option<Vec<LeadershipMember>>,
    #[serde(default)]
    pub business_segments: Option<Vec<BusinessSegment>>,
    #[serde(default)]
    pub geographic_presence: Option<Vec<GeographicRegion>>,
    #[serde(default)]
    pub key_metrics: Option<KeyMetrics>,
    #[serde(default)]
    pub recent_activities: Option<Vec<RecentActivity>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadershipMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessSegment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub revenue_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographicRegion {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub revenue_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// Percent.
    #[serde(default)]
    pub roe: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    /// Percent.
    #[serde(default)]
    pub profit_margin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Company {
    /// Stable identity used to decide whether a panel must re-run:
    /// ticker, then id, then name.
    pub fn identity(&self) -> Option<&str> {
        [&self.ticker_symbol, &self.id, &self.company_name]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("this company")
    }
}
