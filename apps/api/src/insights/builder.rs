//! Prompt Builder — renders prompt templates from a company record.
//!
//! Total over partial records: every absent field renders as `N/A`. All
//! placeholder substitution happens here so templates never carry fallbacks.

use crate::insights::prompts::{
    COMPETITOR_PROMPT_TEMPLATE, EXECUTIVE_PROMPT_TEMPLATE, INVESTMENT_PROMPT_TEMPLATE,
    LATEST_PROMPT_TEMPLATE, STOCK_PROMPT_TEMPLATE, STRATEGIC_PROMPT_TEMPLATE,
};
use crate::insights::InsightCategory;
use crate::models::company::Company;

/// Placeholder for any missing company field.
pub const MISSING: &str = "N/A";

/// Pre-rendered, placeholder-safe strings for every company field a template may use.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFacts {
    pub company_name: String,
    pub ticker_symbol: String,
    pub industry: String,
    pub market_cap: String,
    pub revenue: String,
    pub employee_count: String,
    pub ceo: String,
    pub leadership_team: String,
    pub segments_with_share: String,
    pub segment_names: String,
    pub regions_with_share: String,
    pub region_names: String,
    pub pe_ratio: String,
    pub roe: String,
    pub debt_to_equity: String,
    pub profit_margin: String,
    pub activities: String,
    pub dated_activities: String,
}

impl CompanyFacts {
    pub fn from_company(company: &Company) -> Self {
        let segments = company.business_segments.as_deref().unwrap_or_default();
        let regions = company.geographic_presence.as_deref().unwrap_or_default();
        let leaders = company.leadership_team.as_deref().unwrap_or_default();
        let activities = company.recent_activities.as_deref().unwrap_or_default();
        let metrics = company.key_metrics.clone().unwrap_or_default();

        Self {
            company_name: text(company.company_name.as_deref()),
            ticker_symbol: text(company.ticker_symbol.as_deref()),
            industry: text(company.industry.as_deref()),
            market_cap: billions(company.market_cap),
            revenue: billions(company.revenue),
            employee_count: count(company.employee_count),
            ceo: text(company.ceo.as_deref()),
            leadership_team: join(leaders.iter().map(|l| {
                format!("{} - {}", text(l.name.as_deref()), text(l.title.as_deref()))
            })),
            segments_with_share: join(
                segments
                    .iter()
                    .map(|s| with_share(s.name.as_deref(), s.revenue_percentage)),
            ),
            segment_names: join(segments.iter().map(|s| text(s.name.as_deref()))),
            regions_with_share: join(
                regions
                    .iter()
                    .map(|r| with_share(r.region.as_deref(), r.revenue_percentage)),
            ),
            region_names: join(regions.iter().map(|r| text(r.region.as_deref()))),
            pe_ratio: number(metrics.pe_ratio),
            roe: percent(metrics.roe),
            debt_to_equity: number(metrics.debt_to_equity),
            profit_margin: percent(metrics.profit_margin),
            activities: join(activities.iter().map(|a| {
                format!(
                    "{}: {}",
                    text(a.activity_type.as_deref()),
                    text(a.description.as_deref())
                )
            })),
            dated_activities: join(activities.iter().map(|a| {
                format!(
                    "{}: {} ({})",
                    text(a.activity_type.as_deref()),
                    text(a.description.as_deref()),
                    text(a.date.as_deref())
                )
            })),
        }
    }

    /// Looks up a placeholder by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "company_name" => &self.company_name,
            "ticker_symbol" => &self.ticker_symbol,
            "industry" => &self.industry,
            "market_cap" => &self.market_cap,
            "revenue" => &self.revenue,
            "employee_count" => &self.employee_count,
            "ceo" => &self.ceo,
            "leadership_team" => &self.leadership_team,
            "segments_with_share" => &self.segments_with_share,
            "segment_names" => &self.segment_names,
            "regions_with_share" => &self.regions_with_share,
            "region_names" => &self.region_names,
            "pe_ratio" => &self.pe_ratio,
            "roe" => &self.roe,
            "debt_to_equity" => &self.debt_to_equity,
            "profit_margin" => &self.profit_margin,
            "activities" => &self.activities,
            "dated_activities" => &self.dated_activities,
            _ => return None,
        };
        Some(value)
    }
}

/// Renders the prompt for one insight category.
pub fn build_prompt(category: InsightCategory, company: &Company) -> String {
    let facts = CompanyFacts::from_company(company);
    render_template(template_for(category), |key| facts.get(key))
}

fn template_for(category: InsightCategory) -> &'static str {
    match category {
        InsightCategory::Strategic => STRATEGIC_PROMPT_TEMPLATE,
        InsightCategory::Stock => STOCK_PROMPT_TEMPLATE,
        InsightCategory::Latest => LATEST_PROMPT_TEMPLATE,
        InsightCategory::Competitor => COMPETITOR_PROMPT_TEMPLATE,
        InsightCategory::Executive => EXECUTIVE_PROMPT_TEMPLATE,
        InsightCategory::Investment => INVESTMENT_PROMPT_TEMPLATE,
    }
}

/// Single-pass `{name}` substitution. Substituted values are never re-scanned,
/// so braces inside company data or user questions come through verbatim.
/// Unknown placeholders are left as written.
pub fn render_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match lookup(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

fn billions(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("${v}B"))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}%"))
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

/// Thousands-separated count, e.g. `221,000`.
fn count(value: Option<u64>) -> String {
    let Some(value) = value else {
        return MISSING.to_string();
    };
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_share(name: Option<&str>, share: Option<f64>) -> String {
    match share {
        Some(pct) => format!("{} ({pct}%)", text(name)),
        None => text(name),
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        MISSING.to_string()
    } else {
        joined
    }
}
