//! Navigation state: which dashboard tab is active and which company is in view.
//!
//! The state is an explicit value passed top-down. The `tab`/`company` query
//! string is only an adapter at the boundary (`from_query` / `to_query`), so
//! every dashboard URL stays bookmarkable.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Base used to parse and build page URLs. Only its path reaches callers.
const PAGE_BASE: &str = "http://corpintel.local/Companies";
const PAGE_NAME: &str = "Companies";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    Overview,
    BusinessUnits,
    Leadership,
    GlobalPresence,
    Financials,
    AiInsights,
    Documents,
    News,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Overview,
        Tab::BusinessUnits,
        Tab::Leadership,
        Tab::GlobalPresence,
        Tab::Financials,
        Tab::AiInsights,
        Tab::Documents,
        Tab::News,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::BusinessUnits => "business-units",
            Tab::Leadership => "leadership",
            Tab::GlobalPresence => "global-presence",
            Tab::Financials => "financials",
            Tab::AiInsights => "ai-insights",
            Tab::Documents => "documents",
            Tab::News => "news",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "OVERVIEW",
            Tab::BusinessUnits => "BUSINESS UNITS",
            Tab::Leadership => "LEADERSHIP",
            Tab::GlobalPresence => "GLOBAL PRESENCE",
            Tab::Financials => "FINANCIALS",
            Tab::AiInsights => "AI INSIGHTS",
            Tab::Documents => "DOCUMENTS",
            Tab::News => "NEWS",
        }
    }

    /// Unknown or missing tab ids land on the overview.
    pub fn from_param(param: Option<&str>) -> Self {
        param
            .map(str::trim)
            .and_then(|p| Tab::ALL.into_iter().find(|tab| tab.as_str() == p))
            .unwrap_or_default()
    }
}

/// Raw `tab` / `company` query parameters as they arrive from the address bar.
#[derive(Debug, Clone, Default)]
pub struct NavigationQuery {
    pub tab: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub active_tab: Tab,
    /// Ticker of the company in view.
    pub selected_company: Option<String>,
}

/// One entry of the tab bar.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub tab: Tab,
    pub label: &'static str,
    pub url: String,
    pub active: bool,
}

impl From<NavigationQuery> for NavigationState {
    fn from(query: NavigationQuery) -> Self {
        Self {
            active_tab: Tab::from_param(query.tab.as_deref()),
            selected_company: query
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

impl NavigationState {
    /// Parses a raw query string such as `tab=news&company=MSFT` (leading `?` allowed).
    pub fn from_query(query: &str) -> Self {
        let Ok(mut url) = Url::parse(PAGE_BASE) else {
            return Self::default();
        };
        url.set_query(Some(query.trim_start_matches('?')));

        let mut raw = NavigationQuery::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "tab" => raw.tab = Some(value.into_owned()),
                "company" => raw.company = Some(value.into_owned()),
                _ => {}
            }
        }
        raw.into()
    }

    /// Encodes the state back into a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let Ok(mut url) = Url::parse(PAGE_BASE) else {
            return format!("tab={}", self.active_tab.as_str());
        };
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("tab", self.active_tab.as_str());
            if let Some(company) = &self.selected_company {
                pairs.append_pair("company", company);
            }
        }
        url.query().unwrap_or_default().to_string()
    }

    /// Page URL for this state, e.g. `Companies?tab=news&company=MSFT`.
    pub fn url(&self) -> String {
        format!("{PAGE_NAME}?{}", self.to_query())
    }

    /// URL for switching to `tab` while keeping the selected company.
    pub fn url_for_tab(&self, tab: Tab) -> String {
        self.with_tab(tab).url()
    }

    pub fn with_tab(&self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            selected_company: self.selected_company.clone(),
        }
    }

    pub fn links(&self) -> Vec<NavLink> {
        Tab::ALL
            .into_iter()
            .map(|tab| NavLink {
                tab,
                label: tab.label(),
                url: self.url_for_tab(tab),
                active: tab == self.active_tab,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_overview_without_company() {
        let state = NavigationState::from_query("");
        assert_eq!(state.active_tab, Tab::Overview);
        assert!(state.selected_company.is_none());
        assert_eq!(state.url(), "Companies?tab=overview");
    }

    #[test]
    fn test_parses_tab_and_company() {
        let state = NavigationState::from_query("?tab=ai-insights&company=MSFT");
        assert_eq!(state.active_tab, Tab::AiInsights);
        assert_eq!(state.selected_company.as_deref(), Some("MSFT"));
    }

    #[test]
    fn test_unknown_tab_falls_back_to_overview() {
        let state = NavigationState::from_query("tab=settings&company=MSFT");
        assert_eq!(state.active_tab, Tab::Overview);
        assert_eq!(state.selected_company.as_deref(), Some("MSFT"));
    }

    #[test]
    fn test_blank_company_is_ignored() {
        let state = NavigationState::from_query("tab=news&company=%20");
        assert!(state.selected_company.is_none());
    }

    #[test]
    fn test_query_round_trip_preserves_state() {
        let state = NavigationState {
            active_tab: Tab::GlobalPresence,
            selected_company: Some("BRK.B".to_string()),
        };
        assert_eq!(NavigationState::from_query(&state.to_query()), state);
    }

    #[test]
    fn test_company_is_percent_encoded() {
        let state = NavigationState {
            active_tab: Tab::News,
            selected_company: Some("A&B".to_string()),
        };
        assert_eq!(state.to_query(), "tab=news&company=A%26B");
        assert_eq!(
            NavigationState::from_query(&state.to_query()).selected_company.as_deref(),
            Some("A&B")
        );
    }

    #[test]
    fn test_tab_links_preserve_company() {
        let state = NavigationState::from_query("tab=financials&company=AAPL");
        let links = state.links();
        assert_eq!(links.len(), 8);
        assert_eq!(links[1].url, "Companies?tab=business-units&company=AAPL");
        assert_eq!(links.iter().filter(|l| l.active).count(), 1);
        assert!(links[4].active);
        assert_eq!(links[5].label, "AI INSIGHTS");
    }

    #[test]
    fn test_tab_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Tab::BusinessUnits).unwrap(),
            "business-units"
        );
    }
}
