//! Company Data Provider — where company records come from.
//!
//! `AppState` holds an `Arc<dyn CompanyProvider>`. The default backend reads a
//! JSON file of company records once at startup.

pub mod handlers;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::models::company::Company;

#[async_trait]
pub trait CompanyProvider: Send + Sync {
    /// All known companies, in display order.
    async fn list(&self) -> Result<Vec<Arc<Company>>, AppError>;
}

/// Looks a company up by ticker (case-insensitive).
pub async fn find_by_ticker(
    provider: &dyn CompanyProvider,
    ticker: &str,
) -> Result<Option<Arc<Company>>, AppError> {
    let ticker = ticker.trim();
    Ok(provider.list().await?.into_iter().find(|company| {
        company
            .ticker_symbol
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(ticker))
    }))
}

/// Resolves the company in view: the requested ticker when it matches a known
/// company, otherwise the first company. `None` only when there are no companies.
pub async fn resolve_company(
    provider: &dyn CompanyProvider,
    ticker: Option<&str>,
) -> Result<Option<Arc<Company>>, AppError> {
    if let Some(ticker) = ticker {
        if let Some(company) = find_by_ticker(provider, ticker).await? {
            return Ok(Some(company));
        }
    }
    Ok(provider.list().await?.into_iter().next())
}

/// In-memory provider loaded from a JSON array of company records.
pub struct JsonCompanyProvider {
    companies: Vec<Arc<Company>>,
}

impl JsonCompanyProvider {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read company data from {}", path.display()))?;
        let companies: Vec<Company> = serde_json::from_str(&raw)
            .with_context(|| format!("Company data in {} is not valid JSON", path.display()))?;

        info!("Loaded {} companies from {}", companies.len(), path.display());
        Ok(Self::from_companies(companies))
    }

    pub fn from_companies(companies: Vec<Company>) -> Self {
        Self {
            companies: companies.into_iter().map(Arc::new).collect(),
        }
    }
}

#[async_trait]
impl CompanyProvider for JsonCompanyProvider {
    async fn list(&self) -> Result<Vec<Arc<Company>>, AppError> {
        Ok(self.companies.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn company(ticker: &str, name: &str) -> Company {
        Company {
            ticker_symbol: Some(ticker.to_string()),
            company_name: Some(name.to_string()),
            ..Company::default()
        }
    }

    fn provider() -> JsonCompanyProvider {
        JsonCompanyProvider::from_companies(vec![
            company("MSFT", "Microsoft"),
            company("AAPL", "Apple"),
        ])
    }

    #[tokio::test]
    async fn test_find_by_ticker_is_case_insensitive() {
        let found = find_by_ticker(&provider(), " aapl ").await.unwrap().unwrap();
        assert_eq!(found.company_name.as_deref(), Some("Apple"));
        assert!(find_by_ticker(&provider(), "NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_first_company() {
        let provider = provider();
        let by_ticker = resolve_company(&provider, Some("AAPL")).await.unwrap().unwrap();
        assert_eq!(by_ticker.ticker_symbol.as_deref(), Some("AAPL"));

        let unknown = resolve_company(&provider, Some("NOPE")).await.unwrap().unwrap();
        assert_eq!(unknown.ticker_symbol.as_deref(), Some("MSFT"));

        let none = resolve_company(&provider, None).await.unwrap().unwrap();
        assert_eq!(none.ticker_symbol.as_deref(), Some("MSFT"));
    }

    #[tokio::test]
    async fn test_resolve_with_no_companies() {
        let empty = JsonCompanyProvider::from_companies(vec![]);
        assert!(resolve_company(&empty, Some("MSFT")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_loads_partial_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"ticker_symbol": "ACME", "company_name": "Acme Corp", "industry": "Software"}},
                {{"company_name": "Bare"}}
            ]"#
        )
        .unwrap();

        let provider = JsonCompanyProvider::from_path(file.path()).unwrap();
        let companies = provider.list().await.unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].industry.as_deref(), Some("Software"));
        assert!(companies[1].ticker_symbol.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(JsonCompanyProvider::from_path(file.path()).is_err());
    }

    #[test]
    fn test_bundled_company_data_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/companies.json");
        let provider = JsonCompanyProvider::from_path(&path).unwrap();
        assert!(!provider.companies.is_empty());
        assert!(provider
            .companies
            .iter()
            .all(|c| c.ticker_symbol.is_some() && c.company_name.is_some()));
    }
}
