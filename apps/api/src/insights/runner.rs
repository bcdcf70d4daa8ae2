//! Runs one insight panel end to end: build prompt → complete → fallback on failure.

use tracing::{info, warn};

use crate::insights::completion::request_insight;
use crate::insights::fallbacks::fallback_for;
use crate::insights::panel::InsightOutcome;
use crate::insights::InsightCategory;
use crate::llm_client::CompletionService;
use crate::models::company::Company;

/// Never fails: any completion problem yields the category fallback, tagged `Degraded`.
pub async fn run_insight(
    service: &dyn CompletionService,
    category: InsightCategory,
    company: &Company,
) -> InsightOutcome {
    let request = category.request_for(company);

    match request_insight(service, &request).await {
        Ok(result) => {
            info!(
                "{category} insight ready for {}",
                company.display_name()
            );
            InsightOutcome::Ready(result)
        }
        Err(reason) => {
            warn!(
                "{category} insight degraded for {}: {reason}",
                company.display_name()
            );
            InsightOutcome::Degraded(fallback_for(category, company))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::completion::test_support::{FailingCompletion, FixedCompletion};
    use crate::llm_client::InsightResult;
    use serde_json::json;

    fn acme() -> Company {
        Company {
            company_name: Some("Acme Corp".into()),
            industry: Some("Software".into()),
            ..Company::default()
        }
    }

    #[tokio::test]
    async fn test_strategic_text_is_rendered_verbatim() {
        let service = FixedCompletion::text("Acme Corp leads the software industry.");
        let outcome = run_insight(&service, InsightCategory::Strategic, &acme()).await;

        assert_eq!(
            outcome,
            InsightOutcome::Ready(InsightResult::Text(
                "Acme Corp leads the software industry.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_transport_failure_substitutes_fallback_for_every_category() {
        for category in InsightCategory::ALL {
            let outcome = run_insight(&FailingCompletion, category, &acme()).await;
            assert_eq!(
                outcome,
                InsightOutcome::Degraded(fallback_for(category, &acme())),
                "{category}"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_response_substitutes_fallback_for_every_category() {
        let service = FixedCompletion::text("   ");
        for category in InsightCategory::ALL {
            let outcome = run_insight(&service, category, &acme()).await;
            assert_eq!(
                outcome,
                InsightOutcome::Degraded(fallback_for(category, &acme())),
                "{category}"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_structure_substitutes_fallback() {
        let service = FixedCompletion::result(InsightResult::Structured(json!({
            "direct_competitors": "should be a list"
        })));
        for category in [
            InsightCategory::Competitor,
            InsightCategory::Executive,
            InsightCategory::Investment,
        ] {
            let outcome = run_insight(&service, category, &acme()).await;
            assert_eq!(
                outcome,
                InsightOutcome::Degraded(fallback_for(category, &acme())),
                "{category}"
            );
        }
    }

    #[tokio::test]
    async fn test_conforming_structured_result_is_ready() {
        let InsightResult::Structured(value) = fallback_for(InsightCategory::Investment, &acme())
        else {
            panic!("investment fallback must be structured");
        };
        let service = FixedCompletion::result(InsightResult::Structured(value.clone()));

        let outcome = run_insight(&service, InsightCategory::Investment, &acme()).await;
        assert_eq!(outcome, InsightOutcome::Ready(InsightResult::Structured(value)));
    }
}
