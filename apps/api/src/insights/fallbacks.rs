//! Static fallback payloads shown when a live analysis cannot be produced.
//!
//! Content is generic sample analysis. Only the company name is interpolated,
//! into the notice and headline text, so a degraded panel never reads as if
//! it were about a different company. Each fallback has the same kind as the
//! category's live result: text for free-text categories, schema-conforming
//! objects for structured ones.

use serde_json::json;

use crate::insights::InsightCategory;
use crate::llm_client::InsightResult;
use crate::models::company::Company;

pub fn fallback_for(category: InsightCategory, company: &Company) -> InsightResult {
    let name = company.display_name();
    let notice = format!(
        "Unable to fetch real-time {} analysis for {name}. Please try again later.",
        label(category)
    );

    let value = match category {
        InsightCategory::Strategic => {
            return InsightResult::Text(format!("{notice}\n\n{STRATEGIC_SAMPLE}"))
        }
        InsightCategory::Stock => {
            return InsightResult::Text(format!("{notice}\n\n{STOCK_SAMPLE}"))
        }
        InsightCategory::Latest => {
            return InsightResult::Text(format!(
                "{notice}\n\nRecent market developments at {name}: {LATEST_SAMPLE}"
            ))
        }
        InsightCategory::Competitor => json!({
            "direct_competitors": [],
            "competitive_positioning": {
                "market_leader_status": notice,
                "unique_value_propositions": [
                    "Established customer base",
                    "Broad product portfolio"
                ],
                "competitive_moats": ["Brand recognition", "Scale advantages"]
            },
            "market_dynamics": {
                "market_share_trend": "Stable",
                "growth_rate_vs_competitors": "In line with peers",
                "pricing_strategy": "Value-based pricing"
            },
            "threats_opportunities": [
                {
                    "type": "Threat",
                    "description": "Intensifying competition from new entrants",
                    "impact_level": "Medium",
                    "timeline": "1-2 years"
                },
                {
                    "type": "Opportunity",
                    "description": "Adjacent market expansion",
                    "impact_level": "Medium",
                    "timeline": "2-3 years"
                }
            ],
            "strategic_recommendations": [
                {
                    "strategy": "Differentiate through product innovation",
                    "rationale": "Protects pricing power against lower-cost rivals",
                    "priority": "High"
                }
            ]
        }),
        InsightCategory::Executive => json!({
            "leadership_effectiveness": {
                "overall_rating": "Not available",
                "key_strengths": ["Experienced leadership team"],
                "areas_for_improvement": [],
                "leadership_style": notice
            },
            "strategic_vision": {
                "vision_clarity": "Clear long-term direction",
                "execution_track_record": "Consistent delivery against stated goals",
                "innovation_leadership": "Active investment in new capabilities",
                "transformation_initiatives": ["Digital transformation", "Operational efficiency"]
            },
            "recent_communications": [],
            "governance_analysis": {
                "board_composition": "Majority independent board",
                "independence_rating": "Adequate",
                "governance_practices": ["Annual director elections", "Independent audit committee"]
            },
            "succession_planning": {
                "readiness_assessment": "Not assessed",
                "key_successors": [],
                "continuity_risks": ["Key-person dependency"]
            },
            "market_perception": {
                "investor_confidence": "Stable",
                "analyst_sentiment": "Neutral",
                "reputation_factors": ["Track record", "Communication transparency"]
            }
        }),
        InsightCategory::Investment => json!({
            "investment_thesis": {
                "core_thesis": notice,
                "investment_grade": "Not rated",
                "time_horizon": "Long-term (3-5 years)",
                "expected_return_range": "Market consensus varies"
            },
            "growth_catalysts": [
                {
                    "catalyst": "Technology innovation",
                    "impact_potential": "Medium",
                    "timeline": "2-5 years",
                    "probability": "Moderate"
                }
            ],
            "valuation_analysis": {
                "current_valuation_assessment": "Fair valuation relative to peers",
                "fair_value_estimate": "Not available",
                "upside_scenario": "Sustained growth in core segments",
                "downside_scenario": "Margin pressure from competition"
            },
            "risk_assessment": [
                {
                    "risk_factor": "Market competition",
                    "impact_level": "Medium",
                    "probability": "Moderate",
                    "mitigation_strategy": "Diversified revenue streams"
                }
            ],
            "esg_considerations": {
                "esg_score_assessment": "Not available",
                "sustainability_initiatives": [],
                "governance_strength": "Adequate"
            },
            "portfolio_recommendation": {
                "recommended_allocation": "Consult a financial advisor",
                "portfolio_role": "Core holding candidate",
                "investor_suitability": "Long-term investors"
            },
            "entry_exit_strategy": {
                "optimal_entry_points": ["Market pullbacks"],
                "exit_triggers": ["Thesis deterioration"],
                "monitoring_metrics": ["Revenue growth", "Operating margin"]
            }
        }),
    };

    InsightResult::Structured(value)
}

const STRATEGIC_SAMPLE: &str = "Competitive positioning: strong market position with \
competitive advantages in market leadership, innovation capabilities and financial strength.
Growth opportunities: technology innovation offers long-term growth potential over 2-5 years.
Risk assessment: market competition is a medium risk, mitigated by differentiation and innovation.
Recommendations: continue investing in core technologies, expand market presence strategically \
and keep the focus on customer needs.";

const STOCK_SAMPLE: &str = "Financial health: strong, supported by market leadership and \
innovation focus; watch for market saturation and competition.
Outlook: positive in the short term on strong fundamentals and well positioned for continued \
growth, with technology innovation and market expansion as key catalysts.
Analyst consensus: hold. Valuation looks fair relative to peers.";

const LATEST_SAMPLE: &str = "the company continues to show resilience. Investment activity \
stays focused on innovation to maintain market leadership, core business performance is stable, \
and technology innovation remains the key trend for future growth.";

fn label(category: InsightCategory) -> &'static str {
    match category {
        InsightCategory::Strategic => "strategic",
        InsightCategory::Stock => "stock performance",
        InsightCategory::Latest => "market",
        InsightCategory::Competitor => "competitor",
        InsightCategory::Executive => "leadership",
        InsightCategory::Investment => "investment",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Company {
        Company {
            company_name: Some("Acme Corp".into()),
            ..Company::default()
        }
    }

    #[test]
    fn test_structured_fallbacks_conform_to_their_schema() {
        for category in InsightCategory::ALL {
            let Some(schema) = category.schema() else {
                continue;
            };
            let InsightResult::Structured(value) = fallback_for(category, &acme()) else {
                panic!("{category} fallback must be structured");
            };
            assert_eq!(schema.validate(&value), Ok(()), "{category}");
        }
    }

    #[test]
    fn test_fallbacks_are_never_empty() {
        for category in InsightCategory::ALL {
            assert!(!fallback_for(category, &acme()).is_empty(), "{category}");
        }
    }

    #[test]
    fn test_fallback_kind_matches_ready_result_kind() {
        for category in InsightCategory::ALL {
            let fallback = fallback_for(category, &acme());
            match category.schema() {
                Some(_) => assert!(
                    matches!(fallback, InsightResult::Structured(_)),
                    "{category}"
                ),
                None => assert!(matches!(fallback, InsightResult::Text(_)), "{category}"),
            }
        }
    }

    #[test]
    fn test_fallback_names_the_company() {
        let InsightResult::Text(text) = fallback_for(InsightCategory::Strategic, &acme()) else {
            panic!("strategic fallback must be text");
        };
        assert!(text.starts_with(
            "Unable to fetch real-time strategic analysis for Acme Corp. Please try again later."
        ));

        let InsightResult::Text(text) = fallback_for(InsightCategory::Latest, &acme()) else {
            panic!("latest fallback must be text");
        };
        assert!(text.contains("Recent market developments at Acme Corp"));
    }

    #[test]
    fn test_fallback_is_stable_for_same_company() {
        for category in InsightCategory::ALL {
            assert_eq!(
                fallback_for(category, &acme()),
                fallback_for(category, &acme())
            );
        }
    }
}
