//! Response schemas for the structured insight categories.

use crate::llm_client::schema::ResponseSchema;

pub fn competitor_schema() -> ResponseSchema {
    ResponseSchema::new()
        .objects(
            "direct_competitors",
            ResponseSchema::new()
                .string("name")
                .string("market_cap")
                .string("competitive_position")
                .strings("key_strengths")
                .string("market_overlap"),
        )
        .object(
            "competitive_positioning",
            ResponseSchema::new()
                .string("market_leader_status")
                .strings("unique_value_propositions")
                .strings("competitive_moats"),
        )
        .object(
            "market_dynamics",
            ResponseSchema::new()
                .string("market_share_trend")
                .string("growth_rate_vs_competitors")
                .string("pricing_strategy"),
        )
        .objects(
            "threats_opportunities",
            ResponseSchema::new()
                .string("type")
                .string("description")
                .string("impact_level")
                .string("timeline"),
        )
        .objects(
            "strategic_recommendations",
            ResponseSchema::new()
                .string("strategy")
                .string("rationale")
                .string("priority"),
        )
}

pub fn executive_schema() -> ResponseSchema {
    ResponseSchema::new()
        .object(
            "leadership_effectiveness",
            ResponseSchema::new()
                .string("overall_rating")
                .strings("key_strengths")
                .strings("areas_for_improvement")
                .string("leadership_style"),
        )
        .object(
            "strategic_vision",
            ResponseSchema::new()
                .string("vision_clarity")
                .string("execution_track_record")
                .string("innovation_leadership")
                .strings("transformation_initiatives"),
        )
        .objects(
            "recent_communications",
            ResponseSchema::new()
                .string("executive")
                .string("key_message")
                .string("market_impact")
                .string("significance"),
        )
        .object(
            "governance_analysis",
            ResponseSchema::new()
                .string("board_composition")
                .string("independence_rating")
                .strings("governance_practices"),
        )
        .object(
            "succession_planning",
            ResponseSchema::new()
                .string("readiness_assessment")
                .strings("key_successors")
                .strings("continuity_risks"),
        )
        .object(
            "market_perception",
            ResponseSchema::new()
                .string("investor_confidence")
                .string("analyst_sentiment")
                .strings("reputation_factors"),
        )
}

pub fn investment_schema() -> ResponseSchema {
    ResponseSchema::new()
        .object(
            "investment_thesis",
            ResponseSchema::new()
                .string("core_thesis")
                .string("investment_grade")
                .string("time_horizon")
                .string("expected_return_range"),
        )
        .objects(
            "growth_catalysts",
            ResponseSchema::new()
                .string("catalyst")
                .string("impact_potential")
                .string("timeline")
                .string("probability"),
        )
        .object(
            "valuation_analysis",
            ResponseSchema::new()
                .string("current_valuation_assessment")
                .string("fair_value_estimate")
                .string("upside_scenario")
                .string("downside_scenario"),
        )
        .objects(
            "risk_assessment",
            ResponseSchema::new()
                .string("risk_factor")
                .string("impact_level")
                .string("probability")
                .string("mitigation_strategy"),
        )
        .object(
            "esg_considerations",
            ResponseSchema::new()
                .string("esg_score_assessment")
                .strings("sustainability_initiatives")
                .string("governance_strength"),
        )
        .object(
            "portfolio_recommendation",
            ResponseSchema::new()
                .string("recommended_allocation")
                .string("portfolio_role")
                .string("investor_suitability"),
        )
        .object(
            "entry_exit_strategy",
            ResponseSchema::new()
                .strings("optimal_entry_points")
                .strings("exit_triggers")
                .strings("monitoring_metrics"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_sections() {
        assert_eq!(
            competitor_schema().field_names().collect::<Vec<_>>(),
            [
                "direct_competitors",
                "competitive_positioning",
                "market_dynamics",
                "threats_opportunities",
                "strategic_recommendations"
            ]
        );
        assert_eq!(executive_schema().field_names().count(), 6);
        assert_eq!(investment_schema().field_names().count(), 7);
    }
}
