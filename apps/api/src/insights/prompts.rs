// Prompt templates for the insight panels.
// Placeholders are `{name}` and are filled by `builder::render_template` from
// `CompanyFacts`. Missing company data renders as `N/A`, never as a blank.

/// Strategic position analysis. Free text, no internet context.
pub const STRATEGIC_PROMPT_TEMPLATE: &str = r#"Analyze the strategic position of {company_name} based on the following data:
- Industry: {industry}
- Revenue: {revenue}
- Market Cap: {market_cap}
- Employee Count: {employee_count}
- Business Segments: {segments_with_share}
- Geographic Presence: {regions_with_share}
- Recent Activities: {activities}

Provide strategic intelligence analysis covering:
1. Competitive positioning and market leadership
2. Strategic growth opportunities
3. Risk assessment and potential challenges
4. Innovation and transformation initiatives
5. Market expansion strategies"#;

/// Stock performance analysis. Free text, internet context.
pub const STOCK_PROMPT_TEMPLATE: &str = r#"Provide comprehensive stock performance analysis for {company_name} ({ticker_symbol}) based on:
- Market Cap: {market_cap}
- Revenue: {revenue}
- Industry: {industry}
- Key Metrics: P/E {pe_ratio}, ROE {roe}, Debt-to-Equity {debt_to_equity}, Profit Margin {profit_margin}
- Recent Activities: {dated_activities}

Analyze:
1. Financial health and valuation metrics
2. Stock performance trends and outlook
3. Dividend policy and shareholder returns
4. Analyst sentiment and target price insights
5. Peer comparison and relative valuation

Provide a detailed analysis covering these aspects."#;

/// Latest business developments. Free text, internet context.
pub const LATEST_PROMPT_TEMPLATE: &str = r#"Provide latest business insights and analysis for {company_name} including:
1. Recent news analysis and market impact
2. Latest investment activities and strategic moves
3. Most active business segments performance
4. Emerging trends and opportunities in {industry}
5. Corporate strategy evolution and direction

Focus on events from the last 3-6 months and provide actionable intelligence."#;

/// Competitor intelligence. Schema-constrained, internet context.
pub const COMPETITOR_PROMPT_TEMPLATE: &str = r#"Provide comprehensive competitor intelligence analysis for {company_name} in the {industry} industry:

Company Context:
- Market Cap: {market_cap}
- Revenue: {revenue}
- Key Business Segments: {segment_names}
- Geographic Presence: {region_names}

Analyze:
1. Direct competitors and market positioning
2. Competitive advantages and differentiators
3. Market share dynamics and trends
4. Competitive threats and opportunities
5. Strategic responses to competitive pressure
6. Innovation race and technology competition"#;

/// Executive leadership analysis. Schema-constrained, internet context.
pub const EXECUTIVE_PROMPT_TEMPLATE: &str = r#"Provide comprehensive executive leadership analysis for {company_name}:

Company Context:
- CEO: {ceo}
- Industry: {industry}
- Market Cap: {market_cap}
- Leadership Team: {leadership_team}

Analyze:
1. Leadership effectiveness and track record
2. Strategic vision and execution capability
3. Recent executive communications and statements
4. Leadership changes and their impact
5. Board composition and governance
6. Executive compensation and alignment
7. Leadership reputation and market perception"#;

/// Investment opportunities. Schema-constrained, internet context.
pub const INVESTMENT_PROMPT_TEMPLATE: &str = r#"Provide comprehensive investment opportunities analysis for {company_name}:

Company Data:
- Market Cap: {market_cap}
- Revenue: {revenue}
- Industry: {industry}
- Key Metrics: P/E {pe_ratio}, ROE {roe}
- Recent Activities: {activities}
- Business Segments: {segment_names}

Analyze:
1. Investment thesis and value proposition
2. Growth catalysts and expansion opportunities
3. Valuation assessment and price targets
4. Risk factors and mitigation strategies
5. ESG investment considerations
6. Portfolio fit and allocation recommendations
7. Entry and exit strategies"#;
