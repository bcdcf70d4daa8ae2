// Prompt constants for the interactive chat panel.

/// Chat prompt template. Placeholders are company facts plus `{question}`.
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are an expert corporate analyst providing insights about {company_name}.

Company Context:
- Company: {company_name}
- Industry: {industry}
- Market Cap: {market_cap}
- Revenue: {revenue}
- Business Segments: {segment_names}

User Question: {question}

Please provide a concise, expert-level response (2-3 sentences max) that directly answers the question with specific insights about this company."#;

/// Starter questions offered before the user has typed anything.
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What are the main competitive advantages?",
    "How is the financial health trending?",
    "What are the biggest growth opportunities?",
    "What risks should investors be aware of?",
    "How does the leadership compare to peers?",
];

/// Assistant reply used when a question cannot be answered.
pub const CHAT_FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble processing your question right now. Please try again.";
