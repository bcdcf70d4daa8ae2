// Shared system prompts for completion calls.
// Category-specific prompt templates live next to the code that renders them.

use super::schema::ResponseSchema;

/// System prompt for free-text analysis requests.
pub const ANALYST_SYSTEM: &str = "You are an expert corporate analyst. \
    Provide factual, specific, well-structured analysis of the company described. \
    Do NOT invent precise figures you cannot support; say when information is uncertain.";

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Schema instruction appended to the JSON-only system prompt.
/// Replace `{schema_json}` before sending.
pub const SCHEMA_INSTRUCTION_TEMPLATE: &str = "Return a JSON object that conforms EXACTLY to this JSON Schema. \
    Every top-level property is required. Use strings for every scalar value.\n\n{schema_json}";

/// Builds the system prompt for a schema-constrained request.
pub fn schema_system_prompt(schema: &ResponseSchema) -> Result<String, serde_json::Error> {
    let schema_json = serde_json::to_string_pretty(&schema.to_json_schema())?;
    Ok(format!(
        "{JSON_ONLY_SYSTEM}\n\n{}",
        SCHEMA_INSTRUCTION_TEMPLATE.replace("{schema_json}", &schema_json)
    ))
}
