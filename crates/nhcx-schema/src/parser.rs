//! Parse raw LLM output into extracted policy data

use nhcx_domain::ExtractedPolicyData;
use serde_json::Value;
use tracing::debug;

use crate::{SchemaTemplate, ShapeError};

/// Parse an LLM response against the template
///
/// Handles markdown-fenced output, then runs the full ingress validation of
/// [`SchemaTemplate::parse`].
pub fn parse_llm_response(
    template: &SchemaTemplate,
    response: &str,
) -> Result<ExtractedPolicyData, ShapeError> {
    let json_str = extract_json(response)?;
    let raw: Value = serde_json::from_str(&json_str)
        .map_err(|e| ShapeError::Malformed(format!("JSON parse error: {}", e)))?;
    debug!(bytes = json_str.len(), "parsing extracted document");
    template.parse(&raw)
}

/// Extract JSON from a response, unwrapping markdown code fences
///
/// LLMs sometimes wrap JSON in ```json fences despite instructions.
pub fn extract_json(response: &str) -> Result<String, ShapeError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ShapeError::Malformed("empty code block".to_string()));
        }
        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
