//! LLM prompt engineering for policy extraction

use crate::SchemaTemplate;

/// Builds extraction prompts from pruned document text and the template
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a prompt builder over pruned policy text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self, template: &SchemaTemplate) -> String {
        let mut prompt = String::new();

        // 1. Instruction block
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Field-by-field instructions from the template
        prompt.push_str(&format!(
            "Schema template version {}. Field guide:\n",
            template.version()
        ));
        for spec in template.fields() {
            prompt.push_str(&format!("- {}: {}\n", spec.path, spec.instruction));
        }
        prompt.push('\n');

        // 3. The document skeleton to fill
        prompt.push_str("Fill this document, keeping every key:\n");
        prompt.push_str(&self.schema_document(template));
        prompt.push_str("\n\n");

        // 4. The policy text
        prompt.push_str("Policy text:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    /// The template skeleton as a pretty JSON document, suitable for the
    /// `schema` argument of a structured-generation call
    pub fn schema_document(&self, template: &SchemaTemplate) -> String {
        serde_json::to_string_pretty(&template.skeleton())
            .unwrap_or_else(|_| template.skeleton().to_string())
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are reading the text of one health insurance policy document.
Fill the JSON document below with everything the policy states.

Rules:
- Keep every key from the skeleton. Do not invent keys, do not drop keys.
- A value you cannot find is null (or an empty list), never a guess.
- Copy names, codes and category terms exactly as the document words them.
- Amounts are plain numbers without currency symbols or thousands separators.
- Units are one of "currency", "days", "percent"; null when the document is unclear.
- List entries keep the document's order."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output: the filled JSON document only.
No markdown code fences, no commentary, no additional text."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_document_text() {
        let builder = PromptBuilder::new("Sum insured Rs. 5,00,000");
        let prompt = builder.build(&SchemaTemplate::v1());
        assert!(prompt.contains("Sum insured Rs. 5,00,000"));
    }

    #[test]
    fn test_prompt_includes_skeleton_and_instructions() {
        let builder = PromptBuilder::new("text");
        let prompt = builder.build(&SchemaTemplate::v1());
        assert!(prompt.contains("\"insurer\""));
        assert!(prompt.contains("\"supportingDocuments\""));
        assert!(prompt.contains("never a guess"));
        assert!(prompt.contains("Schema template version 1"));
    }

    #[test]
    fn test_prompt_lists_every_field_path() {
        let template = SchemaTemplate::v1();
        let prompt = PromptBuilder::new("text").build(&template);
        for spec in template.fields() {
            assert!(prompt.contains(spec.path), "prompt missing `{}`", spec.path);
        }
    }

    #[test]
    fn test_schema_document_is_valid_json() {
        let doc = PromptBuilder::new("").schema_document(&SchemaTemplate::v1());
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert!(value.get("plan").is_some());
    }
}
