//! Trait definitions for external interactions
//!
//! These traits define the boundary between the deterministic core and the
//! LLM infrastructure. Concrete providers live in `nhcx-llm`; the core never
//! learns which backend satisfied a call.

/// Trait for LLM provider operations
///
/// One capability: given a prompt (and optionally a schema document), return
/// best-effort text. Implemented by the infrastructure layer (nhcx-llm).
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output guided by a schema document
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}
