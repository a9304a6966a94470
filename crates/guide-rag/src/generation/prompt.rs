//! Prompt templates for answer generation

/// Prompt builder for guide questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join chunk texts into a single context block
    pub fn build_context(contexts: &[String]) -> String {
        contexts.join("\n\n")
    }

    /// Build a question-answering prompt grounded in the given context
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Based on the following context, answer the question. Only use information from the context.

Context:
{context}

Question: {question}

Answer:"#,
            context = context,
            question = question
        )
    }
}
