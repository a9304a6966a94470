//! Response types for the ask endpoint

use serde::{Deserialize, Serialize};

/// Response body for `POST /ask`
///
/// Echoes the question exactly as asked alongside the generated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question as received
    pub question: String,
    /// Generated answer, returned unvalidated
    pub answer: String,
}

impl AskResponse {
    /// Create a new response
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
