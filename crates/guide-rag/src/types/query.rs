//! Request types for the ask endpoint

use serde::{Deserialize, Serialize};

/// Request body for `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    ///
    /// Defaults to empty when the field is missing, so a bodiless question
    /// gets the same rejection as a blank one.
    #[serde(default)]
    pub question: String,
}
