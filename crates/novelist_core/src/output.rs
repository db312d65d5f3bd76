//! Output types from LLM responses.

use serde::{Deserialize, Serialize};

/// Content returned by a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured output, for providers that return parsed JSON directly.
    Json(serde_json::Value),
}

impl Output {
    /// Render this output as text. JSON outputs are serialized compactly.
    pub fn to_text(&self) -> String {
        match self {
            Output::Text(text) => text.clone(),
            Output::Json(value) => value.to_string(),
        }
    }
}
