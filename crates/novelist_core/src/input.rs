//! Input types for LLM requests.

use serde::{Deserialize, Serialize};

/// Content that can be sent to a model.
///
/// The pipeline only produces text prompts, but the tagged representation
/// keeps serialized requests forward compatible with richer inputs.
///
/// ```
/// use novelist_core::Input;
///
/// let input = Input::Text("Describe a floating city".to_string());
/// assert_eq!(input.as_text(), Some("Describe a floating city"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),
}

impl Input {
    /// Borrow the text of a text input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}
