//! Test utilities for pipeline tests.
//!
//! [`ScriptedDriver`] replays canned responses in order and records every
//! request it receives.

use async_trait::async_trait;
use novelist_core::{GenerateRequest, GenerateResponse, Role};
use novelist_error::{BackendError, NovelistResult};
use novelist_interface::NovelistDriver;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted answer: text, or a backend failure.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Text(String),
    Fail(String),
}

#[allow(dead_code)]
pub fn text(body: &str) -> Reply {
    Reply::Text(body.to_string())
}

#[allow(dead_code)]
pub fn fail(message: &str) -> Reply {
    Reply::Fail(message.to_string())
}

/// Mock driver returning scripted replies.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    replies: Mutex<VecDeque<Reply>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

#[allow(dead_code)]
impl ScriptedDriver {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the user message of the `n`th request.
    pub fn user_prompt(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n]
            .messages()
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl NovelistDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> NovelistResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(body)) => Ok(GenerateResponse::from_text(body)),
            Some(Reply::Fail(message)) => Err(BackendError::new(message).into()),
            None => Err(BackendError::new("script exhausted").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

#[allow(dead_code)]
pub const WORLD_JSON: &str = r#"```json
{
  "name": "Aurelia",
  "background": "An archipelago of floating islands",
  "natural_laws": [{"name": "Skyfall", "description": "Islands sink at dusk"}],
  "cultures": ["Wind riders"],
  "history": "The Great Lifting",
  "regions": [{"name": "North Reach"}],
  "notable_figures": [],
  "magic_systems": [],
  "technologies": ["Sail gliders"]
}
```"#;

#[allow(dead_code)]
pub fn character_json(name: &str, role: &str) -> Reply {
    text(&format!(
        r#"{{"name": "{name}", "basic_info": {{"age": 20, "role": "{role}"}}, "appearance": "Tall", "personality": ["brave"], "background": "Born on a drifting isle", "abilities": ["gliding"]}}"#
    ))
}

#[allow(dead_code)]
pub const PLOT_JSON: &str = r#"Here is the plot:
{
  "title": "Tides of Aurelia",
  "background": "The isles are sinking one by one.",
  "main_plot": "Lin searches for the engine that keeps the isles aloft.",
  "turning_points": [{"name": "Betrayal", "description": "Mara sells the map"}],
  "chapters": [
    {"title": "Ebb", "summary": "The first island falls"},
    {"title": "Flood", "summary": "Lin meets Mara"},
    {"title": "Slack Water", "summary": "The engine is found"}
  ]
}"#;
