//! The four generation agents.
//!
//! Each agent owns a handle to a [`NovelistDriver`] and the shared
//! [`Prompts`](crate::Prompts). A parse failure never fails a call: agents
//! fall back to a default record built from the user's brief or the raw
//! response. Only driver errors propagate.

mod character_creator;
mod content_creator;
mod plot_designer;
mod world_builder;

pub use character_creator::CharacterCreator;
pub use content_creator::ContentCreator;
pub use plot_designer::PlotDesigner;
pub use world_builder::WorldBuilder;

use crate::parse_object;
use novelist_core::{GenerateRequest, Message};
use novelist_error::{BackendError, BuilderError, NovelistResult};
use novelist_interface::NovelistDriver;
use serde_json::Value;

/// Send a system instruction and a user prompt, returning the text answer.
async fn complete<D>(driver: &D, system: &str, prompt: String) -> NovelistResult<String>
where
    D: NovelistDriver + ?Sized,
{
    let request = GenerateRequest::builder()
        .messages(vec![Message::system(system), Message::user(prompt)])
        .build()
        .map_err(|e| BuilderError::from(e.to_string()))?;

    tracing::debug!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        "Requesting generation"
    );

    let text = driver.generate(&request).await?.text();
    if text.trim().is_empty() {
        return Err(BackendError::new("model returned no text").into());
    }
    Ok(text)
}

/// The value a model returned for an aspect, under its field name or label.
fn aspect_value(response: &str, key: &str, label: &str) -> Option<Value> {
    let map = parse_object(response)?;
    map.get(key).or_else(|| map.get(label)).cloned()
}
