#![cfg(feature = "gemini")]

// Tests for the Gemini driver.
//
// Construction tests run offline. Tests marked with
// `#[cfg_attr(not(feature = "api"), ignore)]` hit the real Gemini API and need
// GEMINI_API_KEY (a `.env` file is honoured).

use novelist_config::GeminiSettings;
use novelist_core::{GenerateRequest, Message};
use novelist_error::{NovelistErrorKind, GeminiErrorKind};
use novelist_interface::NovelistDriver;
use novelist_models::GeminiClient;
use std::sync::Arc;

#[test]
fn test_explicit_key_builds_client() -> anyhow::Result<()> {
    let client = GeminiClient::with_api_key("offline-key", &GeminiSettings::default())?;
    assert_eq!(client.provider_name(), "gemini");
    assert_eq!(client.model_name(), "gemini-2.5-flash");
    Ok(())
}

#[test]
fn test_configured_key_wins_over_environment() -> anyhow::Result<()> {
    let settings = GeminiSettings {
        api_key: Some("from-config".to_string()),
        model: "gemini-2.5-flash-lite".to_string(),
        ..GeminiSettings::default()
    };
    let client = GeminiClient::from_settings(&settings)?;
    assert_eq!(client.model_name(), "gemini-2.5-flash-lite");
    Ok(())
}

#[test]
fn test_empty_key_reports_missing_api_key() {
    let err = GeminiClient::with_api_key("", &GeminiSettings::default()).unwrap_err();
    match err.kind() {
        NovelistErrorKind::Gemini(e) => assert_eq!(e.kind, GeminiErrorKind::MissingApiKey),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_client_usable_as_trait_object() -> anyhow::Result<()> {
    let client = GeminiClient::with_api_key("offline-key", &GeminiSettings::default())?;
    let driver: Arc<dyn NovelistDriver> = Arc::new(client);
    assert_eq!(driver.provider_name(), "gemini");
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_live_generation() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new()?;

    let request = GenerateRequest::builder()
        .messages(vec![
            Message::system("Answer with a single word."),
            Message::user("What colour is a clear daytime sky?"),
        ])
        .max_tokens(64u32)
        .temperature(0.0f32)
        .build()?;

    let response = client.generate(&request).await?;
    assert!(!response.text().trim().is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_live_model_override() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new()?;

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Reply with the word 'ready'.")])
        .model("gemini-2.5-flash-lite")
        .max_tokens(32u32)
        .build()?;

    let response = client.generate(&request).await?;
    assert!(!response.text().is_empty());
    Ok(())
}
