//! Google Gemini API implementation.
//!
//! The client supports per-request model selection. A request naming a model
//! (via `GenerateRequest.model`) gets a dedicated `Gemini` handle for that
//! model, created lazily and cached for later calls. Requests without a model
//! use the configured default.
//!
//! # Example
//!
//! ```no_run
//! use novelist_core::{GenerateRequest, Message};
//! use novelist_interface::NovelistDriver;
//! use novelist_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//!
//! let request = GenerateRequest::builder()
//!     .messages(vec![
//!         Message::system("You are a world-building assistant."),
//!         Message::user("Describe a city built on the back of a whale."),
//!     ])
//!     .model("gemini-2.5-pro")
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, info, instrument, warn};

use gemini_rust::{Gemini, client::Model};

use novelist_config::GeminiSettings;
use novelist_core::{GenerateRequest, GenerateResponse, Message, Role};
use novelist_error::{GeminiError, GeminiErrorKind, NovelistResult};
use novelist_interface::NovelistDriver;

use super::GeminiResult;

/// Client for the Google Gemini API with per-model client pooling.
///
/// Sampling defaults and retry behaviour come from [`GeminiSettings`]; a
/// request's own `temperature`, `max_tokens` and `model` take precedence.
pub struct GeminiClient {
    /// Cache of model-specific REST API clients
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
    temperature: f32,
    max_output_tokens: u32,
    /// Retry configuration
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().map(|c| c.len()).unwrap_or_default();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("no_retry", &self.no_retry)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Unrecognized names become `Model::Custom`, with the "models/" prefix
    /// the Gemini API requires added when missing.
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "text-embedding-004" => Model::TextEmbedding004,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Create a client with default settings.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> NovelistResult<Self> {
        Self::from_settings(&GeminiSettings::default())
    }

    /// Create a client from the `[gemini]` configuration section.
    ///
    /// The key is taken from the settings, falling back to `GEMINI_API_KEY`.
    #[instrument(name = "gemini_client_from_settings", skip(settings), fields(model = %settings.model))]
    pub fn from_settings(settings: &GeminiSettings) -> NovelistResult<Self> {
        let api_key = settings
            .resolve_api_key()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, settings)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(
        api_key: impl Into<String>,
        settings: &GeminiSettings,
    ) -> NovelistResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        debug!(
            model = %settings.model,
            no_retry = settings.no_retry,
            "Creating Gemini client"
        );

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: settings.model.clone(),
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            no_retry: settings.no_retry,
            max_retries: settings.max_retries,
            retry_backoff_ms: settings.retry_backoff_ms,
        })
    }

    /// Get or create the cached client for a model.
    fn client_for(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(format!(
                "client cache poisoned: {}",
                e
            )))
        })?;

        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        debug!(model = model_name, "Created Gemini client for model");
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    /// Send one request, mapping failures and blank answers to [`GeminiError`].
    async fn attempt(
        client: &Gemini,
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> GeminiResult<String> {
        let mut builder = client.generate_content();

        // Gemini takes the system prompt separately from the turns
        let mut system_prompt: Option<String> = None;
        for msg in messages {
            let text = msg.text();
            if text.is_empty() {
                continue;
            }
            match msg.role {
                Role::System => {
                    system_prompt = Some(match system_prompt {
                        Some(existing) => format!("{}\n\n{}", existing, text),
                        None => text,
                    });
                }
                Role::User => builder = builder.with_user_message(&text),
                Role::Assistant => builder = builder.with_model_message(&text),
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }

        let response = builder
            .with_temperature(temperature)
            .with_max_output_tokens(output_token_limit(max_tokens))
            .execute()
            .await
            .map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
        }
        Ok(text)
    }

    /// Internal generate method that returns Gemini-specific errors.
    #[instrument(skip(self, req), fields(messages = req.messages().len()))]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model_name = req.model().clone().unwrap_or_else(|| self.model_name.clone());
        let client = self.client_for(&model_name)?;
        let temperature = req.temperature().unwrap_or(self.temperature);
        let max_tokens = req.max_tokens().unwrap_or(self.max_output_tokens);
        let messages = req.messages();

        debug!(
            model = %model_name,
            temperature,
            max_tokens,
            "Sending Gemini request"
        );

        let first = Self::attempt(&client, messages, temperature, max_tokens).await;
        let err = match first {
            Ok(text) => return Ok(GenerateResponse::from_text(text)),
            Err(e) => e,
        };

        if self.no_retry || !err.kind.is_retryable() {
            warn!(error = %err, model = %model_name, "Gemini request failed, not retrying");
            return Err(err);
        }

        // Pick the retry strategy from the first error, then apply overrides
        let (mut initial_ms, mut max_retries, max_delay_secs) = err.kind.retry_strategy_params();
        if let Some(override_backoff) = self.retry_backoff_ms {
            initial_ms = override_backoff;
        }
        if let Some(override_retries) = self.max_retries {
            max_retries = override_retries;
        }

        info!(
            error = %err,
            model = %model_name,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Gemini request failed, will retry with configured strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        let text = Retry::spawn(retry_strategy, || {
            let client = client.clone();
            async move {
                match Self::attempt(&client, messages, temperature, max_tokens).await {
                    Ok(text) => Ok(text),
                    Err(e) if e.kind.is_retryable() => {
                        warn!(error = %e, "Gemini request failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "Permanent Gemini error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await?;

        Ok(GenerateResponse::from_text(text))
    }

    /// Convert a gemini-rust error into a structured [`GeminiError`].
    ///
    /// Messages carrying an HTTP status become [`GeminiErrorKind::HttpError`]
    /// so the retry logic can classify them.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();
        match Self::extract_status_code(&err_msg) {
            Some(status_code) => GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            }),
            None => GeminiError::new(GeminiErrorKind::ApiRequest(err_msg)),
        }
    }

    /// Extract the status from messages like
    /// "bad response from server; code 503; description: ...".
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let digits: String = error_msg[code_start + 5..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// The SDK takes a signed limit; larger values saturate.
fn output_token_limit(max_tokens: u32) -> i32 {
    i32::try_from(max_tokens).unwrap_or(i32::MAX)
}

#[async_trait]
impl NovelistDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> NovelistResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    /// The default model, used when `GenerateRequest.model` is None.
    fn model_name(&self) -> &str {
        &self.model_name
    }
}
