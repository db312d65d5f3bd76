//! Google Gemini REST client.
//!
//! [`GeminiClient`] keeps one `gemini_rust::Gemini` per model name, created
//! on first use, and retries transient failures with exponential backoff
//! tuned to the failing status code.

mod client;

pub use client::GeminiClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, novelist_error::GeminiError>;
