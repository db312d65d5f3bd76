//! The LLM backend trait.

use async_trait::async_trait;
use novelist_core::{GenerateRequest, GenerateResponse};
use novelist_error::NovelistResult;
use std::sync::Arc;

/// Core trait that all LLM backends must implement.
#[async_trait]
pub trait NovelistDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> NovelistResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T> NovelistDriver for Arc<T>
where
    T: NovelistDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> NovelistResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T> NovelistDriver for Box<T>
where
    T: NovelistDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> NovelistResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
