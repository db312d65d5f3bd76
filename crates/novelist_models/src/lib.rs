//! LLM provider integrations for Novelist.
//!
//! Providers are feature-gated. The only provider today is Google Gemini
//! (feature `gemini`, on by default), which implements
//! [`NovelistDriver`](novelist_interface::NovelistDriver).
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # async fn run() -> novelist_error::NovelistResult<()> {
//! use novelist_core::GenerateRequest;
//! use novelist_interface::NovelistDriver;
//! use novelist_models::GeminiClient;
//!
//! let client = GeminiClient::new()?;
//! let response = client
//!     .generate(&GenerateRequest::prompt("Name three rivers of a desert world."))
//!     .await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiResult};
