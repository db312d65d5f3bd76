//! Novelist - generate a short novel with Gemini
//!
//! One free-form description becomes a world, a cast of characters, a plot
//! with chapter outlines and finally chapter prose. Every record is stored
//! as a JSON file and the novel is exported as plain text.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use novelist::{GeminiClient, NovelPipeline, NovelistConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NovelistConfig::load()?;
//!     let driver = Arc::new(GeminiClient::from_settings(&config.gemini)?);
//!     let pipeline = NovelPipeline::from_config(driver, &config)?;
//!
//!     let report = pipeline.generate_novel("A lighthouse keeper who hears the sea").await?;
//!     println!("{}", report.complete_file.display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Novelist is organized as a workspace with focused crates:
//!
//! - `novelist_core` - story records and LLM request types
//! - `novelist_interface` - `NovelistDriver` trait definition
//! - `novelist_error` - error types
//! - `novelist_config` - layered TOML configuration
//! - `novelist_storage` - JSON file storage
//! - `novelist_models` - Gemini driver
//! - `novelist_pipeline` - agents, prompts and the end-to-end pipeline
//!
//! This crate (`novelist`) re-exports everything for convenience and ships
//! the `novelist` binary.

pub use novelist_config::*;
pub use novelist_core::*;
pub use novelist_error::*;
pub use novelist_interface::*;
pub use novelist_models::*;
pub use novelist_pipeline::*;
pub use novelist_storage::*;
