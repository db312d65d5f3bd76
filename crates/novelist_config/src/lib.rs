//! Layered configuration for Novelist.
//!
//! Configuration is TOML, merged from (lowest to highest precedence):
//! 1. bundled defaults (`novelist.toml` shipped with the crate)
//! 2. `~/.config/novelist/novelist.toml`
//! 3. `./novelist.toml`
//! 4. a file given explicitly, e.g. with `--config`
//!
//! ```no_run
//! use novelist_config::NovelistConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NovelistConfig::load()?;
//! println!("writing in {}", config.pipeline.language);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod settings;

pub use config::NovelistConfig;
pub use settings::{API_KEY_VAR, GeminiSettings, PipelineSettings, StorageSettings};
