//! World, character, plot and chapter generation for Novelist.
//!
//! The pipeline turns one free-form description into a short novel:
//!
//! 1. [`WorldBuilder`] creates a [`World`](novelist_core::World)
//! 2. [`CharacterCreator`] creates a cast from fixed role briefs
//! 3. [`PlotDesigner`] outlines a plot with chapters
//! 4. [`ContentCreator`] writes the chapter prose
//!
//! [`NovelPipeline`] runs the stages in order, stores every record with
//! [`JsonStorage`](novelist_storage::JsonStorage) and writes text exports
//! through an [`Exporter`].
//! Model answers are parsed leniently (see [`parse_object`]) so a malformed
//! response degrades to a default record instead of failing the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use novelist_config::NovelistConfig;
//! use novelist_models::GeminiClient;
//! use novelist_pipeline::NovelPipeline;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NovelistConfig::load()?;
//! let driver = Arc::new(GeminiClient::from_settings(&config.gemini)?);
//! let pipeline = NovelPipeline::from_config(driver, &config)?;
//!
//! let report = pipeline.generate_novel("Pirates racing a rising sea").await?;
//! println!("Wrote {} chapters", report.chapters.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agents;
mod export;
mod extraction;
mod pipeline;
mod prompts;

pub use agents::{CharacterCreator, ContentCreator, PlotDesigner, WorldBuilder};
pub use export::{Exporter, chapter_file_name, complete_file_name, render_novel, sanitise_filename};
pub use extraction::{extract_json, parse_json, parse_object, repair_json};
pub use pipeline::{ChapterReport, NovelPipeline, NovelReport, ROLE_BRIEFS};
pub use prompts::{CHARACTER_DESIGNER, EDITOR, NOVELIST, PLOT_DESIGNER, Prompts, WORLD_DESIGNER};
