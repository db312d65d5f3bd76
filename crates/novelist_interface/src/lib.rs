//! Trait definitions for the Novelist generation pipeline.
//!
//! [`NovelistDriver`] is the single seam between the pipeline and a
//! language model. The Gemini client implements it in production and test
//! suites implement it with scripted responses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::NovelistDriver;
