//! Core data types for the Novelist generation pipeline.
//!
//! Two families of types live here:
//! - the provider-neutral LLM request and response types consumed by
//!   [`NovelistDriver`](https://docs.rs/novelist_interface) implementations
//! - the story records (world, characters, plot, chapters) that the
//!   pipeline generates and the storage layer persists as JSON

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod chapter;
mod character;
pub mod fields;
mod input;
mod message;
mod output;
mod plot;
mod request;
mod role;
mod world;

pub use aspect::{CharacterAspect, PlotAspect, WorldAspect};
pub use chapter::{ChapterContent, SceneContent};
pub use character::Character;
pub use input::Input;
pub use message::Message;
pub use output::Output;
pub use plot::{ChapterOutline, Plot, Scene};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use world::World;
