//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the novelist binary.

mod chapter;
mod character;
mod commands;
mod generate;
mod output;
mod plot;
mod records;
mod session;
mod world;

pub use chapter::handle_chapter_command;
pub use character::handle_character_command;
pub use commands::{Cli, Commands};
pub use generate::{DescriptionSource, generate_novel};
pub use plot::handle_plot_command;
pub use records::{query_record, update_record};
pub use session::Session;
pub use world::handle_world_command;
