//! World creation and extension.

use super::{aspect_value, complete};
use crate::parse_object;
use crate::prompts::{Prompts, WORLD_DESIGNER};
use novelist_core::fields::truncate_chars;
use novelist_core::{World, WorldAspect};
use novelist_error::NovelistResult;
use novelist_interface::NovelistDriver;
use std::sync::Arc;

/// Longest raw response kept as a fallback world background.
const FALLBACK_BACKGROUND_CHARS: usize = 1000;

/// Generates [`World`] records.
///
/// # Example
///
/// ```rust,ignore
/// use novelist_pipeline::{Prompts, WorldBuilder};
/// use std::sync::Arc;
///
/// let builder = WorldBuilder::new(Arc::new(driver), Prompts::new("English"));
/// let world = builder.create_world("An archipelago of floating islands").await?;
/// ```
pub struct WorldBuilder<D: ?Sized> {
    driver: Arc<D>,
    prompts: Prompts,
}

impl<D: NovelistDriver + ?Sized> WorldBuilder<D> {
    /// Create a builder over `driver`.
    pub fn new(driver: Arc<D>, prompts: Prompts) -> Self {
        Self { driver, prompts }
    }

    /// Create a world from a free-form description.
    ///
    /// When the response holds no JSON object the world is named
    /// [`World::UNTITLED`] and the start of the raw response becomes its
    /// background.
    #[tracing::instrument(skip(self, description), fields(description_len = description.len()))]
    pub async fn create_world(&self, description: &str) -> NovelistResult<World> {
        let prompt = self.prompts.world(description);
        let response = complete(&*self.driver, WORLD_DESIGNER, prompt).await?;

        let world = match parse_object(&response) {
            Some(data) => World::from_generated(&data, description),
            None => {
                tracing::warn!(
                    response_length = response.len(),
                    "World response was not JSON, using fallback world"
                );
                let mut world = World::new(World::UNTITLED, description);
                world.background = truncate_chars(&response, FALLBACK_BACKGROUND_CHARS);
                world
            }
        };

        tracing::info!(world_id = %world.id, name = %world.name, "World created");
        Ok(world)
    }

    /// Regenerate one aspect of `world`.
    ///
    /// The returned world equals the input when the response carries no
    /// value for the aspect.
    #[tracing::instrument(skip(self, world), fields(world_id = %world.id, aspect = %aspect))]
    pub async fn extend_world(&self, world: &World, aspect: WorldAspect) -> NovelistResult<World> {
        let prompt = self.prompts.world_extension(world, aspect);
        let response = complete(&*self.driver, WORLD_DESIGNER, prompt).await?;

        let mut extended = world.clone();
        match aspect_value(&response, aspect.as_str(), aspect.label()) {
            Some(value) => {
                extended.apply_aspect(aspect, &value);
                tracing::info!("World aspect extended");
            }
            None => tracing::warn!("Extension response had no value for the aspect, world unchanged"),
        }
        Ok(extended)
    }
}
