//! Character creation and enhancement.

use super::{aspect_value, complete};
use crate::parse_object;
use crate::prompts::{CHARACTER_DESIGNER, Prompts};
use novelist_core::{Character, CharacterAspect, World};
use novelist_error::NovelistResult;
use novelist_interface::NovelistDriver;
use std::sync::Arc;

/// Generates [`Character`] records tied to a world.
pub struct CharacterCreator<D: ?Sized> {
    driver: Arc<D>,
    prompts: Prompts,
}

impl<D: NovelistDriver + ?Sized> CharacterCreator<D> {
    /// Create a character creator over `driver`.
    pub fn new(driver: Arc<D>, prompts: Prompts) -> Self {
        Self { driver, prompts }
    }

    /// Create a character for `world` from a brief.
    ///
    /// An unparsable response yields [`Character::UNNAMED`] with the brief
    /// as background.
    #[tracing::instrument(skip(self, world, description), fields(world_id = %world.id))]
    pub async fn create_character(
        &self,
        world: &World,
        description: &str,
    ) -> NovelistResult<Character> {
        let prompt = self.prompts.character(world, description);
        let response = complete(&*self.driver, CHARACTER_DESIGNER, prompt).await?;

        let character = match parse_object(&response) {
            Some(data) => Character::from_generated(&data, world.id),
            None => {
                tracing::warn!(
                    response_length = response.len(),
                    "Character response was not JSON, using fallback character"
                );
                let mut character = Character::new(world.id, Character::UNNAMED);
                character.background = description.to_string();
                character
            }
        };

        tracing::info!(character_id = %character.id, name = %character.name, "Character created");
        Ok(character)
    }

    /// Regenerate one aspect of `character`.
    #[tracing::instrument(skip(self, character, world), fields(character_id = %character.id, aspect = %aspect))]
    pub async fn enhance_character(
        &self,
        character: &Character,
        world: &World,
        aspect: CharacterAspect,
    ) -> NovelistResult<Character> {
        let prompt = self.prompts.character_enhancement(character, world, aspect);
        let response = complete(&*self.driver, CHARACTER_DESIGNER, prompt).await?;

        let mut enhanced = character.clone();
        match aspect_value(&response, aspect.as_str(), aspect.label()) {
            Some(value) => {
                enhanced.apply_aspect(aspect, &value);
                tracing::info!("Character aspect enhanced");
            }
            None => tracing::warn!(
                "Enhancement response had no value for the aspect, character unchanged"
            ),
        }
        Ok(enhanced)
    }
}
