//! Character command handlers.

use super::commands::CharacterCommands;
use super::output::{print_json, print_summaries};
use super::session::{Session, require_text};
use super::world::delete;
use novelist_core::{Character, CharacterAspect, World};
use novelist_error::NovelistResult;
use novelist_storage::Category;

/// Handle character commands.
pub async fn handle_character_command(
    session: &Session,
    cmd: CharacterCommands,
) -> NovelistResult<()> {
    match cmd {
        CharacterCommands::Create { world, description } => {
            create_character(session, &world, &description).await
        }
        CharacterCommands::List { world } => {
            let summaries = match world {
                Some(world_id) => {
                    session
                        .storage()
                        .list_by_world(Category::Characters, &world_id)
                        .await?
                }
                None => session.storage().list(Category::Characters).await?,
            };
            print_summaries("characters", &summaries);
            Ok(())
        }
        CharacterCommands::Show { id } => print_json(
            &session
                .storage()
                .load_value(Category::Characters, &id)
                .await?,
        ),
        CharacterCommands::Enhance { id, aspect } => enhance_character(session, &id, aspect).await,
        CharacterCommands::Delete { id } => delete(session, Category::Characters, &id).await,
    }
}

async fn create_character(session: &Session, world_id: &str, description: &str) -> NovelistResult<()> {
    let description = require_text(description)?;
    let world: World = session.load(Category::Worlds, world_id).await?;
    let pipeline = session.pipeline()?;

    let character = pipeline
        .character_creator()
        .create_character(&world, description)
        .await?;
    session
        .storage()
        .save(Category::Characters, &character.id.to_string(), &character)
        .await?;

    println!(
        "Created character '{}' ({}) in world '{}'",
        character.name, character.id, world.name
    );
    print_json(&character)
}

async fn enhance_character(
    session: &Session,
    id: &str,
    aspect: CharacterAspect,
) -> NovelistResult<()> {
    let character: Character = session.load(Category::Characters, id).await?;
    let world: World = session
        .load(Category::Worlds, &character.world_id.to_string())
        .await?;
    let pipeline = session.pipeline()?;

    let enhanced = pipeline
        .character_creator()
        .enhance_character(&character, &world, aspect)
        .await?;
    if enhanced == character {
        println!("The model returned no usable {}; character unchanged", aspect);
        return Ok(());
    }
    session
        .storage()
        .save(Category::Characters, id, &enhanced)
        .await?;

    println!("Enhanced {} of '{}'", aspect, enhanced.name);
    print_json(&enhanced)
}
