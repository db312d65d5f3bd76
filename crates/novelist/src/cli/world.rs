//! World command handlers.

use super::commands::WorldCommands;
use super::output::{print_json, print_summaries};
use super::session::{Session, require_text};
use novelist_core::{World, WorldAspect};
use novelist_error::NovelistResult;
use novelist_storage::Category;

/// Handle world commands.
pub async fn handle_world_command(session: &Session, cmd: WorldCommands) -> NovelistResult<()> {
    match cmd {
        WorldCommands::Create { description } => create_world(session, &description).await,
        WorldCommands::List => {
            print_summaries("worlds", &session.storage().list(Category::Worlds).await?);
            Ok(())
        }
        WorldCommands::Show { id } => {
            print_json(&session.storage().load_value(Category::Worlds, &id).await?)
        }
        WorldCommands::Extend { id, aspect } => extend_world(session, &id, aspect).await,
        WorldCommands::Delete { id } => delete(session, Category::Worlds, &id).await,
    }
}

async fn create_world(session: &Session, description: &str) -> NovelistResult<()> {
    let description = require_text(description)?;
    let pipeline = session.pipeline()?;

    let world = pipeline.world_builder().create_world(description).await?;
    session
        .storage()
        .save(Category::Worlds, &world.id.to_string(), &world)
        .await?;

    println!("Created world '{}' ({})", world.name, world.id);
    print_json(&world)
}

async fn extend_world(session: &Session, id: &str, aspect: WorldAspect) -> NovelistResult<()> {
    let world: World = session.load(Category::Worlds, id).await?;
    let pipeline = session.pipeline()?;

    let extended = pipeline.world_builder().extend_world(&world, aspect).await?;
    if extended == world {
        println!("The model returned no usable {}; world unchanged", aspect);
        return Ok(());
    }
    session.storage().save(Category::Worlds, id, &extended).await?;

    println!("Extended {} of world '{}'", aspect, extended.name);
    print_json(&extended)
}

/// Delete a record, reporting whether it existed.
pub async fn delete(session: &Session, category: Category, id: &str) -> NovelistResult<()> {
    if session.storage().delete(category, id).await? {
        println!("Deleted {}/{}", category, id);
    } else {
        println!("No record {}/{}", category, id);
    }
    Ok(())
}
