//! Plot command handlers.

use super::commands::PlotCommands;
use super::output::{print_json, print_summaries};
use super::session::{Session, chapter_index, require_text};
use super::world::delete;
use novelist_core::{Character, Plot, PlotAspect, World};
use novelist_error::NovelistResult;
use novelist_storage::Category;

/// Handle plot commands.
pub async fn handle_plot_command(session: &Session, cmd: PlotCommands) -> NovelistResult<()> {
    match cmd {
        PlotCommands::Create {
            world,
            characters,
            description,
        } => create_plot(session, &world, &characters, &description).await,
        PlotCommands::List { world } => {
            let summaries = match world {
                Some(world_id) => {
                    session
                        .storage()
                        .list_by_world(Category::Plots, &world_id)
                        .await?
                }
                None => session.storage().list(Category::Plots).await?,
            };
            print_summaries("plots", &summaries);
            Ok(())
        }
        PlotCommands::Show { id } => {
            print_json(&session.storage().load_value(Category::Plots, &id).await?)
        }
        PlotCommands::Outline { id, chapter } => outline_chapter(session, &id, chapter).await,
        PlotCommands::Extend { id, aspect } => extend_plot(session, &id, aspect).await,
        PlotCommands::Delete { id } => delete(session, Category::Plots, &id).await,
    }
}

/// Characters named on the command line, or every character of the world.
async fn select_cast(
    session: &Session,
    world_id: &str,
    ids: &[String],
) -> NovelistResult<Vec<Character>> {
    let ids: Vec<String> = if ids.is_empty() {
        session
            .storage()
            .list_by_world(Category::Characters, world_id)
            .await?
            .into_iter()
            .map(|summary| summary.id)
            .collect()
    } else {
        ids.iter().map(|id| id.trim().to_string()).collect()
    };

    let mut characters: Vec<Character> = Vec::with_capacity(ids.len());
    for id in &ids {
        characters.push(session.load(Category::Characters, id).await?);
    }
    Ok(characters)
}

async fn create_plot(
    session: &Session,
    world_id: &str,
    character_ids: &[String],
    description: &str,
) -> NovelistResult<()> {
    let description = require_text(description)?;
    let world: World = session.load(Category::Worlds, world_id).await?;
    let characters = select_cast(session, world_id, character_ids).await?;
    if characters.is_empty() {
        tracing::warn!(world = %world.name, "Designing a plot without characters");
    }
    let pipeline = session.pipeline()?;

    let plot = pipeline
        .plot_designer()
        .create_plot(&world, &characters, description)
        .await?;
    session
        .storage()
        .save(Category::Plots, &plot.id.to_string(), &plot)
        .await?;

    println!(
        "Created plot '{}' ({}) with {} chapters",
        plot.title,
        plot.id,
        plot.chapters.len()
    );
    print_json(&plot)
}

async fn outline_chapter(session: &Session, id: &str, number: usize) -> NovelistResult<()> {
    let mut plot: Plot = session.load(Category::Plots, id).await?;
    let index = chapter_index(number, plot.chapters.len(), true)?;
    let pipeline = session.pipeline()?;

    let outline = pipeline
        .plot_designer()
        .generate_chapter_outline(&plot, index)
        .await?;
    plot.set_chapter(index, outline.clone());
    session.storage().save(Category::Plots, id, &plot).await?;

    println!("Outlined chapter {} of '{}'", number, plot.title);
    print_json(&outline)
}

async fn extend_plot(session: &Session, id: &str, aspect: PlotAspect) -> NovelistResult<()> {
    let plot: Plot = session.load(Category::Plots, id).await?;
    let pipeline = session.pipeline()?;
    let (world, characters) = pipeline.load_cast(&plot).await?;

    let extended = pipeline
        .plot_designer()
        .extend_plot(&plot, &world, &characters, aspect)
        .await?;
    if extended == plot {
        println!("The model returned no usable {}; plot unchanged", aspect);
        return Ok(());
    }
    session.storage().save(Category::Plots, id, &extended).await?;

    println!("Extended {} of '{}'", aspect, extended.title);
    print_json(&extended)
}
