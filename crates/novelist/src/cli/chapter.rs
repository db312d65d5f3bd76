//! Chapter command handlers.

use super::commands::ChapterCommands;
use super::output::print_json;
use super::session::{Session, chapter_index, require_text};
use novelist_core::{ChapterContent, Plot};
use novelist_error::NovelistResult;
use novelist_storage::Category;

/// Handle chapter commands.
pub async fn handle_chapter_command(session: &Session, cmd: ChapterCommands) -> NovelistResult<()> {
    match cmd {
        ChapterCommands::Write { plot, chapter } => write_chapter(session, &plot, chapter).await,
        ChapterCommands::Scene {
            plot,
            chapter,
            description,
        } => write_scene(session, &plot, chapter, &description).await,
        ChapterCommands::Refine {
            plot,
            chapter,
            instruction,
        } => refine_chapter(session, &plot, chapter, &instruction).await,
        ChapterCommands::Export { plot } => {
            let plot: Plot = session.load(Category::Plots, &plot).await?;
            let path = session.exporter().export_novel(&plot).await?;
            println!("Exported '{}' to {}", plot.title, path.display());
            Ok(())
        }
    }
}

async fn write_chapter(session: &Session, plot_id: &str, number: usize) -> NovelistResult<()> {
    let plot: Plot = session.load(Category::Plots, plot_id).await?;
    let index = chapter_index(number, plot.chapters.len(), false)?;
    let pipeline = session.pipeline()?;
    let (world, characters) = pipeline.load_cast(&plot).await?;

    let chapter = pipeline
        .content_creator()
        .create_chapter_content(&plot, &world, &characters, index)
        .await?;
    session
        .storage()
        .save(Category::Chapters, &chapter.id, &chapter)
        .await?;
    let path = pipeline.exporter().export_chapter(&plot, &chapter).await?;

    println!(
        "Wrote chapter {} '{}' ({} characters) to {}",
        number,
        chapter.title,
        chapter.word_count,
        path.display()
    );
    Ok(())
}

async fn write_scene(
    session: &Session,
    plot_id: &str,
    number: usize,
    description: &str,
) -> NovelistResult<()> {
    let description = require_text(description)?;
    let plot: Plot = session.load(Category::Plots, plot_id).await?;
    let index = chapter_index(number, plot.chapters.len(), false)?;
    let pipeline = session.pipeline()?;
    let (world, characters) = pipeline.load_cast(&plot).await?;

    let scene = pipeline
        .content_creator()
        .create_scene_content(&plot, &world, &characters, index, description)
        .await?;
    print_json(&scene)
}

async fn refine_chapter(
    session: &Session,
    plot_id: &str,
    number: usize,
    instruction: &str,
) -> NovelistResult<()> {
    let instruction = require_text(instruction)?;
    let plot: Plot = session.load(Category::Plots, plot_id).await?;
    let index = chapter_index(number, plot.chapters.len(), false)?;
    let current: ChapterContent = session
        .load(Category::Chapters, &ChapterContent::record_id(plot.id, index))
        .await?;
    let pipeline = session.pipeline()?;
    let (world, characters) = pipeline.load_cast(&plot).await?;

    let refined = pipeline
        .content_creator()
        .refine_content(&plot, &world, &characters, &current, instruction)
        .await?;
    session
        .storage()
        .save(Category::Chapters, &refined.id, &refined)
        .await?;
    let path = pipeline.exporter().export_chapter(&plot, &refined).await?;

    println!(
        "Refined chapter {} '{}' ({} -> {} characters), written to {}",
        number,
        refined.title,
        current.word_count,
        refined.word_count,
        path.display()
    );
    Ok(())
}
