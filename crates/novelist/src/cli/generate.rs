//! End-to-end generation command handler.

use super::session::{Session, require_text};
use novelist_error::{NovelistResult, PipelineError, PipelineErrorKind};
use novelist_pipeline::ROLE_BRIEFS;
use std::path::Path;

/// Where the story description comes from.
#[derive(Debug, Clone)]
pub enum DescriptionSource<'a> {
    /// Given inline with `-d`
    Inline(&'a str),
    /// Read from a file with `-i`
    File(&'a Path),
}

impl DescriptionSource<'_> {
    /// The description text, trimmed and checked for emptiness.
    pub async fn read(&self) -> NovelistResult<String> {
        let text = match self {
            DescriptionSource::Inline(text) => text.to_string(),
            DescriptionSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                PipelineError::new(PipelineErrorKind::InputRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?,
        };
        Ok(require_text(&text)?.to_string())
    }
}

/// Run the whole pipeline and print where the novel was written.
#[tracing::instrument(skip(session, source))]
pub async fn generate_novel(
    session: &Session,
    source: DescriptionSource<'_>,
    characters: Option<usize>,
    chapters: Option<usize>,
) -> NovelistResult<()> {
    let description = source.read().await?;

    let mut settings = session.config().pipeline.clone();
    if let Some(count) = characters {
        if count > ROLE_BRIEFS.len() {
            tracing::warn!(
                requested = count,
                max = ROLE_BRIEFS.len(),
                "Character count capped at the number of role briefs"
            );
        }
        settings.characters = count;
    }
    if let Some(count) = chapters {
        settings.chapters = count;
    }

    let pipeline = session.pipeline_with(settings)?;
    let report = pipeline.generate_novel(&description).await?;

    println!("World:      {} ({})", report.world_name, report.world_id);
    println!("Characters: {}", report.character_ids.len());
    println!("Plot:       {} ({})", report.plot_title, report.plot_id);
    for chapter in &report.chapters {
        println!(
            "  Chapter {}: {} ({} characters) -> {}",
            chapter.index + 1,
            chapter.title,
            chapter.word_count,
            chapter.file.display()
        );
    }
    println!("Novel:      {}", report.complete_file.display());
    Ok(())
}
