//! Chapter prose, scene prose and revisions.

use super::complete;
use crate::parse_object;
use crate::prompts::{EDITOR, NOVELIST, Prompts};
use novelist_core::{ChapterContent, ChapterOutline, Character, Plot, SceneContent, World};
use novelist_error::{NovelistResult, PipelineError, PipelineErrorKind};
use novelist_interface::NovelistDriver;
use serde_json::Value;
use std::sync::Arc;

/// Writes prose for the chapters of a plot.
pub struct ContentCreator<D: ?Sized> {
    driver: Arc<D>,
    prompts: Prompts,
}

/// The outline at `index`, or `ChapterOutOfRange`.
fn outline_at(plot: &Plot, index: usize) -> NovelistResult<&ChapterOutline> {
    plot.chapter(index).ok_or_else(|| {
        PipelineError::new(PipelineErrorKind::ChapterOutOfRange {
            index,
            len: plot.chapters.len(),
        })
        .into()
    })
}

/// Prose from a response. Models sometimes wrap it as `{"content": "..."}`.
fn prose(response: &str) -> String {
    let wrapped = parse_object(response).and_then(|map| match map.get("content") {
        Some(Value::String(content)) => Some(content.clone()),
        _ => None,
    });
    wrapped.unwrap_or_else(|| response.to_string()).trim().to_string()
}

impl<D: NovelistDriver + ?Sized> ContentCreator<D> {
    /// Create a content creator over `driver`.
    pub fn new(driver: Arc<D>, prompts: Prompts) -> Self {
        Self { driver, prompts }
    }

    /// Write the chapter at zero-based `index` of `plot`.
    ///
    /// # Errors
    ///
    /// `ChapterOutOfRange` when the plot has no chapter at `index`, or the
    /// driver's error.
    #[tracing::instrument(skip(self, plot, world, characters), fields(plot_id = %plot.id))]
    pub async fn create_chapter_content(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        index: usize,
    ) -> NovelistResult<ChapterContent> {
        let outline = outline_at(plot, index)?;
        let prompt = self
            .prompts
            .chapter_content(plot, world, characters, outline, index);
        let response = complete(&*self.driver, NOVELIST, prompt).await?;

        let chapter = ChapterContent::new(plot.id, index, outline, prose(&response));
        tracing::info!(
            title = %chapter.title,
            word_count = chapter.word_count,
            "Chapter written"
        );
        Ok(chapter)
    }

    /// Write one scene of the chapter at `index` from a scene brief.
    #[tracing::instrument(skip(self, plot, world, characters, description), fields(plot_id = %plot.id))]
    pub async fn create_scene_content(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        index: usize,
        description: &str,
    ) -> NovelistResult<SceneContent> {
        let outline = outline_at(plot, index)?;
        let prompt = self
            .prompts
            .scene_content(world, characters, outline, description);
        let response = complete(&*self.driver, NOVELIST, prompt).await?;

        let scene = SceneContent::new(index, description, prose(&response));
        tracing::info!(word_count = scene.word_count, "Scene written");
        Ok(scene)
    }

    /// Revise `current` following `instruction`.
    ///
    /// Returns a new revision with `refined_at` set; `current` is untouched.
    #[tracing::instrument(
        skip(self, plot, world, characters, current, instruction),
        fields(plot_id = %plot.id, index = current.index)
    )]
    pub async fn refine_content(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        current: &ChapterContent,
        instruction: &str,
    ) -> NovelistResult<ChapterContent> {
        let outline = outline_at(plot, current.index)?;
        let prompt = self.prompts.refinement(
            world,
            characters,
            outline,
            &current.content,
            instruction,
        );
        let response = complete(&*self.driver, EDITOR, prompt).await?;

        let refined = current.refined(prose(&response));
        tracing::info!(
            before = current.word_count,
            after = refined.word_count,
            "Chapter refined"
        );
        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_unwraps_content_objects() {
        assert_eq!(prose("{\"content\": \"The tide rose.\"}"), "The tide rose.");
        assert_eq!(prose("  The tide rose.\n"), "The tide rose.");
        // Objects without a string `content` are kept verbatim
        assert_eq!(prose("{\"title\": \"x\"}"), "{\"title\": \"x\"}");
    }
}
