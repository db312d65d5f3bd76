//! Plots, chapter outlines and plot extension.

use super::{aspect_value, complete};
use crate::parse_object;
use crate::prompts::{PLOT_DESIGNER, Prompts};
use novelist_core::fields::truncate_chars;
use novelist_core::{Character, ChapterOutline, Plot, PlotAspect, World};
use novelist_error::NovelistResult;
use novelist_interface::NovelistDriver;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Longest raw response kept as a fallback chapter summary.
const FALLBACK_SUMMARY_CHARS: usize = 500;

/// Generates [`Plot`] records and chapter outlines.
pub struct PlotDesigner<D: ?Sized> {
    driver: Arc<D>,
    prompts: Prompts,
}

impl<D: NovelistDriver + ?Sized> PlotDesigner<D> {
    /// Create a plot designer over `driver`.
    pub fn new(driver: Arc<D>, prompts: Prompts) -> Self {
        Self { driver, prompts }
    }

    /// Create a plot for `world` starring `characters`.
    ///
    /// An unparsable response yields [`Plot::UNTITLED`] whose background,
    /// main plot and single chapter summary are the brief itself.
    #[tracing::instrument(
        skip(self, world, characters, description),
        fields(world_id = %world.id, characters = characters.len())
    )]
    pub async fn create_plot(
        &self,
        world: &World,
        characters: &[Character],
        description: &str,
    ) -> NovelistResult<Plot> {
        let prompt = self.prompts.plot(world, characters, description);
        let response = complete(&*self.driver, PLOT_DESIGNER, prompt).await?;
        let character_ids = characters.iter().map(|c| c.id).collect();

        let plot = match parse_object(&response) {
            Some(data) => Plot::from_generated(&data, world.id, character_ids, description),
            None => {
                tracing::warn!(
                    response_length = response.len(),
                    "Plot response was not JSON, using fallback plot"
                );
                let mut plot =
                    Plot::from_generated(&Map::new(), world.id, character_ids, description);
                plot.background = description.to_string();
                plot.main_plot = Value::String(description.to_string());
                plot
            }
        };

        tracing::info!(
            plot_id = %plot.id,
            title = %plot.title,
            chapters = plot.chapters.len(),
            "Plot created"
        );
        Ok(plot)
    }

    /// Generate a detailed outline for the chapter at zero-based `index`.
    ///
    /// `index` may equal the chapter count to outline a new chapter. The
    /// plot itself is not modified; see [`Plot::set_chapter`].
    #[tracing::instrument(skip(self, plot), fields(plot_id = %plot.id))]
    pub async fn generate_chapter_outline(
        &self,
        plot: &Plot,
        index: usize,
    ) -> NovelistResult<ChapterOutline> {
        let prompt = self.prompts.chapter_outline(plot, index);
        let response = complete(&*self.driver, PLOT_DESIGNER, prompt).await?;

        let outline = match parse_object(&response) {
            Some(data) => ChapterOutline::from_map(&data, index),
            None => {
                tracing::warn!("Outline response was not JSON, using raw text as summary");
                ChapterOutline::new(
                    ChapterOutline::default_title(index),
                    truncate_chars(&response, FALLBACK_SUMMARY_CHARS),
                )
            }
        };

        tracing::info!(title = %outline.title, scenes = outline.scenes.len(), "Chapter outlined");
        Ok(outline)
    }

    /// Regenerate one aspect of `plot`.
    #[tracing::instrument(skip(self, plot, world, characters), fields(plot_id = %plot.id, aspect = %aspect))]
    pub async fn extend_plot(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        aspect: PlotAspect,
    ) -> NovelistResult<Plot> {
        let prompt = self.prompts.plot_extension(plot, world, characters, aspect);
        let response = complete(&*self.driver, PLOT_DESIGNER, prompt).await?;

        let mut extended = plot.clone();
        match aspect_value(&response, aspect.as_str(), aspect.label()) {
            Some(value) => {
                extended.apply_aspect(aspect, &value);
                tracing::info!("Plot aspect extended");
            }
            None => tracing::warn!("Extension response had no value for the aspect, plot unchanged"),
        }
        Ok(extended)
    }
}
