//! End-to-end novel generation.

use crate::agents::{CharacterCreator, ContentCreator, PlotDesigner, WorldBuilder};
use crate::export::Exporter;
use crate::prompts::Prompts;
use chrono::{DateTime, Utc};
use novelist_config::{NovelistConfig, PipelineSettings};
use novelist_core::{ChapterContent, Character, Plot, World};
use novelist_error::{NovelistResult, PipelineError, PipelineErrorKind};
use novelist_interface::NovelistDriver;
use novelist_storage::{Category, JsonStorage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Character briefs used by [`NovelPipeline::generate_novel`], in order.
pub const ROLE_BRIEFS: [&str; 5] = [
    "character suited to be the protagonist, with unique abilities and background",
    "important supporting character closely tied to the protagonist",
    "interesting supporting character with a vivid personality",
    "character with a mysterious background",
    "powerful and wise character",
];

/// One chapter written during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterReport {
    /// Zero-based chapter index
    pub index: usize,
    /// Chapter title
    pub title: String,
    /// Length of the prose in characters
    pub word_count: usize,
    /// Exported text file
    pub file: PathBuf,
}

/// Outcome of [`NovelPipeline::generate_novel`], stored under `novels/{plot_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelReport {
    /// Generated world
    pub world_id: Uuid,
    /// World name
    pub world_name: String,
    /// Generated characters, in creation order
    pub character_ids: Vec<Uuid>,
    /// Generated plot
    pub plot_id: Uuid,
    /// Plot title
    pub plot_title: String,
    /// Chapters written
    pub chapters: Vec<ChapterReport>,
    /// The complete novel text file
    pub complete_file: PathBuf,
    /// Completion time
    pub generated_at: DateTime<Utc>,
}

/// Drives the world → characters → plot → chapters pipeline and exports
/// the result.
///
/// # Example
///
/// ```rust,ignore
/// use novelist_config::NovelistConfig;
/// use novelist_models::GeminiClient;
/// use novelist_pipeline::NovelPipeline;
/// use std::sync::Arc;
///
/// let config = NovelistConfig::load()?;
/// let driver = Arc::new(GeminiClient::from_settings(&config.gemini)?);
/// let pipeline = NovelPipeline::from_config(driver, &config)?;
/// let report = pipeline.generate_novel("A heist on a sinking island").await?;
/// println!("{}", report.complete_file.display());
/// ```
pub struct NovelPipeline<D: ?Sized> {
    exporter: Exporter,
    settings: PipelineSettings,
    world_builder: WorldBuilder<D>,
    character_creator: CharacterCreator<D>,
    plot_designer: PlotDesigner<D>,
    content_creator: ContentCreator<D>,
}

impl<D: NovelistDriver + ?Sized> NovelPipeline<D> {
    /// Assemble a pipeline from its parts.
    pub fn new(
        driver: Arc<D>,
        storage: JsonStorage,
        output_dir: impl Into<PathBuf>,
        settings: PipelineSettings,
    ) -> Self {
        let prompts = Prompts::new(settings.language.clone());
        Self {
            exporter: Exporter::new(storage, output_dir),
            world_builder: WorldBuilder::new(Arc::clone(&driver), prompts.clone()),
            character_creator: CharacterCreator::new(Arc::clone(&driver), prompts.clone()),
            plot_designer: PlotDesigner::new(Arc::clone(&driver), prompts.clone()),
            content_creator: ContentCreator::new(driver, prompts),
            settings,
        }
    }

    /// Build a pipeline whose storage and exports follow `config`.
    pub fn from_config(driver: Arc<D>, config: &NovelistConfig) -> NovelistResult<Self> {
        let storage = JsonStorage::new(&config.storage.data_dir)?;
        Ok(Self::new(
            driver,
            storage,
            config.storage.output_dir(),
            config.pipeline.clone(),
        ))
    }

    /// The record store.
    pub fn storage(&self) -> &JsonStorage {
        self.exporter.storage()
    }

    /// Directory text exports are written to.
    pub fn output_dir(&self) -> &Path {
        self.exporter.output_dir()
    }

    /// Text exporter over the same store.
    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Run settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// World agent.
    pub fn world_builder(&self) -> &WorldBuilder<D> {
        &self.world_builder
    }

    /// Character agent.
    pub fn character_creator(&self) -> &CharacterCreator<D> {
        &self.character_creator
    }

    /// Plot agent.
    pub fn plot_designer(&self) -> &PlotDesigner<D> {
        &self.plot_designer
    }

    /// Prose agent.
    pub fn content_creator(&self) -> &ContentCreator<D> {
        &self.content_creator
    }

    /// Generate a complete novel from one description.
    ///
    /// World and plot failures abort the run. A failing character or
    /// chapter ends its stage early and keeps what was made so far; the run
    /// only aborts when a stage produced nothing.
    ///
    /// # Errors
    ///
    /// `EmptyDescription`, `NoCharacters`, `NoChapters`, storage errors, or
    /// the driver's error from the world or plot stage.
    #[tracing::instrument(skip(self, description), fields(description_len = description.len()))]
    pub async fn generate_novel(&self, description: &str) -> NovelistResult<NovelReport> {
        let description = description.trim();
        if description.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyDescription).into());
        }

        tracing::info!("Stage 1: creating world");
        let world = self.world_builder.create_world(description).await?;
        self.storage()
            .save(Category::Worlds, &world.id.to_string(), &world)
            .await?;

        tracing::info!(
            requested = self.settings.characters,
            "Stage 2: creating characters"
        );
        let characters = self.create_cast(&world).await;
        if characters.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoCharacters(world.name.clone())).into());
        }

        tracing::info!("Stage 3: designing plot");
        let plot_description = format!(
            "Based on the world '{}' and the characters created for it, create an engaging storyline: {}",
            world.name, description
        );
        let plot = self
            .plot_designer
            .create_plot(&world, &characters, &plot_description)
            .await?;
        self.storage()
            .save(Category::Plots, &plot.id.to_string(), &plot)
            .await?;

        let to_write = self.settings.chapters.min(plot.chapters.len());
        tracing::info!(chapters = to_write, "Stage 4: writing chapters");
        let (chapters, reports) = self.write_chapters(&world, &characters, &plot, to_write).await;
        if chapters.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoChapters(plot.title.clone())).into());
        }

        let complete_file = self
            .exporter
            .write_novel(&world, &characters, &plot, &chapters)
            .await?;

        let report = NovelReport {
            world_id: world.id,
            world_name: world.name.clone(),
            character_ids: characters.iter().map(|c| c.id).collect(),
            plot_id: plot.id,
            plot_title: plot.title.clone(),
            chapters: reports,
            complete_file,
            generated_at: Utc::now(),
        };
        self.storage()
            .save(Category::Novels, &plot.id.to_string(), &report)
            .await?;

        tracing::info!(
            world = %report.world_name,
            characters = report.character_ids.len(),
            title = %report.plot_title,
            chapters = report.chapters.len(),
            output = %report.complete_file.display(),
            "Novel generated"
        );
        Ok(report)
    }

    /// Create and save characters from the role briefs until one fails.
    async fn create_cast(&self, world: &World) -> Vec<Character> {
        let mut characters = Vec::new();
        for (i, brief) in ROLE_BRIEFS.iter().take(self.settings.characters).enumerate() {
            let description = format!("Randomly create a {} who fits this world", brief);
            let created = match self
                .character_creator
                .create_character(world, &description)
                .await
            {
                Ok(character) => self
                    .storage()
                    .save(Category::Characters, &character.id.to_string(), &character)
                    .await
                    .map(|_| character),
                Err(e) => Err(e),
            };

            match created {
                Ok(character) => characters.push(character),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        character = i + 1,
                        kept = characters.len(),
                        "Character creation failed, continuing with the cast so far"
                    );
                    break;
                }
            }
        }
        characters
    }

    /// Write, save and export the first `count` chapters until one fails.
    async fn write_chapters(
        &self,
        world: &World,
        characters: &[Character],
        plot: &Plot,
        count: usize,
    ) -> (Vec<ChapterContent>, Vec<ChapterReport>) {
        let mut chapters = Vec::new();
        let mut reports = Vec::new();

        for index in 0..count {
            if index > 0 && self.settings.chapter_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.settings.chapter_delay_ms)).await;
            }

            match self.write_chapter(world, characters, plot, index).await {
                Ok((chapter, file)) => {
                    reports.push(ChapterReport {
                        index,
                        title: chapter.title.clone(),
                        word_count: chapter.word_count,
                        file,
                    });
                    chapters.push(chapter);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        chapter = index + 1,
                        kept = chapters.len(),
                        "Chapter generation failed, keeping chapters written so far"
                    );
                    break;
                }
            }
        }
        (chapters, reports)
    }

    async fn write_chapter(
        &self,
        world: &World,
        characters: &[Character],
        plot: &Plot,
        index: usize,
    ) -> NovelistResult<(ChapterContent, PathBuf)> {
        let chapter = self
            .content_creator
            .create_chapter_content(plot, world, characters, index)
            .await?;
        self.storage()
            .save(Category::Chapters, &chapter.id, &chapter)
            .await?;
        let file = self.exporter.export_chapter(plot, &chapter).await?;
        Ok((chapter, file))
    }

    /// Load the world and characters a plot refers to.
    pub async fn load_cast(&self, plot: &Plot) -> NovelistResult<(World, Vec<Character>)> {
        self.exporter.load_cast(plot).await
    }

    /// Rebuild the complete novel text from stored chapters.
    pub async fn export_novel(&self, plot: &Plot) -> NovelistResult<PathBuf> {
        self.exporter.export_novel(plot).await
    }
}
