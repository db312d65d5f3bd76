//! Plain-text exports of generated novels.

use novelist_core::{ChapterContent, Character, Plot, World};
use novelist_error::{NovelistResult, PipelineError, PipelineErrorKind};
use novelist_storage::{Category, JsonStorage};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Characters that are unsafe in file names on common platforms.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a title safe to use as a file name.
///
/// Path separators, reserved and control characters become `_`; leading and
/// trailing whitespace and dots are dropped.
///
/// ```
/// use novelist_pipeline::sanitise_filename;
///
/// assert_eq!(sanitise_filename("Ebb/Flow: Part 1?"), "Ebb_Flow_ Part 1_");
/// assert_eq!(sanitise_filename("../.."), "_");
/// assert_eq!(sanitise_filename("  "), "untitled");
/// ```
pub fn sanitise_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name for one exported chapter.
pub fn chapter_file_name(plot_title: &str, chapter_title: &str) -> String {
    format!(
        "{}.txt",
        sanitise_filename(&format!("{}_{}", plot_title, chapter_title))
    )
}

/// File name for the whole exported novel.
pub fn complete_file_name(plot_title: &str) -> String {
    format!("{}_complete.txt", sanitise_filename(plot_title))
}

/// The whole novel as one markdown-flavoured text.
pub fn render_novel(
    world: &World,
    characters: &[Character],
    plot: &Plot,
    chapters: &[ChapterContent],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", plot.title);
    let _ = writeln!(out, "## World: {}\n", world.name);
    let _ = writeln!(out, "{}\n", world.description);

    out.push_str("## Characters\n\n");
    for character in characters {
        let _ = writeln!(
            out,
            "- {}: {}",
            character.name,
            character.role().unwrap_or_default()
        );
    }
    out.push('\n');

    out.push_str("## Synopsis\n\n");
    let _ = writeln!(out, "{}\n", plot.background);

    for chapter in chapters {
        let _ = writeln!(out, "## {}\n", chapter.title);
        let _ = writeln!(out, "{}\n", chapter.content);
    }
    out
}

/// Writes stored records out as text files.
///
/// Needs no model access, so stored novels can be re-exported without an
/// API key.
#[derive(Debug, Clone)]
pub struct Exporter {
    storage: JsonStorage,
    output_dir: PathBuf,
}

impl Exporter {
    /// Export from `storage` into `output_dir`.
    pub fn new(storage: JsonStorage, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            output_dir: output_dir.into(),
        }
    }

    /// The record store.
    pub fn storage(&self) -> &JsonStorage {
        &self.storage
    }

    /// Directory text exports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one chapter to `{output}/{plot title}_{chapter title}.txt`.
    pub async fn export_chapter(
        &self,
        plot: &Plot,
        chapter: &ChapterContent,
    ) -> NovelistResult<PathBuf> {
        let path = self
            .output_dir
            .join(chapter_file_name(&plot.title, &chapter.title));
        write_text(&path, &chapter.to_text()).await?;
        tracing::info!(path = %path.display(), "Chapter exported");
        Ok(path)
    }

    /// Load the world and characters a plot refers to.
    ///
    /// Characters that are no longer stored are skipped with a warning.
    ///
    /// # Errors
    ///
    /// `MissingDependency` when the plot's world is not stored.
    pub async fn load_cast(&self, plot: &Plot) -> NovelistResult<(World, Vec<Character>)> {
        let world_id = plot.world_id.to_string();
        if !self.storage.exists(Category::Worlds, &world_id).await? {
            return Err(PipelineError::new(PipelineErrorKind::MissingDependency(format!(
                "world {} of plot {}",
                world_id, plot.id
            )))
            .into());
        }
        let world: World = self.storage.load(Category::Worlds, &world_id).await?;

        let mut characters: Vec<Character> = Vec::with_capacity(plot.character_ids.len());
        for id in &plot.character_ids {
            let id = id.to_string();
            if self.storage.exists(Category::Characters, &id).await? {
                characters.push(self.storage.load(Category::Characters, &id).await?);
            } else {
                tracing::warn!(character_id = %id, plot_id = %plot.id, "Plot character not found, skipping");
            }
        }
        Ok((world, characters))
    }

    /// Stored chapters of a plot, in outline order. Unwritten chapters are
    /// left out.
    pub async fn stored_chapters(&self, plot: &Plot) -> NovelistResult<Vec<ChapterContent>> {
        let mut chapters = Vec::new();
        for index in 0..plot.chapters.len() {
            let id = ChapterContent::record_id(plot.id, index);
            if self.storage.exists(Category::Chapters, &id).await? {
                chapters.push(self.storage.load::<ChapterContent>(Category::Chapters, &id).await?);
            }
        }
        Ok(chapters)
    }

    /// Write the complete novel to `{output}/{plot title}_complete.txt`.
    pub async fn write_novel(
        &self,
        world: &World,
        characters: &[Character],
        plot: &Plot,
        chapters: &[ChapterContent],
    ) -> NovelistResult<PathBuf> {
        let path = self.output_dir.join(complete_file_name(&plot.title));
        write_text(&path, &render_novel(world, characters, plot, chapters)).await?;
        tracing::info!(path = %path.display(), chapters = chapters.len(), "Novel exported");
        Ok(path)
    }

    /// Rebuild `{output}/{plot title}_complete.txt` from stored records.
    ///
    /// # Errors
    ///
    /// `MissingDependency` when the world is gone, `NoChapters` when no
    /// chapter of the plot has been written.
    #[tracing::instrument(skip(self, plot), fields(plot_id = %plot.id))]
    pub async fn export_novel(&self, plot: &Plot) -> NovelistResult<PathBuf> {
        let (world, characters) = self.load_cast(plot).await?;
        let chapters = self.stored_chapters(plot).await?;
        if chapters.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::NoChapters(plot.title.clone())).into());
        }
        self.write_novel(&world, &characters, plot, &chapters).await
    }
}

/// Write `contents` to `path`, creating the parent directory.
async fn write_text(path: &Path, contents: &str) -> NovelistResult<()> {
    let output_write = |e: std::io::Error| {
        PipelineError::new(PipelineErrorKind::OutputWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(output_write)?;
    }
    tokio::fs::write(path, contents).await.map_err(output_write)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote text file");
    Ok(())
}
