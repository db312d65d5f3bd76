//! Generated prose for chapters and scenes.

use crate::ChapterOutline;
use crate::fields::word_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prose written for one chapter of a plot.
///
/// Stored under the key `{plot_id}_{index}`, so regenerating a chapter
/// overwrites the previous draft.
///
/// # Examples
///
/// ```
/// use novelist_core::{ChapterContent, ChapterOutline};
/// use uuid::Uuid;
///
/// let plot_id = Uuid::new_v4();
/// let outline = ChapterOutline::new("Landfall", "The crew reaches the island");
/// let chapter = ChapterContent::new(plot_id, 0, &outline, "海风吹过。");
///
/// assert_eq!(chapter.id, format!("{}_0", plot_id));
/// assert_eq!(chapter.word_count, 5);
/// assert!(chapter.refined_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterContent {
    /// Storage key, `{plot_id}_{index}`
    pub id: String,
    /// Plot the chapter belongs to
    pub plot_id: Uuid,
    /// Zero-based chapter index within the plot
    pub index: usize,
    /// Chapter title, copied from the outline
    pub title: String,
    /// The prose
    pub content: String,
    /// Length of `content` in characters
    pub word_count: usize,
    /// Chapter summary, copied from the outline
    #[serde(default)]
    pub summary: String,
    /// When the prose was first generated
    pub generated_at: DateTime<Utc>,
    /// When the prose was last revised
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined_at: Option<DateTime<Utc>>,
}

impl ChapterContent {
    /// Storage key for the chapter at `index` of `plot_id`.
    pub fn record_id(plot_id: Uuid, index: usize) -> String {
        format!("{}_{}", plot_id, index)
    }

    /// Freshly generated chapter prose.
    pub fn new(
        plot_id: Uuid,
        index: usize,
        outline: &ChapterOutline,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: Self::record_id(plot_id, index),
            plot_id,
            index,
            title: outline.title.clone(),
            word_count: word_count(&content),
            content,
            summary: outline.summary.clone(),
            generated_at: Utc::now(),
            refined_at: None,
        }
    }

    /// A revision of this chapter carrying new prose.
    pub fn refined(&self, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            word_count: word_count(&content),
            content,
            refined_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// The chapter as a standalone text file body.
    pub fn to_text(&self) -> String {
        format!("# {}\n\n{}", self.title, self.content)
    }
}

/// Prose written for one ad-hoc scene inside a chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneContent {
    /// Zero-based index of the chapter the scene belongs to
    pub chapter_index: usize,
    /// The scene brief the prose was written from
    pub description: String,
    /// The prose
    pub content: String,
    /// Length of `content` in characters
    pub word_count: usize,
    /// Generation time
    pub generated_at: DateTime<Utc>,
}

impl SceneContent {
    /// Freshly generated scene prose.
    pub fn new(
        chapter_index: usize,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            chapter_index,
            description: description.into(),
            word_count: word_count(&content),
            content,
            generated_at: Utc::now(),
        }
    }
}
