//! Plot outlines and their chapters.

use crate::PlotAspect;
use crate::fields::{item_name, list_field, string_list_field, text_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use uuid::Uuid;

/// One scene planned inside a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// What happens in the scene
    #[serde(default)]
    pub description: String,
    /// Dialogue or action beats to hit
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl Scene {
    /// Map a generated scene. Plain strings become the description.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                description: text_field(map.get("description")),
                key_points: string_list_field(map.get("key_points")),
            },
            other => Self {
                description: text_field(Some(other)),
                key_points: Vec::new(),
            },
        }
    }
}

/// One entry of a plot's chapter outline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChapterOutline {
    /// Chapter title
    pub title: String,
    /// What the chapter covers
    #[serde(default)]
    pub summary: String,
    /// Planned scenes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    /// Emotional development of the main characters
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub character_arcs: Value,
    /// Central conflicts of the chapter
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub conflicts: Value,
    /// Links to the wider story
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub connections: Value,
}

impl ChapterOutline {
    /// A bare outline with a title and summary.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Default title for the chapter at zero-based `index`.
    pub fn default_title(index: usize) -> String {
        format!("Chapter {}", index + 1)
    }

    /// Map a generated chapter entry at zero-based `index`.
    ///
    /// ```
    /// use novelist_core::ChapterOutline;
    /// use serde_json::json;
    ///
    /// let outline = ChapterOutline::from_value(&json!({"summary": "The storm breaks"}), 2);
    /// assert_eq!(outline.title, "Chapter 3");
    /// assert_eq!(outline.summary, "The storm breaks");
    /// ```
    pub fn from_value(value: &Value, index: usize) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map, index),
            other => Self::new(Self::default_title(index), text_field(Some(other))),
        }
    }

    /// Map a generated chapter object at zero-based `index`.
    pub fn from_map(map: &Map<String, Value>, index: usize) -> Self {
        let title = text_field(map.get("title"));
        Self {
            title: if title.trim().is_empty() {
                Self::default_title(index)
            } else {
                title
            },
            summary: text_field(map.get("summary")),
            scenes: list_field(map.get("scenes"))
                .iter()
                .map(Scene::from_value)
                .collect(),
            character_arcs: map.get("character_arcs").cloned().unwrap_or(Value::Null),
            conflicts: map.get("conflicts").cloned().unwrap_or(Value::Null),
            connections: map.get("connections").cloned().unwrap_or(Value::Null),
        }
    }
}

fn outlines_from(value: Option<&Value>) -> Vec<ChapterOutline> {
    list_field(value)
        .iter()
        .enumerate()
        .map(|(i, chapter)| ChapterOutline::from_value(chapter, i))
        .collect()
}

/// A generated plot with its chapter outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Unique identifier, also the storage key
    pub id: Uuid,
    /// World the story takes place in
    pub world_id: Uuid,
    /// Characters the plot was designed around
    #[serde(default)]
    pub character_ids: Vec<Uuid>,
    /// Story title
    pub title: String,
    /// Era and setting of the story
    #[serde(default)]
    pub background: String,
    /// Core storyline, prose or structured
    #[serde(default)]
    pub main_plot: Value,
    /// Key reversals
    #[serde(default)]
    pub turning_points: Vec<Value>,
    /// Chapter outline
    #[serde(default)]
    pub chapters: Vec<ChapterOutline>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Plot {
    /// Title used when the model supplies none.
    pub const UNTITLED: &'static str = "Untitled Plot";

    /// An empty plot with a fresh id.
    pub fn new(world_id: Uuid, character_ids: Vec<Uuid>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            world_id,
            character_ids,
            title: title.into(),
            background: String::new(),
            main_plot: Value::Null,
            turning_points: Vec::new(),
            chapters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a plot from a model's JSON object.
    ///
    /// A plot always has at least one chapter: when the model returns no
    /// usable outline, a single chapter summarised by `description` is used.
    pub fn from_generated(
        data: &Map<String, Value>,
        world_id: Uuid,
        character_ids: Vec<Uuid>,
        description: &str,
    ) -> Self {
        let title = text_field(data.get("title"));
        let title = if title.trim().is_empty() {
            Self::UNTITLED.to_string()
        } else {
            title
        };

        let mut plot = Self::new(world_id, character_ids, title);
        plot.background = text_field(data.get("background"));
        plot.main_plot = data.get("main_plot").cloned().unwrap_or(Value::Null);
        plot.turning_points = list_field(data.get("turning_points"));
        plot.chapters = outlines_from(data.get("chapters"));
        if plot.chapters.is_empty() {
            plot.chapters
                .push(ChapterOutline::new(ChapterOutline::default_title(0), description));
        }
        plot
    }

    /// The outline at zero-based `index`.
    pub fn chapter(&self, index: usize) -> Option<&ChapterOutline> {
        self.chapters.get(index)
    }

    /// Replace the outline at `index`, or append when `index` equals the
    /// chapter count. Returns false when `index` is past the end.
    ///
    /// ```
    /// use novelist_core::{ChapterOutline, Plot};
    /// use uuid::Uuid;
    ///
    /// let mut plot = Plot::new(Uuid::new_v4(), vec![], "Tides");
    /// assert!(plot.set_chapter(0, ChapterOutline::new("Ebb", "")));
    /// assert!(plot.set_chapter(0, ChapterOutline::new("Flood", "")));
    /// assert!(!plot.set_chapter(5, ChapterOutline::new("Lost", "")));
    /// assert_eq!(plot.chapters.len(), 1);
    /// assert_eq!(plot.chapters[0].title, "Flood");
    /// ```
    pub fn set_chapter(&mut self, index: usize, outline: ChapterOutline) -> bool {
        if index < self.chapters.len() {
            self.chapters[index] = outline;
        } else if index == self.chapters.len() {
            self.chapters.push(outline);
        } else {
            return false;
        }
        self.updated_at = Utc::now();
        true
    }

    /// Overwrite one aspect with a generated value.
    pub fn apply_aspect(&mut self, aspect: PlotAspect, value: &Value) {
        let value = Some(value);
        match aspect {
            PlotAspect::Title => self.title = text_field(value),
            PlotAspect::Background => self.background = text_field(value),
            PlotAspect::MainPlot => self.main_plot = value.cloned().unwrap_or(Value::Null),
            PlotAspect::TurningPoints => self.turning_points = list_field(value),
            PlotAspect::Chapters => self.chapters = outlines_from(value),
        }
        self.updated_at = Utc::now();
    }

    /// Plain-text digest used as context in later prompts.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Title: {}", self.title);

        out.push_str("\n[Background]\n");
        if self.background.trim().is_empty() {
            out.push_str("None recorded\n");
        } else {
            let _ = writeln!(out, "{}", self.background);
        }

        out.push_str("\n[Main plot]\n");
        match &self.main_plot {
            Value::Object(map) if !map.is_empty() => {
                for (key, value) in map {
                    let _ = writeln!(out, "{}: {}", key, text_field(Some(value)));
                }
            }
            Value::Null => out.push_str("None recorded\n"),
            other => {
                let text = text_field(Some(other));
                if text.trim().is_empty() || text == "{}" {
                    out.push_str("None recorded\n");
                } else {
                    let _ = writeln!(out, "{}", text);
                }
            }
        }

        out.push_str("\n[Turning points]\n");
        if self.turning_points.is_empty() {
            out.push_str("None recorded\n");
        }
        for (i, point) in self.turning_points.iter().enumerate() {
            let name = item_name(point, || format!("Turning point {}", i + 1));
            match point.get("description") {
                Some(desc) => {
                    let _ = writeln!(out, "{}. {}: {}", i + 1, name, text_field(Some(desc)));
                }
                None => {
                    let _ = writeln!(out, "{}. {}", i + 1, name);
                }
            }
        }

        out.push_str("\n[Chapters]\n");
        if self.chapters.is_empty() {
            out.push_str("None recorded\n");
        }
        for (i, chapter) in self.chapters.iter().enumerate() {
            let _ = writeln!(out, "Chapter {} - {}: {}", i + 1, chapter.title, chapter.summary);
        }
        out
    }
}
