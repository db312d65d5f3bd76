//! The fictional setting every other record hangs off.

use crate::WorldAspect;
use crate::fields::{item_name, list_field, text_field, truncate_chars};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use uuid::Uuid;

/// A generated fictional setting.
///
/// List-valued fields keep whatever structure the model produced (usually
/// objects with `name` and `description`), so they are stored as raw JSON.
///
/// # Examples
///
/// ```
/// use novelist_core::World;
///
/// let world = World::new("Aurelia", "a sky archipelago held up by song");
/// assert_eq!(world.name, "Aurelia");
/// assert!(world.natural_laws.is_empty());
/// assert_eq!(world.created_at, world.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Unique identifier, also the storage key
    pub id: Uuid,
    /// World name
    pub name: String,
    /// The user's description the world was generated from
    #[serde(default)]
    pub description: String,
    /// Overall background
    #[serde(default)]
    pub background: String,
    /// Physical, magical or other rules
    #[serde(default)]
    pub natural_laws: Vec<Value>,
    /// Major cultures
    #[serde(default)]
    pub cultures: Vec<Value>,
    /// Key historical events
    #[serde(default)]
    pub history: String,
    /// Major regions
    #[serde(default)]
    pub regions: Vec<Value>,
    /// Important people, historical or current
    #[serde(default)]
    pub notable_figures: Vec<Value>,
    /// Magic systems, if any
    #[serde(default)]
    pub magic_systems: Vec<Value>,
    /// Technologies
    #[serde(default)]
    pub technologies: Vec<Value>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl World {
    /// Name used when the model supplies none.
    pub const UNTITLED: &'static str = "Untitled World";

    /// An empty world with a fresh id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            background: String::new(),
            natural_laws: Vec::new(),
            cultures: Vec::new(),
            history: String::new(),
            regions: Vec::new(),
            notable_figures: Vec::new(),
            magic_systems: Vec::new(),
            technologies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a world from a model's JSON object, tolerating missing keys
    /// and unexpected shapes.
    pub fn from_generated(data: &Map<String, Value>, description: &str) -> Self {
        let name = text_field(data.get("name"));
        let name = if name.trim().is_empty() {
            Self::UNTITLED.to_string()
        } else {
            name
        };

        let mut world = Self::new(name, description);
        world.background = text_field(data.get("background"));
        world.natural_laws = list_field(data.get("natural_laws"));
        world.cultures = list_field(data.get("cultures"));
        world.history = text_field(data.get("history"));
        world.regions = list_field(data.get("regions"));
        world.notable_figures = list_field(data.get("notable_figures"));
        world.magic_systems = list_field(data.get("magic_systems"));
        world.technologies = list_field(data.get("technologies"));
        world
    }

    /// Overwrite one aspect with a generated value.
    pub fn apply_aspect(&mut self, aspect: WorldAspect, value: &Value) {
        let value = Some(value);
        match aspect {
            WorldAspect::Background => self.background = text_field(value),
            WorldAspect::NaturalLaws => self.natural_laws = list_field(value),
            WorldAspect::Cultures => self.cultures = list_field(value),
            WorldAspect::History => self.history = text_field(value),
            WorldAspect::Regions => self.regions = list_field(value),
            WorldAspect::NotableFigures => self.notable_figures = list_field(value),
            WorldAspect::MagicSystems => self.magic_systems = list_field(value),
            WorldAspect::Technologies => self.technologies = list_field(value),
        }
        self.updated_at = Utc::now();
    }

    /// Plain-text digest used as context in later prompts.
    ///
    /// ```
    /// use novelist_core::World;
    /// use serde_json::json;
    ///
    /// let mut world = World::new("Aurelia", "sky islands");
    /// world.regions = vec![json!({"name": "North Reach"}), json!("The Shoals")];
    ///
    /// let summary = world.summary();
    /// assert!(summary.starts_with("World: Aurelia\n"));
    /// assert!(summary.contains("- North Reach"));
    /// assert!(summary.contains("- The Shoals"));
    /// ```
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "World: {}", self.name);
        let _ = writeln!(out, "Description: {}", self.description);
        out.push('\n');

        if !self.background.is_empty() {
            let _ = writeln!(out, "Background: {}...", truncate_chars(&self.background, 200));
            out.push('\n');
        }

        summarise_list(&mut out, "Natural laws", "Law", &self.natural_laws, 3);
        summarise_list(&mut out, "Cultures", "Culture", &self.cultures, 3);
        summarise_list(&mut out, "Regions", "Region", &self.regions, 3);
        summarise_list(&mut out, "Magic systems", "Magic system", &self.magic_systems, 2);
        summarise_list(&mut out, "Technologies", "Technology", &self.technologies, 2);

        out.trim_end().to_string() + "\n"
    }
}

fn summarise_list(out: &mut String, heading: &str, noun: &str, items: &[Value], limit: usize) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", heading);
    for (i, item) in items.iter().take(limit).enumerate() {
        let _ = writeln!(out, "- {}", item_name(item, || format!("{} {}", noun, i + 1)));
    }
    if items.len() > limit {
        let _ = writeln!(out, "  ({} total)", items.len());
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_caps_lists_and_reports_totals() {
        let mut world = World::new("Aurelia", "sky islands");
        world.natural_laws = (1..=5).map(|i| json!(format!("law {}", i))).collect();
        world.magic_systems = vec![json!({"name": "Song"}), json!({"name": "Ash"}), json!({})];

        let summary = world.summary();
        assert!(summary.contains("- law 3"));
        assert!(!summary.contains("- law 4"));
        assert!(summary.contains("(5 total)"));
        assert!(summary.contains("- Ash"));
        assert!(!summary.contains("Magic system 3"));
        assert!(summary.contains("(3 total)"));
    }

    #[test]
    fn summary_truncates_background() {
        let mut world = World::new("Long", "d");
        world.background = "x".repeat(500);
        let summary = world.summary();
        assert!(summary.contains(&format!("Background: {}...", "x".repeat(200))));
        assert!(!summary.contains(&"x".repeat(201)));
    }

    #[test]
    fn unnamed_items_use_positional_names() {
        let mut world = World::new("W", "d");
        world.cultures = vec![json!({"values": "honour"})];
        assert!(world.summary().contains("- Culture 1"));
    }
}
