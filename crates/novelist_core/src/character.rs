//! Story personas tied to a world.

use crate::CharacterAspect;
use crate::fields::{item_name, object_field, string_list_field, text_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use uuid::Uuid;

/// A generated character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier, also the storage key
    pub id: Uuid,
    /// World this character belongs to
    pub world_id: Uuid,
    /// Character name
    pub name: String,
    /// Age, gender, race, occupation, story role and similar facts
    #[serde(default)]
    pub basic_info: Map<String, Value>,
    /// Physical description
    #[serde(default)]
    pub appearance: String,
    /// Personality traits
    #[serde(default)]
    pub personality: Vec<String>,
    /// Backstory
    #[serde(default)]
    pub background: String,
    /// Abilities in whatever structure the model produced
    #[serde(default)]
    pub abilities: Value,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Name used when the model supplies none.
    pub const UNNAMED: &'static str = "Unnamed Character";

    /// An empty character with a fresh id.
    pub fn new(world_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            world_id,
            name: name.into(),
            basic_info: Map::new(),
            appearance: String::new(),
            personality: Vec::new(),
            background: String::new(),
            abilities: Value::Array(Vec::new()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a character from a model's JSON object.
    ///
    /// ```
    /// use novelist_core::Character;
    /// use serde_json::json;
    /// use uuid::Uuid;
    ///
    /// let data = json!({"name": "Lin", "personality": "calm"});
    /// let character = Character::from_generated(data.as_object().unwrap(), Uuid::new_v4());
    /// assert_eq!(character.name, "Lin");
    /// assert_eq!(character.personality, vec!["calm"]);
    /// ```
    pub fn from_generated(data: &Map<String, Value>, world_id: Uuid) -> Self {
        let name = text_field(data.get("name"));
        let name = if name.trim().is_empty() {
            Self::UNNAMED.to_string()
        } else {
            name
        };

        let mut character = Self::new(world_id, name);
        character.basic_info = object_field(data.get("basic_info"));
        character.appearance = text_field(data.get("appearance"));
        character.personality = string_list_field(data.get("personality"));
        character.background = text_field(data.get("background"));
        if let Some(abilities) = data.get("abilities").filter(|v| !v.is_null()) {
            character.abilities = abilities.clone();
        }
        character
    }

    /// Overwrite one aspect with a generated value.
    pub fn apply_aspect(&mut self, aspect: CharacterAspect, value: &Value) {
        let value = Some(value);
        match aspect {
            CharacterAspect::BasicInfo => self.basic_info = object_field(value),
            CharacterAspect::Appearance => self.appearance = text_field(value),
            CharacterAspect::Personality => self.personality = string_list_field(value),
            CharacterAspect::Background => self.background = text_field(value),
            CharacterAspect::Abilities => {
                self.abilities = value.cloned().unwrap_or(Value::Null);
            }
        }
        self.updated_at = Utc::now();
    }

    /// The character's story role from `basic_info.role`, if recorded.
    pub fn role(&self) -> Option<String> {
        let role = text_field(self.basic_info.get("role"));
        if role.trim().is_empty() { None } else { Some(role) }
    }

    /// Plain-text digest used as context in later prompts.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Character: {}", self.name);

        out.push_str("\n[Basic info]\n");
        if self.basic_info.is_empty() {
            out.push_str("None recorded\n");
        }
        for (key, value) in &self.basic_info {
            let _ = writeln!(out, "{}: {}", key, text_field(Some(value)));
        }

        out.push_str("\n[Appearance]\n");
        out.push_str(non_empty_or(&self.appearance, "None recorded"));
        out.push('\n');

        out.push_str("\n[Personality]\n");
        if self.personality.is_empty() {
            out.push_str("None recorded\n");
        }
        for trait_ in &self.personality {
            let _ = writeln!(out, "- {}", trait_);
        }

        out.push_str("\n[Background]\n");
        out.push_str(non_empty_or(&self.background, "None recorded"));
        out.push('\n');

        out.push_str("\n[Abilities]\n");
        let abilities = describe_abilities(&self.abilities);
        out.push_str(non_empty_or(&abilities, "None recorded\n"));
        out
    }
}

fn non_empty_or<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.trim().is_empty() { fallback } else { text }
}

fn describe_abilities(abilities: &Value) -> String {
    let mut out = String::new();
    match abilities {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                describe_ability(&mut out, item);
            }
        }
        Value::Object(groups) => {
            for (group, entries) in groups {
                let _ = writeln!(out, "{}:", group);
                match entries {
                    Value::Object(named) => {
                        for (name, desc) in named {
                            let _ = writeln!(out, "- {}: {}", name, text_field(Some(desc)));
                        }
                    }
                    Value::Array(items) => {
                        for item in items {
                            describe_ability(&mut out, item);
                        }
                    }
                    other => {
                        let _ = writeln!(out, "- {}", text_field(Some(other)));
                    }
                }
            }
        }
        other => {
            let _ = writeln!(out, "- {}", text_field(Some(other)));
        }
    }
    out
}

fn describe_ability(out: &mut String, item: &Value) {
    let name = item_name(item, || text_field(Some(item)));
    match item.get("description") {
        Some(desc) => {
            let _ = writeln!(out, "- {}: {}", name, text_field(Some(desc)));
        }
        None => {
            let _ = writeln!(out, "- {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn character_from(value: Value) -> Character {
        let map = value.as_object().cloned().unwrap_or_default();
        Character::from_generated(&map, Uuid::new_v4())
    }

    #[test]
    fn missing_name_falls_back() {
        let character = character_from(json!({"appearance": "tall"}));
        assert_eq!(character.name, Character::UNNAMED);
        assert_eq!(character.appearance, "tall");
    }

    #[test]
    fn role_reads_basic_info() {
        let character = character_from(json!({"name": "A", "basic_info": {"role": "protagonist"}}));
        assert_eq!(character.role().as_deref(), Some("protagonist"));
        assert_eq!(character_from(json!({"name": "B"})).role(), None);
    }

    #[test]
    fn summary_lists_grouped_abilities() {
        let character = character_from(json!({
            "name": "Mei",
            "abilities": {
                "combat": {"spear": "master"},
                "arcane": [{"name": "Wind step", "description": "short glide"}, "Foresight"]
            }
        }));
        let summary = character.summary();
        assert!(summary.contains("combat:"));
        assert!(summary.contains("- spear: master"));
        assert!(summary.contains("- Wind step: short glide"));
        assert!(summary.contains("- Foresight"));
    }

    #[test]
    fn summary_marks_empty_sections() {
        let character = Character::new(Uuid::new_v4(), "Blank");
        let summary = character.summary();
        assert!(summary.contains("[Appearance]\nNone recorded"));
        assert!(summary.contains("[Abilities]\nNone recorded"));
    }

    #[test]
    fn apply_aspect_coerces_personality() {
        let mut character = Character::new(Uuid::new_v4(), "Kai");
        character.apply_aspect(CharacterAspect::Personality, &json!("reckless"));
        assert_eq!(character.personality, vec!["reckless"]);
        assert!(character.updated_at >= character.created_at);
    }
}
