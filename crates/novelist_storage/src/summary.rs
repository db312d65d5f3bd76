//! Listing entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One line of a category listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Record id (falls back to the file stem)
    pub id: String,
    /// `name`, else `title`, else "Untitled"
    pub name: String,
    /// Creation timestamp as stored (`generated_at` for generated prose and
    /// run reports), empty if missing
    pub created_at: String,
    /// Modification timestamp as stored, empty if missing
    pub updated_at: String,
    /// Owning world, for records that have one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_id: Option<String>,
    /// Character facts, for character records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<Map<String, Value>>,
}

impl RecordSummary {
    /// Summarise a stored record.
    ///
    /// ```
    /// use novelist_storage::RecordSummary;
    /// use serde_json::json;
    ///
    /// let summary = RecordSummary::from_record(&json!({"title": "Tides"}), "abc");
    /// assert_eq!(summary.id, "abc");
    /// assert_eq!(summary.name, "Tides");
    /// ```
    pub fn from_record(record: &Value, file_stem: &str) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        Self {
            id: text("id").unwrap_or_else(|| file_stem.to_string()),
            name: text("name")
                .or_else(|| text("title"))
                .unwrap_or_else(|| "Untitled".to_string()),
            created_at: text("created_at")
                .or_else(|| text("generated_at"))
                .unwrap_or_default(),
            updated_at: text("updated_at").unwrap_or_default(),
            world_id: text("world_id"),
            basic_info: record
                .get("basic_info")
                .and_then(Value::as_object)
                .cloned(),
        }
    }
}
