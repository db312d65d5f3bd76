//! JSON file storage for Novelist records.
//!
//! Every record lives at `{base_dir}/{category}/{id}.json`, pretty-printed
//! with non-ASCII text kept as is so the files stay readable.
//!
//! ```text
//! data/
//! ├── worlds/      <uuid>.json
//! ├── characters/  <uuid>.json
//! ├── plots/       <uuid>.json
//! ├── chapters/    <plot uuid>_<index>.json
//! └── novels/      <plot uuid>.json
//! ```
//!
//! # Example
//!
//! ```rust
//! use novelist_storage::{Category, JsonStorage};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = JsonStorage::new("/tmp/novelist-doc")?;
//! storage.save(Category::Worlds, "w1", &json!({"id": "w1", "name": "Aurelia"})).await?;
//!
//! let name = storage.query(Category::Worlds, "w1", "name").await?;
//! assert_eq!(name, json!("Aurelia"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod json_storage;
mod path;
mod summary;

pub use category::Category;
pub use json_storage::JsonStorage;
pub use novelist_error::{StorageError, StorageErrorKind};
pub use path::{get_path, set_path};
pub use summary::RecordSummary;
