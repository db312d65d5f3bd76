//! Tests for the JSON record store.

use novelist_error::{NovelistErrorKind, StorageErrorKind};
use novelist_storage::{Category, JsonStorage};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    name: String,
}

fn storage_kind(err: &novelist_error::NovelistError) -> Option<&StorageErrorKind> {
    match err.kind() {
        NovelistErrorKind::Storage(e) => Some(&e.kind),
        _ => None,
    }
}

#[tokio::test]
async fn test_new_creates_category_directories() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path().join("data")).unwrap();

    for dir in ["worlds", "characters", "plots", "chapters", "novels"] {
        assert!(storage.base_dir().join(dir).is_dir(), "{dir} missing");
    }
}

#[tokio::test]
async fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    let note = Note {
        id: "n1".to_string(),
        name: "星之海".to_string(),
    };
    let path = storage.save(Category::Worlds, "n1", &note).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("星之海"), "non-ASCII text should be kept verbatim");
    assert!(text.contains("\n  \"name\""), "records should be pretty-printed");

    let loaded: Note = storage.load(Category::Worlds, "n1").await.unwrap();
    assert_eq!(loaded, note);
    assert!(storage.exists(Category::Worlds, "n1").await.unwrap());
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    let err = storage.load_value(Category::Plots, "ghost").await.unwrap_err();
    assert_eq!(
        storage_kind(&err),
        Some(&StorageErrorKind::NotFound("plots/ghost".to_string()))
    );
}

#[tokio::test]
async fn test_delete_reports_whether_anything_was_removed() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    storage
        .save(Category::Characters, "c1", &json!({"name": "Lin"}))
        .await
        .unwrap();

    assert!(storage.delete(Category::Characters, "c1").await.unwrap());
    assert!(!storage.delete(Category::Characters, "c1").await.unwrap());
    assert!(!storage.exists(Category::Characters, "c1").await.unwrap());
}

#[tokio::test]
async fn test_list_sorts_newest_first_and_skips_bad_files() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    storage
        .save(
            Category::Worlds,
            "old",
            &json!({"id": "old", "name": "Old", "created_at": "2024-01-01T00:00:00Z"}),
        )
        .await
        .unwrap();
    storage
        .save(
            Category::Worlds,
            "new",
            &json!({"id": "new", "name": "New", "created_at": "2025-06-01T00:00:00Z"}),
        )
        .await
        .unwrap();
    storage
        .save(Category::Worlds, "anon", &json!({"title": "Titled"}))
        .await
        .unwrap();
    std::fs::write(temp_dir.path().join("worlds/broken.json"), "{not json").unwrap();
    std::fs::write(temp_dir.path().join("worlds/readme.txt"), "ignored").unwrap();

    let listed = storage.list(Category::Worlds).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old", "anon"]);
    assert_eq!(listed[2].name, "Titled");
}

#[tokio::test]
async fn test_list_by_world_filters_characters() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();
    let world_a = Uuid::new_v4().to_string();
    let world_b = Uuid::new_v4().to_string();

    for (id, world) in [("a1", &world_a), ("a2", &world_a), ("b1", &world_b)] {
        storage
            .save(
                Category::Characters,
                id,
                &json!({"id": id, "name": id, "world_id": world, "basic_info": {"role": "hero"}}),
            )
            .await
            .unwrap();
    }

    let in_a = storage
        .list_by_world(Category::Characters, &world_a)
        .await
        .unwrap();
    assert_eq!(in_a.len(), 2);
    assert!(in_a.iter().all(|s| s.basic_info.is_some()));
}

#[tokio::test]
async fn test_query_and_update_paths() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    storage
        .save(
            Category::Plots,
            "p1",
            &json!({
                "id": "p1",
                "world_id": "w1",
                "title": "Tides",
                "chapters": [{"title": "Ebb"}],
                "updated_at": "2024-01-01T00:00:00Z"
            }),
        )
        .await
        .unwrap();

    let title = storage
        .query(Category::Plots, "p1", "chapters.0.title")
        .await
        .unwrap();
    assert_eq!(title, json!("Ebb"));

    let updated = storage
        .update(Category::Plots, "p1", "chapters.0.title", json!("Flood"))
        .await
        .unwrap();
    assert_eq!(updated["chapters"][0]["title"], json!("Flood"));
    assert_ne!(updated["updated_at"], json!("2024-01-01T00:00:00Z"));

    let reloaded = storage.query(Category::Plots, "p1", "").await.unwrap();
    assert_eq!(reloaded, updated);

    let err = storage
        .query(Category::Plots, "p1", "chapters.4")
        .await
        .unwrap_err();
    assert!(matches!(
        storage_kind(&err),
        Some(StorageErrorKind::InvalidPath { segment, .. }) if segment == "4"
    ));
}

#[tokio::test]
async fn test_whole_record_replacement_keeps_identity() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    storage
        .save(
            Category::Characters,
            "c1",
            &json!({"id": "c1", "world_id": "w1", "name": "Lin"}),
        )
        .await
        .unwrap();

    let replaced = storage
        .update(
            Category::Characters,
            "c1",
            "",
            json!({"id": "hijack", "name": "Mei"}),
        )
        .await
        .unwrap();
    assert_eq!(replaced, json!({"id": "c1", "world_id": "w1", "name": "Mei"}));

    let err = storage
        .update(Category::Characters, "c1", "", json!("not an object"))
        .await
        .unwrap_err();
    assert!(matches!(storage_kind(&err), Some(StorageErrorKind::InvalidValue(_))));
}

#[tokio::test]
async fn test_path_updates_cannot_change_identity() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    storage
        .save(
            Category::Plots,
            "p1",
            &json!({"id": "p1", "world_id": "w1", "title": "Tides"}),
        )
        .await
        .unwrap();

    for path in ["id", "world_id", " id ", ".id", "world_id.x"] {
        let err = storage
            .update(Category::Plots, "p1", path, json!("y"))
            .await
            .unwrap_err();
        assert!(
            matches!(storage_kind(&err), Some(StorageErrorKind::InvalidValue(_))),
            "{path} should be rejected"
        );
    }

    let stored = storage.load_value(Category::Plots, "p1").await.unwrap();
    assert_eq!(stored["id"], "p1");
    assert_eq!(stored["world_id"], "w1");
    assert!(!storage.exists(Category::Plots, "y").await.unwrap());
}

#[tokio::test]
async fn test_list_orders_generated_records_by_generation_time() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    for (id, generated_at) in [
        ("p_0", "2025-01-01T00:00:00Z"),
        ("p_2", "2025-03-01T00:00:00Z"),
        ("p_1", "2025-02-01T00:00:00Z"),
    ] {
        storage
            .save(
                Category::Chapters,
                id,
                &json!({"id": id, "title": id, "generated_at": generated_at}),
            )
            .await
            .unwrap();
    }

    let listed = storage.list(Category::Chapters).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["p_2", "p_1", "p_0"]);
    assert_eq!(listed[0].created_at, "2025-03-01T00:00:00Z");
}

#[tokio::test]
async fn test_rejects_ids_that_escape_the_category() {
    let temp_dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(temp_dir.path()).unwrap();

    assert!(
        storage
            .save(Category::Worlds, "../escape", &json!({}))
            .await
            .is_err()
    );
}
