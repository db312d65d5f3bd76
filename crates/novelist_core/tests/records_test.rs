use novelist_core::{
    ChapterContent, ChapterOutline, Character, CharacterAspect, GenerateRequest, Plot,
    PlotAspect, World, WorldAspect,
};
use serde_json::{Map, Value, json};
use uuid::Uuid;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn world_from_generated_tolerates_odd_shapes() {
    let data = object(json!({
        "name": "Verdance",
        "background": {"era": "after the long winter"},
        "natural_laws": "plants remember",
        "cultures": [{"name": "Rootfolk"}],
        "technologies": null
    }));
    let world = World::from_generated(&data, "a living forest world");

    assert_eq!(world.name, "Verdance");
    assert_eq!(world.description, "a living forest world");
    assert!(world.background.contains("after the long winter"));
    assert_eq!(world.natural_laws, vec![json!("plants remember")]);
    assert_eq!(world.cultures.len(), 1);
    assert!(world.technologies.is_empty());
}

#[test]
fn world_without_name_is_untitled() {
    let world = World::from_generated(&Map::new(), "desc");
    assert_eq!(world.name, World::UNTITLED);
}

#[test]
fn world_survives_json_round_trip() {
    let mut world = World::new("Aurelia", "sky islands");
    world.regions = vec![json!({"name": "North Reach", "climate": "cold"})];

    let text = serde_json::to_string_pretty(&world).expect("serialize");
    let back: World = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, world);
}

#[test]
fn world_record_loads_with_missing_optional_fields() {
    let id = Uuid::new_v4();
    let text = format!(
        r#"{{"id": "{}", "name": "Old", "created_at": "2024-05-01T10:00:00Z"}}"#,
        id
    );
    let world: World = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(world.id, id);
    assert!(world.history.is_empty());
}

#[test]
fn world_apply_aspect_updates_only_that_field() {
    let mut world = World::new("W", "d");
    world.history = "ancient".to_string();
    world.apply_aspect(WorldAspect::Cultures, &json!([{"name": "Guild"}, {"name": "Order"}]));

    assert_eq!(world.cultures.len(), 2);
    assert_eq!(world.history, "ancient");
}

#[test]
fn character_apply_aspect_basic_info_from_prose() {
    let mut character = Character::new(Uuid::new_v4(), "Ren");
    character.apply_aspect(CharacterAspect::BasicInfo, &json!("a 30 year old smuggler"));
    assert_eq!(
        character.basic_info.get("description"),
        Some(&json!("a 30 year old smuggler"))
    );
}

#[test]
fn plot_apply_chapters_aspect_rebuilds_outline() {
    let mut plot = Plot::new(Uuid::new_v4(), vec![], "T");
    plot.apply_aspect(
        PlotAspect::Chapters,
        &json!([{"title": "A", "summary": "a"}, {"summary": "b"}]),
    );
    assert_eq!(plot.chapters.len(), 2);
    assert_eq!(plot.chapters[1].title, "Chapter 2");
    assert!(plot.chapter(2).is_none());
}

#[test]
fn refined_chapter_keeps_identity() {
    let plot_id = Uuid::new_v4();
    let original = ChapterContent::new(plot_id, 3, &ChapterOutline::new("Four", "s"), "draft");
    let refined = original.refined("a much better draft");

    assert_eq!(refined.id, original.id);
    assert_eq!(refined.generated_at, original.generated_at);
    assert_eq!(refined.word_count, "a much better draft".chars().count());
    assert!(refined.refined_at.is_some());
    assert_eq!(refined.to_text(), "# Four\n\na much better draft");
}

#[test]
fn prompt_request_has_single_user_message() {
    let request = GenerateRequest::prompt("hello");
    assert_eq!(request.messages().len(), 1);
    assert_eq!(request.messages()[0].text(), "hello");
    assert!(request.temperature().is_none());
}
