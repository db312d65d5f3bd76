//! Agent behaviour against a scripted driver.

mod test_utils;

use novelist_core::{
    ChapterContent, ChapterOutline, Character, CharacterAspect, Plot, PlotAspect, Role, World,
    WorldAspect,
};
use novelist_error::{NovelistErrorKind, PipelineErrorKind};
use novelist_pipeline::{
    CharacterCreator, ContentCreator, PlotDesigner, Prompts, WORLD_DESIGNER, WorldBuilder,
};
use std::sync::Arc;
use test_utils::{PLOT_JSON, ScriptedDriver, WORLD_JSON, character_json, fail, text};

fn prompts() -> Prompts {
    Prompts::new("English")
}

fn sample_plot(world: &World) -> Plot {
    let mut plot = Plot::new(world.id, vec![], "Tides");
    plot.chapters.push(ChapterOutline::new("Ebb", "The first island falls"));
    plot.chapters.push(ChapterOutline::new("Flood", "Lin meets Mara"));
    plot
}

#[tokio::test]
async fn test_create_world_from_fenced_json() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(WORLD_JSON)]));
    let builder = WorldBuilder::new(driver.clone(), prompts());

    let world = builder.create_world("floating islands").await?;
    assert_eq!(world.name, "Aurelia");
    assert_eq!(world.description, "floating islands");
    assert_eq!(world.history, "The Great Lifting");
    assert_eq!(world.natural_laws.len(), 1);
    assert_eq!(world.cultures, vec![serde_json::json!("Wind riders")]);

    let request = &driver.requests()[0];
    assert_eq!(request.messages()[0].role, Role::System);
    assert_eq!(request.messages()[0].text(), WORLD_DESIGNER);
    assert!(driver.user_prompt(0).contains("floating islands"));
    Ok(())
}

#[tokio::test]
async fn test_create_world_falls_back_on_prose() -> anyhow::Result<()> {
    let prose = "晴".repeat(1500);
    let driver = Arc::new(ScriptedDriver::new([text(&prose)]));
    let builder = WorldBuilder::new(driver, prompts());

    let world = builder.create_world("a sunny world").await?;
    assert_eq!(world.name, World::UNTITLED);
    assert_eq!(world.description, "a sunny world");
    assert_eq!(world.background.chars().count(), 1000);
    Ok(())
}

#[tokio::test]
async fn test_driver_error_propagates() {
    let driver = Arc::new(ScriptedDriver::new([fail("quota exceeded")]));
    let builder = WorldBuilder::new(driver, prompts());

    let err = builder.create_world("anything").await.unwrap_err();
    assert!(matches!(err.kind(), NovelistErrorKind::Backend(_)));
}

#[tokio::test]
async fn test_extend_world_accepts_label_key() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(r#"{"历史": "很久以前，群岛升起。"}"#)]));
    let builder = WorldBuilder::new(driver.clone(), prompts());
    let world = World::new("Aurelia", "floating islands");

    let extended = builder.extend_world(&world, WorldAspect::History).await?;
    assert_eq!(extended.id, world.id);
    assert_eq!(extended.history, "很久以前，群岛升起。");
    assert!(driver.user_prompt(0).contains("\"history\""));
    Ok(())
}

#[tokio::test]
async fn test_extend_world_without_value_is_unchanged() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("I could not do that.")]));
    let builder = WorldBuilder::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let extended = builder.extend_world(&world, WorldAspect::Regions).await?;
    assert_eq!(extended, world);
    Ok(())
}

#[tokio::test]
async fn test_create_character_parses_and_links_world() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([character_json("Lin", "protagonist")]));
    let creator = CharacterCreator::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let character = creator.create_character(&world, "a brave pilot").await?;
    assert_eq!(character.name, "Lin");
    assert_eq!(character.world_id, world.id);
    assert_eq!(character.role().as_deref(), Some("protagonist"));
    assert_eq!(character.personality, vec!["brave"]);
    Ok(())
}

#[tokio::test]
async fn test_create_character_falls_back_to_brief() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("Sorry, no JSON today.")]));
    let creator = CharacterCreator::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let character = creator.create_character(&world, "a brave pilot").await?;
    assert_eq!(character.name, Character::UNNAMED);
    assert_eq!(character.background, "a brave pilot");
    Ok(())
}

#[tokio::test]
async fn test_enhance_character_replaces_one_aspect() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(
        r#"{"abilities": ["storm calling", "gliding"]}"#,
    )]));
    let creator = CharacterCreator::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");
    let mut character = Character::new(world.id, "Lin");
    character.appearance = "Tall".to_string();

    let enhanced = creator
        .enhance_character(&character, &world, CharacterAspect::Abilities)
        .await?;
    assert_eq!(enhanced.abilities[0], "storm calling");
    assert_eq!(enhanced.appearance, "Tall");
    Ok(())
}

#[tokio::test]
async fn test_create_plot_from_json() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(PLOT_JSON)]));
    let designer = PlotDesigner::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");
    let lin = Character::new(world.id, "Lin");

    let plot = designer
        .create_plot(&world, std::slice::from_ref(&lin), "a race against the sea")
        .await?;
    assert_eq!(plot.title, "Tides of Aurelia");
    assert_eq!(plot.world_id, world.id);
    assert_eq!(plot.character_ids, vec![lin.id]);
    assert_eq!(plot.chapters.len(), 3);
    assert_eq!(plot.chapters[2].title, "Slack Water");
    Ok(())
}

#[tokio::test]
async fn test_create_plot_fallback_uses_description() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("A plot in prose only.")]));
    let designer = PlotDesigner::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let plot = designer.create_plot(&world, &[], "a race against the sea").await?;
    assert_eq!(plot.title, Plot::UNTITLED);
    assert_eq!(plot.background, "a race against the sea");
    assert_eq!(plot.main_plot, serde_json::json!("a race against the sea"));
    assert_eq!(plot.chapters.len(), 1);
    assert_eq!(plot.chapters[0].title, "Chapter 1");
    assert_eq!(plot.chapters[0].summary, "a race against the sea");
    Ok(())
}

#[tokio::test]
async fn test_chapter_outline_parses_scenes() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(
        r#"{"title": "Flood", "summary": "Lin meets Mara", "scenes": [{"description": "The docks", "key_points": ["Mara hides the map"]}], "conflicts": ["trust"]}"#,
    )]));
    let designer = PlotDesigner::new(driver.clone(), prompts());
    let world = World::new("Aurelia", "floating islands");
    let plot = sample_plot(&world);

    let outline = designer.generate_chapter_outline(&plot, 1).await?;
    assert_eq!(outline.title, "Flood");
    assert_eq!(outline.scenes[0].key_points, vec!["Mara hides the map"]);
    assert!(driver.user_prompt(0).contains("Previous chapter: Ebb"));
    Ok(())
}

#[tokio::test]
async fn test_chapter_outline_fallback() -> anyhow::Result<()> {
    let summary = "x".repeat(800);
    let driver = Arc::new(ScriptedDriver::new([text(&summary)]));
    let designer = PlotDesigner::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let outline = designer
        .generate_chapter_outline(&sample_plot(&world), 2)
        .await?;
    assert_eq!(outline.title, "Chapter 3");
    assert_eq!(outline.summary.len(), 500);
    Ok(())
}

#[tokio::test]
async fn test_extend_plot_turning_points() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(
        r#"{"turning_points": [{"name": "Storm", "description": "The fleet scatters"}]}"#,
    )]));
    let designer = PlotDesigner::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");
    let plot = sample_plot(&world);

    let extended = designer
        .extend_plot(&plot, &world, &[], PlotAspect::TurningPoints)
        .await?;
    assert_eq!(extended.turning_points.len(), 1);
    assert_eq!(extended.chapters, plot.chapters);
    Ok(())
}

#[tokio::test]
async fn test_chapter_content_is_raw_prose() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("  海水退去，露出了古老的城墙。\n")]));
    let creator = ContentCreator::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");
    let plot = sample_plot(&world);

    let chapter = creator.create_chapter_content(&plot, &world, &[], 0).await?;
    assert_eq!(chapter.id, ChapterContent::record_id(plot.id, 0));
    assert_eq!(chapter.title, "Ebb");
    assert_eq!(chapter.content, "海水退去，露出了古老的城墙。");
    assert_eq!(chapter.word_count, 14);
    Ok(())
}

#[tokio::test]
async fn test_chapter_content_unwraps_json_content() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text(
        r#"{"title": "Ebb", "content": "The sea withdrew."}"#,
    )]));
    let creator = ContentCreator::new(driver, prompts());
    let world = World::new("Aurelia", "floating islands");

    let chapter = creator
        .create_chapter_content(&sample_plot(&world), &world, &[], 0)
        .await?;
    assert_eq!(chapter.content, "The sea withdrew.");
    Ok(())
}

#[tokio::test]
async fn test_chapter_out_of_range_makes_no_call() {
    let driver = Arc::new(ScriptedDriver::default());
    let creator = ContentCreator::new(driver.clone(), prompts());
    let world = World::new("Aurelia", "floating islands");

    let err = creator
        .create_chapter_content(&sample_plot(&world), &world, &[], 5)
        .await
        .unwrap_err();
    match err.kind() {
        NovelistErrorKind::Pipeline(e) => {
            assert_eq!(e.kind, PipelineErrorKind::ChapterOutOfRange { index: 5, len: 2 })
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_scene_content() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("Lanterns swayed over the docks.")]));
    let creator = ContentCreator::new(driver.clone(), prompts());
    let world = World::new("Aurelia", "floating islands");

    let scene = creator
        .create_scene_content(&sample_plot(&world), &world, &[], 1, "a night market")
        .await?;
    assert_eq!(scene.chapter_index, 1);
    assert_eq!(scene.description, "a night market");
    assert_eq!(scene.content, "Lanterns swayed over the docks.");
    assert!(driver.user_prompt(0).contains("a night market"));
    Ok(())
}

#[tokio::test]
async fn test_refine_content_keeps_identity() -> anyhow::Result<()> {
    let driver = Arc::new(ScriptedDriver::new([text("A tighter draft.")]));
    let creator = ContentCreator::new(driver.clone(), prompts());
    let world = World::new("Aurelia", "floating islands");
    let plot = sample_plot(&world);
    let draft = ChapterContent::new(plot.id, 0, &plot.chapters[0], "A loose first draft.");

    let refined = creator
        .refine_content(&plot, &world, &[], &draft, "Make it tighter")
        .await?;
    assert_eq!(refined.id, draft.id);
    assert_eq!(refined.content, "A tighter draft.");
    assert_eq!(refined.generated_at, draft.generated_at);
    assert!(refined.refined_at.is_some());
    let prompt = driver.user_prompt(0);
    assert!(prompt.contains("A loose first draft."));
    assert!(prompt.contains("Make it tighter"));
    Ok(())
}
