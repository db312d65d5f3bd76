//! Prompt construction for every generation stage.
//!
//! Prompts are written in English and instruct the model to answer in the
//! configured story language. JSON prompts list the exact keys the record
//! mappers read; prose prompts ask for the text alone.

use novelist_core::{
    Character, CharacterAspect, ChapterOutline, Plot, PlotAspect, World, WorldAspect,
};
use std::fmt::Write;

/// System instruction for world creation and extension.
pub const WORLD_DESIGNER: &str = "You are a professional novel world designer. \
You create detailed, coherent and original settings.";

/// System instruction for character creation and enhancement.
pub const CHARACTER_DESIGNER: &str = "You are a professional novel character designer. \
You create deep, consistent characters that belong to their world.";

/// System instruction for plots and chapter outlines.
pub const PLOT_DESIGNER: &str = "You are a professional novel plot designer. \
You build engaging storylines with sound structure and pacing.";

/// System instruction for chapter and scene prose.
pub const NOVELIST: &str = "You are a professional novelist. \
You write vivid, fluent prose that stays faithful to the outline.";

/// System instruction for revising prose.
pub const EDITOR: &str = "You are a professional fiction editor. \
You revise chapters while respecting their structure and voice.";

/// Builds the user prompts sent by the agents.
///
/// ```
/// use novelist_pipeline::Prompts;
///
/// let prompts = Prompts::new("English");
/// let prompt = prompts.world("A desert planet ruled by water merchants");
/// assert!(prompt.contains("water merchants"));
/// assert!(prompt.contains("\"natural_laws\""));
/// assert!(prompt.contains("Write every value in English."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    language: String,
}

impl Prompts {
    /// Prompts asking for output in `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// The story language.
    pub fn language(&self) -> &str {
        &self.language
    }

    fn json_footer(&self) -> String {
        format!(
            "Respond with a single JSON object and nothing else. Write every value in {}.",
            self.language
        )
    }

    fn prose_footer(&self) -> String {
        format!(
            "Write in {}. Return only the text itself, without explanations, headings or notes.",
            self.language
        )
    }

    fn aspect_footer(&self, key: &str, label: &str) -> String {
        format!(
            "Respond with a JSON object whose only key is \"{}\" and whose value is the expanded \
             content. Keep the value's shape suitable for the {} ({}). Write every value in {}.",
            key, key, label, self.language
        )
    }

    /// Create a world from the user's description.
    pub fn world(&self, description: &str) -> String {
        format!(
            "Create a detailed, coherent and original world for a novel based on this \
             description.\n\n\
             Description:\n{description}\n\n\
             Include these keys:\n\
             1. \"name\": a distinctive name that fits the theme\n\
             2. \"background\": the overall setting\n\
             3. \"natural_laws\": array of physical, magical or other rules\n\
             4. \"cultures\": array of major cultures and their traits\n\
             5. \"history\": key historical events\n\
             6. \"regions\": array of major regions and their features\n\
             7. \"notable_figures\": array of important historical or present-day figures\n\
             8. \"magic_systems\": array describing any magic and its rules\n\
             9. \"technologies\": array describing the level and kinds of technology\n\n\
             Array items may be objects with a \"name\" and a \"description\".\n\
             Stay consistent with the description while being inventive.\n\n{}",
            self.json_footer()
        )
    }

    /// Expand one aspect of an existing world.
    pub fn world_extension(&self, world: &World, aspect: WorldAspect) -> String {
        format!(
            "Expand the \"{key}\" aspect of an existing world, making it richer, more concrete \
             and more original while staying consistent with everything already established.\n\n\
             Current world:\n{summary}\n\n{footer}",
            key = aspect.as_str(),
            summary = world.summary(),
            footer = self.aspect_footer(aspect.as_str(), aspect.label()),
        )
    }

    /// Create a character who belongs to `world`.
    pub fn character(&self, world: &World, description: &str) -> String {
        format!(
            "Create a detailed, layered and original character for the world below.\n\n\
             World:\n{summary}\n\n\
             Character brief:\n{description}\n\n\
             Include these keys:\n\
             1. \"name\": a name that fits the world\n\
             2. \"basic_info\": object with age, gender, race, occupation and \"role\" (the \
             character's part in the story)\n\
             3. \"appearance\": physical description\n\
             4. \"personality\": array of traits and behaviour patterns\n\
             5. \"background\": upbringing and past\n\
             6. \"abilities\": array of special abilities or skills\n\n\
             The character should have depth and internal consistency.\n\n{footer}",
            summary = world.summary(),
            footer = self.json_footer(),
        )
    }

    /// Deepen one aspect of an existing character.
    pub fn character_enhancement(
        &self,
        character: &Character,
        world: &World,
        aspect: CharacterAspect,
    ) -> String {
        format!(
            "Enhance the \"{key}\" aspect of an existing character, adding depth and detail \
             while staying consistent with the character and the world.\n\n\
             World:\n{world}\n\n\
             Current character:\n{character}\n\n{footer}",
            key = aspect.as_str(),
            world = world.summary(),
            character = character.summary(),
            footer = self.aspect_footer(aspect.as_str(), aspect.label()),
        )
    }

    /// Create a plot with a chapter outline.
    pub fn plot(&self, world: &World, characters: &[Character], description: &str) -> String {
        format!(
            "Design a detailed, engaging plot with depth for the world and characters below.\n\n\
             World:\n{world}\n\n\
             Characters:\n{characters}\n\
             Plot brief:\n{description}\n\n\
             Include these keys:\n\
             1. \"title\": a compelling title\n\
             2. \"background\": the era and setting of the story\n\
             3. \"main_plot\": the core storyline\n\
             4. \"turning_points\": array of key turning points, each with \"name\" and \
             \"description\"\n\
             5. \"chapters\": array of chapter outlines, each with \"title\" and \"summary\"\n\n\
             The plot should have sound structure and pacing.\n\n{footer}",
            world = world.summary(),
            characters = characters_block(characters),
            footer = self.json_footer(),
        )
    }

    /// Detailed outline for the chapter at zero-based `index`.
    pub fn chapter_outline(&self, plot: &Plot, index: usize) -> String {
        let chapter_info = match plot.chapter(index) {
            Some(outline) => format!(
                "Chapter title: {}\nChapter summary: {}",
                outline.title, outline.summary
            ),
            None => format!(
                "This is chapter {}. Design its content to fit the plot.",
                index + 1
            ),
        };

        format!(
            "Write a detailed outline for chapter {number} of the plot below.\n\n\
             Plot:\n{plot}\n\n\
             Current chapter:\n{chapter_info}\n\n\
             Neighbouring chapters:\n{context}\n\n\
             Include these keys:\n\
             1. \"title\": a title that fits the content\n\
             2. \"summary\": an overview of the chapter\n\
             3. \"scenes\": array of scenes, each with \"description\" and \"key_points\" \
             (array of dialogue or action beats)\n\
             4. \"character_arcs\": how the main characters change in this chapter\n\
             5. \"conflicts\": the chapter's main conflicts\n\
             6. \"connections\": how the chapter ties into the overall plot\n\n\
             The chapter should stand on its own and fit the whole story.\n\n{footer}",
            number = index + 1,
            plot = plot.summary(),
            context = neighbour_context(plot, index),
            footer = self.json_footer(),
        )
    }

    /// Expand one aspect of an existing plot.
    pub fn plot_extension(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        aspect: PlotAspect,
    ) -> String {
        let shape = match aspect {
            PlotAspect::Chapters => {
                "\nEach chapter needs a \"title\" and a \"summary\"; keep existing chapters \
                 unless they must change.\n"
            }
            _ => "",
        };
        format!(
            "Expand the \"{key}\" aspect of an existing plot, making it richer and more concrete \
             while staying consistent with the plot, the characters and the world.\n\n\
             World:\n{world}\n\n\
             Characters:\n{characters}\n\
             Current plot:\n{plot}\n{shape}\n{footer}",
            key = aspect.as_str(),
            world = world.summary(),
            characters = characters_block(characters),
            plot = plot.summary(),
            footer = self.aspect_footer(aspect.as_str(), aspect.label()),
        )
    }

    /// Prose for the chapter at `index`, described by `outline`.
    pub fn chapter_content(
        &self,
        plot: &Plot,
        world: &World,
        characters: &[Character],
        outline: &ChapterOutline,
        index: usize,
    ) -> String {
        format!(
            "Write the full text of a novel chapter from the material below.\n\n\
             World:\n{world}\n\n\
             Characters:\n{characters}\n\
             Plot:\n{plot}\n\n\
             Chapter:\nTitle: {title}\nSummary: {summary}\n\n\
             Scenes:\n{scenes}\n\
             Neighbouring chapters:\n{context}\n\n\
             Write a complete, vivid and coherent chapter. Stay faithful to the plot and the \
             chapter summary, adding detail, dialogue and description as needed. Keep the \
             characters true to themselves and the chapter consistent with the whole story.\n\n\
             {footer}",
            world = world.summary(),
            characters = characters_block(characters),
            plot = plot.summary(),
            title = outline.title,
            summary = outline.summary,
            scenes = scenes_block(outline),
            context = neighbour_context(plot, index),
            footer = self.prose_footer(),
        )
    }

    /// Prose for one scene inside the chapter described by `outline`.
    pub fn scene_content(
        &self,
        world: &World,
        characters: &[Character],
        outline: &ChapterOutline,
        description: &str,
    ) -> String {
        format!(
            "Write one vivid, immersive scene of a novel from the material below.\n\n\
             World:\n{world}\n\n\
             Characters:\n{characters}\n\
             Chapter:\nTitle: {title}\nSummary: {summary}\n\n\
             Scene brief:\n{description}\n\n\
             Build the scene around the brief with setting, action and dialogue so the reader \
             feels its atmosphere. Keep it true to the world, the characters and the chapter.\n\n\
             {footer}",
            world = world.summary(),
            characters = characters_block(characters),
            title = outline.title,
            summary = outline.summary,
            footer = self.prose_footer(),
        )
    }

    /// Revise `current_content` following `instruction`.
    pub fn refinement(
        &self,
        world: &World,
        characters: &[Character],
        outline: &ChapterOutline,
        current_content: &str,
        instruction: &str,
    ) -> String {
        let mut cast = String::new();
        for (i, character) in characters.iter().enumerate() {
            let _ = writeln!(
                cast,
                "Character {}: {}\nTraits: {}",
                i + 1,
                character.name,
                character.personality.join(", ")
            );
        }

        format!(
            "Revise the novel chapter below following the editing instructions.\n\n\
             World:\n{world}\n\n\
             Characters:\n{cast}\n\
             Chapter:\nTitle: {title}\nSummary: {summary}\n\n\
             Current text:\n{current_content}\n\n\
             Editing instructions:\n{instruction}\n\n\
             Respect the existing structure and style. Keep the plot coherent, the characters \
             consistent and the world details accurate, and address every instruction.\n\n\
             Return the complete revised chapter without marking your changes. {footer}",
            world = world.summary(),
            title = outline.title,
            summary = outline.summary,
            footer = self.prose_footer(),
        )
    }
}

/// Numbered character summaries.
fn characters_block(characters: &[Character]) -> String {
    let mut out = String::new();
    for (i, character) in characters.iter().enumerate() {
        let _ = writeln!(out, "Character {}:\n{}", i + 1, character.summary());
    }
    if out.is_empty() {
        out.push_str("None yet\n");
    }
    out
}

/// Scene descriptions with their key points.
fn scenes_block(outline: &ChapterOutline) -> String {
    let mut out = String::new();
    for (i, scene) in outline.scenes.iter().enumerate() {
        let _ = writeln!(out, "Scene {}: {}", i + 1, scene.description);
        if !scene.key_points.is_empty() {
            out.push_str("Key points:\n");
            for point in &scene.key_points {
                let _ = writeln!(out, "- {}", point);
            }
        }
    }
    if out.is_empty() {
        out.push_str("No scenes planned; structure the chapter freely.\n");
    }
    out
}

/// Titles and summaries of the chapters either side of `index`.
fn neighbour_context(plot: &Plot, index: usize) -> String {
    let mut out = String::new();
    if let Some(previous) = index.checked_sub(1).and_then(|i| plot.chapter(i)) {
        let _ = writeln!(
            out,
            "Previous chapter: {}\n{}",
            previous.title, previous.summary
        );
    }
    if let Some(next) = plot.chapter(index + 1) {
        let _ = writeln!(out, "Next chapter: {}\n{}", next.title, next.summary);
    }
    if out.is_empty() {
        out.push_str("None\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use novelist_core::Scene;
    use uuid::Uuid;

    fn plot_with_chapters(n: usize) -> Plot {
        let mut plot = Plot::new(Uuid::new_v4(), vec![], "Tides");
        for i in 0..n {
            plot.chapters.push(ChapterOutline::new(
                format!("Title {}", i + 1),
                format!("Summary {}", i + 1),
            ));
        }
        plot
    }

    #[test]
    fn every_prompt_names_the_language() {
        let prompts = Prompts::new("Klingon");
        let world = World::new("Qo'noS", "warrior homeworld");
        let character = Character::new(world.id, "Worf");
        let plot = plot_with_chapters(2);
        let outline = plot.chapters[0].clone();
        let cast = vec![character.clone()];

        let all = [
            prompts.world("d"),
            prompts.world_extension(&world, WorldAspect::History),
            prompts.character(&world, "d"),
            prompts.character_enhancement(&character, &world, CharacterAspect::Abilities),
            prompts.plot(&world, &cast, "d"),
            prompts.chapter_outline(&plot, 0),
            prompts.plot_extension(&plot, &world, &cast, PlotAspect::TurningPoints),
            prompts.chapter_content(&plot, &world, &cast, &outline, 0),
            prompts.scene_content(&world, &cast, &outline, "a duel"),
            prompts.refinement(&world, &cast, &outline, "text", "shorter"),
        ];
        for prompt in &all {
            assert!(prompt.contains("Klingon"), "missing language in:\n{prompt}");
        }
    }

    #[test]
    fn extension_prompts_ask_for_the_aspect_key() {
        let prompts = Prompts::new("English");
        let world = World::new("Aurelia", "sky islands");
        let prompt = prompts.world_extension(&world, WorldAspect::MagicSystems);
        assert!(prompt.contains("only key is \"magic_systems\""));
        assert!(prompt.contains("World: Aurelia"));
    }

    #[test]
    fn chapter_prompt_includes_neighbours_and_scenes() {
        let prompts = Prompts::new("English");
        let world = World::new("Aurelia", "sky islands");
        let mut plot = plot_with_chapters(3);
        plot.chapters[1].scenes.push(Scene {
            description: "The harbour at night".to_string(),
            key_points: vec!["Lin steals the map".to_string()],
        });
        let outline = plot.chapters[1].clone();

        let prompt = prompts.chapter_content(&plot, &world, &[], &outline, 1);
        assert!(prompt.contains("Previous chapter: Title 1\nSummary 1"));
        assert!(prompt.contains("Next chapter: Title 3\nSummary 3"));
        assert!(prompt.contains("Scene 1: The harbour at night"));
        assert!(prompt.contains("- Lin steals the map"));
    }

    #[test]
    fn first_and_last_chapters_have_one_neighbour() {
        let plot = plot_with_chapters(2);
        let first = neighbour_context(&plot, 0);
        assert!(!first.contains("Previous chapter"));
        assert!(first.contains("Next chapter: Title 2"));

        let last = neighbour_context(&plot, 1);
        assert!(last.contains("Previous chapter: Title 1"));
        assert!(!last.contains("Next chapter"));

        assert_eq!(neighbour_context(&plot_with_chapters(1), 0), "None\n");
    }

    #[test]
    fn outline_prompt_for_new_chapter() {
        let prompts = Prompts::new("English");
        let prompt = prompts.chapter_outline(&plot_with_chapters(2), 2);
        assert!(prompt.contains("This is chapter 3."));
        assert!(prompt.contains("Previous chapter: Title 2"));
    }

    #[test]
    fn refinement_lists_cast_traits() {
        let prompts = Prompts::new("English");
        let world = World::new("Aurelia", "sky islands");
        let mut lin = Character::new(world.id, "Lin");
        lin.personality = vec!["calm".to_string(), "stubborn".to_string()];
        let outline = ChapterOutline::new("Ebb", "Low tide");

        let prompt = prompts.refinement(&world, &[lin], &outline, "Old text", "More tension");
        assert!(prompt.contains("Character 1: Lin\nTraits: calm, stubborn"));
        assert!(prompt.contains("Old text"));
        assert!(prompt.contains("More tension"));
    }
}
