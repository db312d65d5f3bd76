//! CLI command definitions.

use clap::{Parser, Subcommand};
use novelist_core::{CharacterAspect, PlotAspect, WorldAspect};
use novelist_storage::Category;
use std::path::PathBuf;

/// Novelist - generate a short novel with Gemini
#[derive(Parser, Debug)]
#[command(name = "novelist")]
#[command(about = "Generate a world, characters, plot and chapters with Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory records are stored in (overrides `storage.data_dir`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a complete novel from one description
    Generate {
        /// Story description
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        description: Option<String>,

        /// Read the story description from a file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of characters to create (at most 5)
        #[arg(short, long)]
        characters: Option<usize>,

        /// Number of chapters to write
        #[arg(short = 'n', long)]
        chapters: Option<usize>,
    },

    /// World commands
    #[command(subcommand)]
    World(WorldCommands),

    /// Character commands
    #[command(subcommand)]
    Character(CharacterCommands),

    /// Plot commands
    #[command(subcommand)]
    Plot(PlotCommands),

    /// Chapter commands
    #[command(subcommand)]
    Chapter(ChapterCommands),

    /// Print a stored record, or the value at a dot path inside it
    Query {
        /// worlds, characters, plots, chapters or novels
        category: Category,

        /// Record id
        id: String,

        /// Dot path such as `chapters.0.title`
        path: Option<String>,
    },

    /// Set the value at a dot path inside a stored record
    Update {
        /// worlds, characters, plots, chapters or novels
        category: Category,

        /// Record id
        id: String,

        /// Dot path; an empty string replaces the whole record
        path: String,

        /// New value as JSON; anything that does not parse is stored as a string
        value: String,
    },
}

/// World subcommands
#[derive(Subcommand, Debug)]
pub enum WorldCommands {
    /// Create a world from a description
    Create {
        /// World description
        description: String,
    },

    /// List stored worlds
    List,

    /// Print a stored world
    Show {
        /// World id
        id: String,
    },

    /// Regenerate one aspect of a world
    Extend {
        /// World id
        id: String,

        /// background, natural_laws, cultures, history, regions,
        /// notable_figures, magic_systems or technologies
        aspect: WorldAspect,
    },

    /// Delete a stored world
    Delete {
        /// World id
        id: String,
    },
}

/// Character subcommands
#[derive(Subcommand, Debug)]
pub enum CharacterCommands {
    /// Create a character in a world
    Create {
        /// World the character belongs to
        #[arg(long)]
        world: String,

        /// Character brief
        description: String,
    },

    /// List stored characters
    List {
        /// Only characters of this world
        #[arg(long)]
        world: Option<String>,
    },

    /// Print a stored character
    Show {
        /// Character id
        id: String,
    },

    /// Deepen one aspect of a character
    Enhance {
        /// Character id
        id: String,

        /// basic_info, appearance, personality, background or abilities
        aspect: CharacterAspect,
    },

    /// Delete a stored character
    Delete {
        /// Character id
        id: String,
    },
}

/// Plot subcommands
#[derive(Subcommand, Debug)]
pub enum PlotCommands {
    /// Design a plot for a world
    Create {
        /// World the plot is set in
        #[arg(long)]
        world: String,

        /// Comma-separated character ids; defaults to every character of the world
        #[arg(long, value_delimiter = ',')]
        characters: Vec<String>,

        /// Plot brief
        description: String,
    },

    /// List stored plots
    List {
        /// Only plots of this world
        #[arg(long)]
        world: Option<String>,
    },

    /// Print a stored plot
    Show {
        /// Plot id
        id: String,
    },

    /// Outline one chapter in detail and store it in the plot
    Outline {
        /// Plot id
        id: String,

        /// Chapter number, starting at 1; one past the last adds a chapter
        chapter: usize,
    },

    /// Regenerate one aspect of a plot
    Extend {
        /// Plot id
        id: String,

        /// title, background, main_plot, turning_points or chapters
        aspect: PlotAspect,
    },

    /// Delete a stored plot
    Delete {
        /// Plot id
        id: String,
    },
}

/// Chapter subcommands
#[derive(Subcommand, Debug)]
pub enum ChapterCommands {
    /// Write the prose of one chapter
    Write {
        /// Plot id
        plot: String,

        /// Chapter number, starting at 1
        chapter: usize,
    },

    /// Write one scene of a chapter
    Scene {
        /// Plot id
        plot: String,

        /// Chapter number, starting at 1
        chapter: usize,

        /// Scene brief
        description: String,
    },

    /// Revise a written chapter
    Refine {
        /// Plot id
        plot: String,

        /// Chapter number, starting at 1
        chapter: usize,

        /// What to change
        instruction: String,
    },

    /// Export every written chapter of a plot as one text file
    Export {
        /// Plot id
        plot: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_takes_description_or_file() {
        let cli = Cli::try_parse_from(["novelist", "generate", "-d", "Sky whales", "-c", "2", "-n", "4"])
            .unwrap();
        match cli.command {
            Commands::Generate {
                description,
                input,
                characters,
                chapters,
            } => {
                assert_eq!(description.as_deref(), Some("Sky whales"));
                assert!(input.is_none());
                assert_eq!(characters, Some(2));
                assert_eq!(chapters, Some(4));
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["novelist", "generate"]).is_err());
        assert!(
            Cli::try_parse_from(["novelist", "generate", "-d", "a", "-i", "story.txt"]).is_err()
        );
    }

    #[test]
    fn aspects_and_categories_parse_from_names() {
        let cli = Cli::try_parse_from(["novelist", "world", "extend", "w1", "magic_systems"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::World(WorldCommands::Extend {
                aspect: WorldAspect::MagicSystems,
                ..
            })
        ));

        let cli = Cli::try_parse_from(["novelist", "query", "plots", "p1", "chapters.0.title"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Query {
                category: Category::Plots,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["novelist", "query", "shelves", "p1"]).is_err());
        assert!(Cli::try_parse_from(["novelist", "plot", "extend", "p1", "weather"]).is_err());
    }

    #[test]
    fn plot_characters_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "novelist", "plot", "create", "--world", "w1", "--characters", "a,b", "A heist",
        ])
        .unwrap();
        match cli.command {
            Commands::Plot(PlotCommands::Create { characters, .. }) => {
                assert_eq!(characters, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["novelist", "world", "list", "--data-dir", "/tmp/n", "-v"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/n")));
        assert!(cli.verbose);
    }
}
