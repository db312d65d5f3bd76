//! Novelist CLI binary.
//!
//! This binary provides command-line access to Novelist's functionality:
//! - Generate a complete novel from one description
//! - Create, extend and inspect worlds, characters and plots
//! - Write, refine and export chapters
//! - Query and edit stored records

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, DescriptionSource, Session, generate_novel, handle_chapter_command,
        handle_character_command, handle_plot_command, handle_world_command, query_record,
        update_record,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // GEMINI_API_KEY may live in .env
    dotenvy::dotenv().ok();

    // Initialize tracing: -v forces debug, otherwise RUST_LOG or info
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let session = Session::open(cli.config.as_deref(), cli.data_dir)?;

    // Execute the requested command
    match cli.command {
        Commands::Generate {
            description,
            input,
            characters,
            chapters,
        } => {
            let source = match (&description, &input) {
                (Some(text), _) => DescriptionSource::Inline(text),
                (None, Some(path)) => DescriptionSource::File(path),
                (None, None) => DescriptionSource::Inline(""),
            };
            generate_novel(&session, source, characters, chapters).await?;
        }

        Commands::World(cmd) => handle_world_command(&session, cmd).await?,

        Commands::Character(cmd) => handle_character_command(&session, cmd).await?,

        Commands::Plot(cmd) => handle_plot_command(&session, cmd).await?,

        Commands::Chapter(cmd) => handle_chapter_command(&session, cmd).await?,

        Commands::Query { category, id, path } => {
            query_record(&session, category, &id, path.as_deref()).await?;
        }

        Commands::Update {
            category,
            id,
            path,
            value,
        } => {
            update_record(&session, category, &id, &path, &value).await?;
        }
    }

    Ok(())
}
