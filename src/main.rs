use std::path::PathBuf;

use anyhow::{Context, Result};
use autotag::autotagger::{
    AutotagError, TagSummary, get_matching_performers, performer_galleries, performer_images,
    performer_scenes,
};
use autotag::config::parse_bool_arg;
use autotag::utils::{ensure_database_directory, get_database_path};
use autotag::{AutotagConfig, CatalogService, Database, PerformerId};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// autotag - link performers to media files by the names in their paths
#[derive(Parser)]
#[command(name = "autotag")]
#[command(about = "Auto-tag scenes, images and galleries with the performers named in their paths")]
#[command(version)]
struct Cli {
    /// Catalog database file (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "FILE")]
    database: Option<PathBuf>,

    /// Only let qualified names and aliases produce matches (overrides AUTOTAG_ONLY_QUALIFIED)
    #[arg(long, global = true, value_name = "BOOL", value_parser = parse_bool_value)]
    only_qualified: Option<bool>,

    /// Log every decision, not just added relations
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Manage performers
    #[command(subcommand)]
    Performer(PerformerCommand),
    /// Register a scene file
    Scene(MediaCommand),
    /// Register an image file
    Image(MediaCommand),
    /// Register a gallery folder or archive
    Gallery(MediaCommand),
    /// List the performers whose names appear in a path
    Match(MatchCommand),
    /// Tag a performer onto the media records that mention it
    Tag(TagCommand),
}

#[derive(Subcommand)]
enum PerformerCommand {
    /// Add a performer
    Add {
        /// Primary name
        #[arg(value_name = "NAME")]
        name: String,

        /// Comma-separated aliases
        #[arg(short, long, value_name = "ALIASES")]
        aliases: Option<String>,
    },
    /// List all performers
    List,
}

#[derive(Parser)]
struct MediaCommand {
    /// Path of the media file
    #[arg(value_name = "PATH")]
    path: String,

    /// Optional display title
    #[arg(short, long)]
    title: Option<String>,
}

#[derive(Parser)]
struct MatchCommand {
    /// Path to inspect
    #[arg(value_name = "PATH")]
    path: String,

    /// Print the matches as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct TagCommand {
    /// Performer to tag
    #[arg(value_name = "PERFORMER_ID")]
    performer_id: i64,

    /// Which media to tag
    #[arg(short, long, value_enum, default_value_t = MediaKind::All)]
    kind: MediaKind,

    /// Path prefix to limit tagging to (repeatable)
    #[arg(short = 'p', long = "path", value_name = "PREFIX")]
    paths: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MediaKind {
    Scenes,
    Images,
    Galleries,
    All,
}

fn parse_bool_value(raw: &str) -> Result<bool, String> {
    parse_bool_arg(raw).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let mut logger = colog::default_builder();
    logger.filter_level(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    logger.init();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    if let Err(e) = run(&cli) {
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures and unknown ids. Database
/// failures and partial tagging failures are internal errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    let error_msg = error.to_string();
    error_msg.contains("cannot be empty") || error_msg.contains("not found")
}

fn run(cli: &Cli) -> Result<()> {
    let config = AutotagConfig::from_env()?.with_only_qualified(cli.only_qualified);

    let db_path = match &cli.database {
        Some(path) => path.clone(),
        None => get_database_path()?,
    };
    ensure_database_directory(&db_path)?;
    let db = Database::open(&db_path).context("Failed to open database")?;

    execute(&cli.command, config, CatalogService::new(db))
}

/// Executes a command against a provided catalog.
///
/// Separated from `run` so tests can use in-memory databases.
fn execute(command: &Commands, config: AutotagConfig, service: CatalogService) -> Result<()> {
    match command {
        Commands::Performer(PerformerCommand::Add { name, aliases }) => {
            let performer = service.create_performer(name, aliases.as_deref())?;
            println!("Performer created (id: {})", performer.id());
        }
        Commands::Performer(PerformerCommand::List) => {
            for performer in service.list_performers()? {
                println!("{}\t{}", performer.id(), performer);
            }
        }
        Commands::Scene(cmd) => {
            let scene = service.create_scene(&cmd.path, cmd.title.as_deref())?;
            println!("Scene created (id: {})", scene.id());
        }
        Commands::Image(cmd) => {
            let image = service.create_image(&cmd.path, cmd.title.as_deref())?;
            println!("Image created (id: {})", image.id());
        }
        Commands::Gallery(cmd) => {
            let gallery = service.create_gallery(&cmd.path, cmd.title.as_deref())?;
            println!("Gallery created (id: {})", gallery.id());
        }
        Commands::Match(cmd) => {
            let performers =
                get_matching_performers(&cmd.path, &service, config.only_qualified_performers)?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&performers)?);
            } else if performers.is_empty() {
                println!("No performers match {}", cmd.path);
            } else {
                for performer in &performers {
                    println!("{}\t{}", performer.id(), performer);
                }
            }
        }
        Commands::Tag(cmd) => execute_tag(cmd, config, &service)?,
    }
    Ok(())
}

fn execute_tag(cmd: &TagCommand, config: AutotagConfig, service: &CatalogService) -> Result<()> {
    let performer = service
        .get_performer(PerformerId::new(cmd.performer_id))?
        .ok_or_else(|| anyhow::anyhow!("Performer {} not found", cmd.performer_id))?;
    let only_qualified = config.only_qualified_performers;

    let mut failed = 0;
    let mut report = |label: &str, result: Result<TagSummary, AutotagError>| match result {
        Ok(summary) => {
            println!(
                "{label}: {} matched, {} added",
                summary.matched, summary.added
            );
            Ok(())
        }
        Err(AutotagError::Relations(failures)) => {
            println!("{label}: {} failed", failures.len());
            failed += failures.len();
            Ok(())
        }
        Err(e) => Err(e),
    };

    if matches!(cmd.kind, MediaKind::Scenes | MediaKind::All) {
        report("scenes", performer_scenes(&performer, &cmd.paths, service, only_qualified))?;
    }
    if matches!(cmd.kind, MediaKind::Images | MediaKind::All) {
        report("images", performer_images(&performer, &cmd.paths, service, only_qualified))?;
    }
    if matches!(cmd.kind, MediaKind::Galleries | MediaKind::All) {
        report(
            "galleries",
            performer_galleries(&performer, &cmd.paths, service, only_qualified),
        )?;
    }

    if failed > 0 {
        anyhow::bail!("{failed} tagging operation(s) failed");
    }
    Ok(())
}
