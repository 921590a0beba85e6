//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{dates, developers, sprints, stories};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "sprintcap")]
#[command(author, version, about = "Sprint, story and capacity views from issue-tracker exports")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Snapshot exported from the issue tracker
    #[arg(long, short = 'i', global = true, env = "SPRINTCAP_INPUT")]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new sprintcap project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show sprints around the current one
    Sprints {
        /// Reference time instead of now (any supported date format)
        #[arg(long)]
        now: Option<String>,
    },

    /// Show user stories of a sprint with their due dates
    Stories {
        /// Sprint name
        #[arg(long, short)]
        sprint: String,
    },

    /// Show tasks of a user story
    Tasks {
        /// User story ID
        story: i64,
    },

    /// Show developer capacity for a sprint
    Developers {
        /// Sprint name
        #[arg(long, short)]
        sprint: String,
    },

    /// Normalize a date string and show which format matched
    ParseDate {
        /// Raw date text
        raw: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let global = Config::load_global()?;
    let format = cli.format.unwrap_or(global.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("sprintcap starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created directory at: {}", project.project_dir().display()),
            );
            output.success(&format!(
                "Initialized sprintcap project at {}",
                project.root().display()
            ));
        }

        Commands::Sprints { now } => {
            let session = Session::open(&output, cli.input.as_deref())?;
            sprints::list(&output, &session, now.as_deref())?
        }

        Commands::Stories { sprint } => {
            let session = Session::open(&output, cli.input.as_deref())?;
            stories::list(&output, &session, &sprint)?
        }

        Commands::Tasks { story } => {
            let session = Session::open(&output, cli.input.as_deref())?;
            stories::tasks(&output, &session, story)?
        }

        Commands::Developers { sprint } => {
            let session = Session::open(&output, cli.input.as_deref())?;
            developers::report(&output, &session, &sprint)?
        }

        Commands::ParseDate { raw } => {
            let config = Config::load()?;
            dates::parse(&output, &config, &raw)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
