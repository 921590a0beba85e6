//! Project management
//!
//! Handles project initialization and locates the snapshot and config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::{Config, PROJECT_DIR};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a sprintcap project. Run 'sprintcap init' or pass --input.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# sprintcap configuration

# Snapshot exported from the issue tracker, relative to the project root
# snapshot = ".sprintcap/snapshot.json"

[capacity]
# Allocation for developers without a [[developers]] entry
default_hours_per_day = 8.0
default_activity = "Development"

[dates]
# Work item fields checked for a story's due date, first non-empty wins
due_date_fields = [
    "Microsoft.VSTS.Scheduling.DueDate",
    "Microsoft.VSTS.Scheduling.TargetDate",
    "Microsoft.VSTS.Common.DueDate",
]

# Date formats tried in order, first match wins
formats = [
    "iso_utc",
    "iso_local",
    "iso_offset",
    "date",
    "regional_date_time",
    "regional_date",
    "short_date",
    "long_date",
    "slashed_date",
    "rfc3339",
]

# [[developers]]
# name = "Jane Doe"
# activities = [
#     { name = "Development", capacity_per_day = 6.0 },
#     { name = "Support", capacity_per_day = 2.0 },
# ]
# days_off = [{ start = "2024-06-10", end = "2024-06-11" }]
"#;

/// A sprintcap project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&project_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, project_dir.display())
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Snapshots hold upstream data and are not meant for version control
        let gitignore_path = project_dir.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, "*.json\n").with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .sprintcap directory path
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
