//! Configuration and snapshot shared by the reporting commands

use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use super::output::Output;
use crate::domain::{find_by_name, Iteration};
use crate::storage::{Config, ProjectError, Snapshot};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Sprint '{0}' not found")]
    SprintNotFound(String),
}

/// Everything a reporting command reads, loaded once per invocation
pub struct Session {
    pub config: Config,
    pub snapshot: Snapshot,
}

impl Session {
    /// Loads config and the snapshot at `input`, or the project's snapshot
    pub fn open(output: &Output, input: Option<&Path>) -> Result<Self> {
        let config = Config::load()?;
        if let Some(root) = &config.project_root {
            output.verbose_ctx("config", &format!("Using project at: {}", root.display()));
        }

        let path = match input {
            Some(path) => path.to_path_buf(),
            None => config.snapshot_path().ok_or(ProjectError::NotInProject)?,
        };

        output.verbose_ctx("snapshot", &format!("Loading {}", path.display()));
        let snapshot = Snapshot::load(&path, &config.project.due_date_policy())?;
        output.verbose_ctx(
            "snapshot",
            &format!(
                "Loaded {} iterations ({} conversion warnings)",
                snapshot.iterations().len(),
                snapshot.warnings().len()
            ),
        );

        if output.is_verbose() {
            for warning in snapshot.warnings() {
                output.verbose_ctx("snapshot", warning);
            }
        }

        Ok(Self { config, snapshot })
    }

    /// Looks up a sprint by exact name
    pub fn sprint(&self, name: &str) -> Result<&Iteration> {
        find_by_name(self.snapshot.iterations(), name)
            .ok_or_else(|| SessionError::SprintNotFound(name.to_string()).into())
    }
}
