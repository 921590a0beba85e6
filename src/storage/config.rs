//! Configuration handling for sprintcap
//!
//! Configuration is stored in `.sprintcap/config.toml` (project) and
//! `~/.config/sprintcap/config.toml` (global). `SPRINTCAP_CONFIG_DIR`
//! overrides the global directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::{
    Activity, CapacityError, DateFormat, DateNormalizer, DeveloperCapacityInput, DueDatePolicy,
    DEFAULT_ACTIVITY, DEFAULT_HOURS_PER_DAY, DUE_DATE_FIELDS,
};

/// Name of the project directory
pub const PROJECT_DIR: &str = ".sprintcap";

/// Environment variable overriding the global config directory
pub const CONFIG_DIR_ENV: &str = "SPRINTCAP_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Fallback allocation for developers without an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CapacityConfig {
    /// Hours per day assumed for unconfigured developers
    pub default_hours_per_day: f64,

    /// Activity name for the fallback allocation
    pub default_activity: String,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            default_hours_per_day: DEFAULT_HOURS_PER_DAY,
            default_activity: DEFAULT_ACTIVITY.to_string(),
        }
    }
}

/// One activity in a developer's day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityConfig {
    pub name: String,
    pub capacity_per_day: f64,
}

/// A declared absence; either endpoint may be left out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DayOffConfig {
    #[serde(default)]
    pub start: Option<NaiveDate>,

    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Capacity settings for one developer, keyed by display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeveloperConfig {
    pub name: String,

    #[serde(default)]
    pub activities: Vec<ActivityConfig>,

    #[serde(default)]
    pub days_off: Vec<DayOffConfig>,
}

impl DeveloperConfig {
    /// Converts to the engine's capacity input
    pub fn to_input(&self) -> Result<DeveloperCapacityInput, CapacityError> {
        let mut input = DeveloperCapacityInput::new(self.name.as_str());

        for activity in &self.activities {
            input = input.with_activity(Activity::new(activity.name.as_str(), activity.capacity_per_day));
        }

        for day_off in &self.days_off {
            input.add_day_off(day_off.start, day_off.end)?;
        }

        Ok(input)
    }
}

/// Date parsing settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatesConfig {
    /// Work item fields checked for a due date, in order
    pub due_date_fields: Vec<String>,

    /// Date formats tried, in order (see `sprintcap parse-date --help`)
    pub formats: Vec<DateFormat>,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            due_date_fields: DUE_DATE_FIELDS.iter().map(|f| f.to_string()).collect(),
            formats: DateFormat::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Snapshot file, relative to the project root
    pub snapshot: Option<PathBuf>,

    pub capacity: CapacityConfig,

    pub dates: DatesConfig,

    pub developers: Vec<DeveloperConfig>,
}

impl ProjectConfig {
    /// Builds the per-developer capacity map.
    ///
    /// Invalid entries are returned as errors and left out of the map, so
    /// those developers fall back to the default allocation. A later entry
    /// with the same name replaces an earlier one.
    pub fn capacity_inputs(&self) -> (HashMap<String, DeveloperCapacityInput>, Vec<CapacityError>) {
        let mut inputs = HashMap::new();
        let mut errors = Vec::new();

        for developer in &self.developers {
            match developer.to_input() {
                Ok(input) => {
                    inputs.insert(developer.name.clone(), input);
                }
                Err(e) => {
                    inputs.remove(&developer.name);
                    errors.push(e);
                }
            }
        }

        (inputs, errors)
    }

    /// The allocation for developers without an entry
    pub fn default_activity(&self) -> Activity {
        Activity::new(
            self.capacity.default_activity.as_str(),
            self.capacity.default_hours_per_day,
        )
    }

    /// Date normalizer in the configured order; empty means the default order
    pub fn date_normalizer(&self) -> DateNormalizer {
        if self.dates.formats.is_empty() {
            DateNormalizer::default()
        } else {
            DateNormalizer::new(self.dates.formats.clone())
        }
    }

    /// Due-date field chain; empty means the default chain
    pub fn due_date_policy(&self) -> DueDatePolicy {
        let fields = if self.dates.due_date_fields.is_empty() {
            DUE_DATE_FIELDS.iter().map(|f| f.to_string()).collect()
        } else {
            self.dates.due_date_fields.clone()
        };

        DueDatePolicy::new(fields, self.date_normalizer())
    }

    /// Rejects values the engine cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capacity.default_hours_per_day.is_finite() || self.capacity.default_hours_per_day < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "capacity.default_hours_per_day must be a non-negative number, got {}",
                self.capacity.default_hours_per_day
            )));
        }

        for developer in &self.developers {
            if developer.name.trim().is_empty() {
                return Err(ConfigError::Invalid("developer entry without a name".to_string()));
            }
            if let Some(activity) = developer
                .activities
                .iter()
                .find(|a| !a.capacity_per_day.is_finite() || a.capacity_per_day < 0.0)
            {
                return Err(ConfigError::Invalid(format!(
                    "activity '{}' for '{}' has invalid capacity_per_day {}",
                    activity.name, developer.name, activity.capacity_per_day
                )));
            }
        }

        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("dev", "sprintcap", "sprintcap").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        let project_root = Self::find_project_root();

        match project_root {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .validate()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for a `.sprintcap/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Walks up from `start` looking for a `.sprintcap/` directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a sprintcap project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Snapshot path from the project config, if a project is open
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        let root = self.project_root.as_ref()?;
        let relative = self
            .project
            .snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(PROJECT_DIR).join("snapshot.json"));
        Some(root.join(relative))
    }
}
