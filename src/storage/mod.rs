//! # Storage Layer
//!
//! Everything that touches the filesystem: the project directory, its
//! configuration, and snapshots exported from the issue tracker.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `.sprintcap/config.toml` |
//! | Global config | TOML | `~/.config/sprintcap/config.toml` |
//! | Snapshot | JSON (upstream export) | `.sprintcap/snapshot.json` or `--input` |
//!
//! ## Project Structure
//!
//! ```text
//! .sprintcap/
//! ├── config.toml           # Capacity, date and snapshot settings
//! ├── snapshot.json         # Upstream export (not versioned)
//! └── .gitignore
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a sprintcap project
//! - [`Config`] - Project and global configuration
//! - [`Snapshot`] - Typed view over an upstream export

mod config;
mod project;
mod snapshot;

pub use config::{
    ActivityConfig, CapacityConfig, Config, ConfigError, DatesConfig, DayOffConfig,
    DeveloperConfig, GlobalConfig, ProjectConfig, CONFIG_DIR_ENV, PROJECT_DIR,
};
pub use project::{Project, ProjectError};
pub use snapshot::{field_text, Snapshot, SnapshotError};
