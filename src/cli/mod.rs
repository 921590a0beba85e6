//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create `.sprintcap/` with a default config |
//! | `sprints` | Sprint window around the current sprint |
//! | `stories --sprint NAME` | User stories with due dates |
//! | `tasks STORY_ID` | Tasks under a user story |
//! | `developers --sprint NAME` | Developer capacity report |
//! | `parse-date RAW` | Normalize a date string |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON for the dashboard
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! sprintcap --verbose developers --sprint "Sprint 12"
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod dates;
mod developers;
mod output;
mod session;
mod sprints;
mod stories;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use session::{Session, SessionError};
