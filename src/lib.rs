//! sprintcap - sprint, story and developer-capacity views
//!
//! Reads iterations and work items exported from an issue tracker and
//! computes what a sprint dashboard shows: the window of sprints around the
//! current one, user stories with normalized due dates, and per-developer
//! working capacity accounting for weekends and days off.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    aggregate, normalize, select_window, working_days, DayOff, DeveloperCapacityInput, Iteration,
    SprintCapacitySummary, SprintRange, SprintWindow,
};
