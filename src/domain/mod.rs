//! Domain models for sprintcap
//!
//! Contains the sprint, calendar and capacity logic without any I/O concerns.

mod calendar;
mod capacity;
mod date;
mod sprint;
mod work_item;

pub use calendar::{is_weekend, working_days, DayOff, SprintRange};
pub use capacity::{
    aggregate, aggregate_with, Activity, CapacityError, DeveloperCapacity,
    DeveloperCapacityInput, SprintCapacitySummary, DEFAULT_ACTIVITY, DEFAULT_HOURS_PER_DAY,
};
pub use date::{normalize, DateError, DateFormat, DateNormalizer, Timestamp};
pub use sprint::{
    find_by_name, select_window, Iteration, SprintEntry, SprintWindow, FALLBACK_WINDOW,
    WINDOW_AFTER, WINDOW_BEFORE,
};
pub use work_item::{
    count_tasks_by_developer, DueDate, DueDatePolicy, Task, UserStory, DUE_DATE_FIELDS,
    TASK_TYPE, USER_STORY_TYPE,
};
