//! Developer capacity aggregation for a sprint
//!
//! Capacity is hours per day, summed across a developer's activities,
//! multiplied by the working days they have in the sprint. Only developers
//! with assigned tasks appear in a [`SprintCapacitySummary`].

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::calendar::{DayOff, SprintRange};

/// Hours per day assumed for developers without capacity configuration
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Activity name used for the default allocation
pub const DEFAULT_ACTIVITY: &str = "Development";

#[derive(Debug, Error, PartialEq)]
pub enum CapacityError {
    #[error("Day off for '{developer}' has neither a start nor an end date")]
    MissingEndpoints { developer: String },

    #[error("Day off for '{developer}' ends ({end}) before it starts ({start})")]
    InvertedExclusion {
        developer: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl CapacityError {
    /// Returns the developer whose configuration was rejected
    pub fn developer(&self) -> &str {
        match self {
            CapacityError::MissingEndpoints { developer } => developer,
            CapacityError::InvertedExclusion { developer, .. } => developer,
        }
    }
}

/// A named share of a developer's day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    pub capacity_per_day: f64,
}

impl Activity {
    pub fn new(name: impl Into<String>, capacity_per_day: f64) -> Self {
        Self {
            name: name.into(),
            capacity_per_day,
        }
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY, DEFAULT_HOURS_PER_DAY)
    }
}

/// Capacity configuration for one developer
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperCapacityInput {
    pub name: String,
    pub activities: Vec<Activity>,
    pub days_off: Vec<DayOff>,
}

impl DeveloperCapacityInput {
    /// Creates an input with no activities and no days off
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activities: Vec::new(),
            days_off: Vec::new(),
        }
    }

    /// The allocation used when a developer has no configuration
    pub fn fallback(name: impl Into<String>, activity: &Activity) -> Self {
        Self::new(name).with_activity(activity.clone())
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn with_day_off(mut self, day_off: DayOff) -> Self {
        self.days_off.push(day_off);
        self
    }

    /// Adds a day off from possibly-missing endpoints.
    ///
    /// One missing endpoint makes a single-day exclusion. Both missing, or
    /// an end before the start, is rejected.
    pub fn add_day_off(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<(), CapacityError> {
        let day_off = match (start, end) {
            (Some(start), Some(end)) if start > end => {
                return Err(CapacityError::InvertedExclusion {
                    developer: self.name.clone(),
                    start,
                    end,
                })
            }
            (Some(start), Some(end)) => DayOff::new(start, end),
            (Some(day), None) | (None, Some(day)) => DayOff::single(day),
            (None, None) => {
                return Err(CapacityError::MissingEndpoints {
                    developer: self.name.clone(),
                })
            }
        };

        self.days_off.push(day_off);
        Ok(())
    }

    /// Sum of all activity allocations
    pub fn daily_capacity_hours(&self) -> f64 {
        self.activities.iter().map(|a| a.capacity_per_day).sum()
    }
}

/// Computed capacity for one developer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperCapacity {
    pub name: String,

    /// Tasks assigned in the sprint
    pub tasks: u32,

    /// Hours per day across all activities
    pub capacity_per_day: f64,

    /// Number of declared day-off intervals (not days)
    pub days_off: u32,

    /// Working days in the sprint times `capacity_per_day`
    pub total_capacity: f64,

    /// True when the default allocation was used
    pub defaulted: bool,
}

/// Team capacity for a sprint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintCapacitySummary {
    pub developers: Vec<DeveloperCapacity>,
    pub sprint_start: Option<NaiveDate>,
    pub sprint_end: Option<NaiveDate>,
    pub total_capacity: f64,
    pub total_days_off: u32,

    /// Weekdays in the sprint, ignoring everyone's days off
    pub working_days: u32,
}

/// Aggregates capacity using the default 8h development allocation for
/// developers missing from `capacities`
pub fn aggregate(
    range: &SprintRange,
    task_counts: &HashMap<String, u32>,
    capacities: &HashMap<String, DeveloperCapacityInput>,
) -> SprintCapacitySummary {
    aggregate_with(range, task_counts, capacities, &Activity::default())
}

/// Aggregates capacity, falling back to `default_activity` for developers
/// missing from `capacities`
pub fn aggregate_with(
    range: &SprintRange,
    task_counts: &HashMap<String, u32>,
    capacities: &HashMap<String, DeveloperCapacityInput>,
    default_activity: &Activity,
) -> SprintCapacitySummary {
    let mut developers: Vec<DeveloperCapacity> = task_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(name, count)| match capacities.get(name) {
            Some(input) => developer_capacity(range, name, *count, input, false),
            None => {
                let fallback = DeveloperCapacityInput::fallback(name.as_str(), default_activity);
                developer_capacity(range, name, *count, &fallback, true)
            }
        })
        .collect();

    developers.sort_by(|a, b| a.name.cmp(&b.name));

    let total_capacity = developers.iter().map(|d| d.total_capacity).sum();
    let total_days_off = developers.iter().map(|d| d.days_off).sum();

    SprintCapacitySummary {
        developers,
        sprint_start: range.start,
        sprint_end: range.end,
        total_capacity,
        total_days_off,
        working_days: range.working_days(&[]),
    }
}

fn developer_capacity(
    range: &SprintRange,
    name: &str,
    tasks: u32,
    input: &DeveloperCapacityInput,
    defaulted: bool,
) -> DeveloperCapacity {
    let capacity_per_day = input.daily_capacity_hours();
    let working_days = range.working_days(&input.days_off);

    DeveloperCapacity {
        name: name.to_string(),
        tasks,
        capacity_per_day,
        days_off: input.days_off.len() as u32,
        total_capacity: f64::from(working_days) * capacity_per_day,
        defaulted,
    }
}
