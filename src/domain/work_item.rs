//! User stories and tasks from the issue tracker
//!
//! Stories carry an optional due date found by walking an ordered list of
//! field names; tasks hang off a story through their parent id.

use std::collections::HashMap;

use serde::Serialize;

use super::date::{DateError, DateFormat, DateNormalizer, Timestamp};

/// Work item type of a user story
pub const USER_STORY_TYPE: &str = "User Story";

/// Work item type of a task
pub const TASK_TYPE: &str = "Task";

/// Fields checked for a story's due date, in order
pub const DUE_DATE_FIELDS: [&str; 3] = [
    "Microsoft.VSTS.Scheduling.DueDate",
    "Microsoft.VSTS.Scheduling.TargetDate",
    "Microsoft.VSTS.Common.DueDate",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub work_item_type: String,
    pub state: String,
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
}

impl Task {
    /// Returns the assignee if it is non-blank
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Outcome of looking for a due date on a work item
#[derive(Debug, Clone, PartialEq)]
pub enum DueDate {
    /// A field held a parsable date
    Found {
        field: String,
        date: Timestamp,
        format: DateFormat,
    },
    /// The first non-empty field could not be parsed
    Unparsable {
        field: String,
        raw: String,
        error: DateError,
    },
    /// None of the fields had a value
    Missing,
}

impl DueDate {
    /// The parsed date, if any
    pub fn date(&self) -> Option<Timestamp> {
        match self {
            DueDate::Found { date, .. } => Some(*date),
            _ => None,
        }
    }
}

/// Which fields to read a due date from, and how to parse it
#[derive(Debug, Clone, PartialEq)]
pub struct DueDatePolicy {
    pub fields: Vec<String>,
    pub normalizer: DateNormalizer,
}

impl Default for DueDatePolicy {
    fn default() -> Self {
        Self {
            fields: DUE_DATE_FIELDS.iter().map(|f| f.to_string()).collect(),
            normalizer: DateNormalizer::default(),
        }
    }
}

impl DueDatePolicy {
    pub fn new(fields: Vec<String>, normalizer: DateNormalizer) -> Self {
        Self { fields, normalizer }
    }

    /// Resolves a due date from `lookup`, which returns a field's text.
    ///
    /// The first field with a non-blank value decides the outcome; later
    /// fields are not consulted even if that value fails to parse.
    pub fn resolve<F>(&self, lookup: F) -> DueDate
    where
        F: Fn(&str) -> Option<String>,
    {
        let hit = self.fields.iter().find_map(|field| {
            lookup(field)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (field, value))
        });

        match hit {
            Some((field, raw)) => match self.normalizer.normalize_with_format(&raw) {
                Ok((date, format)) => DueDate::Found {
                    field: field.clone(),
                    date,
                    format,
                },
                Err(error) => DueDate::Unparsable {
                    field: field.clone(),
                    raw,
                    error,
                },
            },
            None => DueDate::Missing,
        }
    }
}

/// Counts tasks per assignee, skipping unassigned tasks
pub fn count_tasks_by_developer<'a, I>(tasks: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut counts = HashMap::new();
    for name in tasks.into_iter().filter_map(Task::assignee) {
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
    counts
}
