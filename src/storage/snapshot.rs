//! Upstream snapshot adapter
//!
//! A snapshot is a JSON export of team iterations, iteration membership and
//! work items as the issue tracker returns them: work item fields are an
//! untyped map. This module is the only place that reads those maps; it
//! turns them into [`Iteration`], [`UserStory`] and [`Task`] values.
//!
//! ```json
//! {
//!   "iterations": [
//!     { "id": "…", "name": "Sprint 1", "path": "Project\\Sprint 1",
//!       "attributes": { "startDate": "2024-06-03T00:00:00Z",
//!                       "finishDate": "2024-06-14T00:00:00Z" } }
//!   ],
//!   "iterationWorkItems": { "Sprint 1": [101, 102] },
//!   "workItems": [
//!     { "id": 101, "fields": { "System.WorkItemType": "User Story",
//!                              "System.Title": "Login page" } }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{
    count_tasks_by_developer, DateNormalizer, DueDate, DueDatePolicy, Iteration, Task,
    UserStory, TASK_TYPE, USER_STORY_TYPE,
};

pub const FIELD_WORK_ITEM_TYPE: &str = "System.WorkItemType";
pub const FIELD_TITLE: &str = "System.Title";
pub const FIELD_STATE: &str = "System.State";
pub const FIELD_DESCRIPTION: &str = "System.Description";
pub const FIELD_ASSIGNED_TO: &str = "System.AssignedTo";
pub const FIELD_PARENT: &str = "System.Parent";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    iterations: Vec<RawIteration>,

    #[serde(default)]
    iteration_work_items: HashMap<String, Vec<i64>>,

    #[serde(default)]
    work_items: Vec<RawWorkItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIteration {
    id: Option<String>,
    name: Option<String>,
    path: Option<String>,
    attributes: Option<RawAttributes>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttributes {
    start_date: Option<String>,
    finish_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawWorkItem {
    id: Option<i64>,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Reads a field as display text.
///
/// Strings are returned as-is, identity objects yield `displayName` then
/// `value`, other scalars their JSON text. Null or missing is `None`.
pub fn field_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    let text = match fields.get(name)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Object(obj) => match (obj.get("displayName"), obj.get("value")) {
            (Some(Value::String(display)), _) => display.clone(),
            (_, Some(Value::String(value))) => value.clone(),
            _ => Value::Object(obj.clone()).to_string(),
        },
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Typed view over an upstream export
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    iterations: Vec<Iteration>,
    membership: HashMap<String, Vec<i64>>,
    stories: Vec<UserStory>,
    tasks: Vec<Task>,
    warnings: Vec<String>,
}

impl Snapshot {
    /// Loads a snapshot file
    pub fn load(path: &Path, due_dates: &DueDatePolicy) -> Result<Self> {
        if !path.exists() {
            return Err(SnapshotError::NotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

        Self::from_json(&content, due_dates)
            .with_context(|| format!("Failed to load snapshot: {}", path.display()))
    }

    /// Parses a snapshot document
    pub fn from_json(content: &str, due_dates: &DueDatePolicy) -> Result<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(content).map_err(|e| SnapshotError::Invalid(e.to_string()))?;

        let mut snapshot = Self {
            membership: raw.iteration_work_items,
            ..Self::default()
        };

        for iteration in raw.iterations {
            let iteration = snapshot.convert_iteration(iteration, &due_dates.normalizer);
            snapshot.iterations.push(iteration);
        }

        for item in raw.work_items {
            snapshot.convert_work_item(item, due_dates);
        }

        Ok(snapshot)
    }

    fn convert_iteration(&mut self, raw: RawIteration, normalizer: &DateNormalizer) -> Iteration {
        let name = raw.name.unwrap_or_default();
        let mut iteration = Iteration::new(name);
        iteration.id = raw.id;
        iteration.path = raw.path;

        if let Some(attributes) = raw.attributes {
            iteration.start_date =
                self.iteration_date(&iteration.name, "startDate", attributes.start_date, normalizer);
            iteration.end_date =
                self.iteration_date(&iteration.name, "finishDate", attributes.finish_date, normalizer);
        }

        iteration
    }

    fn iteration_date(
        &mut self,
        iteration: &str,
        attribute: &str,
        raw: Option<String>,
        normalizer: &DateNormalizer,
    ) -> Option<crate::domain::Timestamp> {
        let raw = raw.filter(|s| !s.trim().is_empty())?;
        match normalizer.normalize(&raw) {
            Ok(date) => Some(date),
            Err(e) => {
                self.warnings
                    .push(format!("Iteration '{}' {}: {}", iteration, attribute, e));
                None
            }
        }
    }

    fn convert_work_item(&mut self, raw: RawWorkItem, due_dates: &DueDatePolicy) {
        let Some(id) = raw.id else {
            self.warnings.push("Skipped work item without an id".to_string());
            return;
        };

        let fields = &raw.fields;
        let work_item_type = field_text(fields, FIELD_WORK_ITEM_TYPE).unwrap_or_default();
        let title = field_text(fields, FIELD_TITLE).unwrap_or_default();
        let state = field_text(fields, FIELD_STATE).unwrap_or_default();

        if work_item_type == USER_STORY_TYPE {
            let due = due_dates.resolve(|name| field_text(fields, name));
            if let DueDate::Unparsable { field, raw, error } = &due {
                self.warnings
                    .push(format!("Work item #{} {} '{}': {}", id, field, raw, error));
            }

            self.stories.push(UserStory {
                id,
                title,
                work_item_type,
                state,
                due_date: due.date(),
            });
        } else if work_item_type == TASK_TYPE {
            let parent = field_text(fields, FIELD_PARENT).and_then(|p| p.trim().parse::<i64>().ok());

            self.tasks.push(Task {
                id,
                title,
                state,
                description: field_text(fields, FIELD_DESCRIPTION),
                assigned_to: field_text(fields, FIELD_ASSIGNED_TO),
                parent,
            });
        }
    }

    /// Iterations in upstream order
    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    /// Problems absorbed while converting records
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// User stories related to the sprint, in membership order
    pub fn stories_for_sprint(&self, sprint: &str) -> Vec<&UserStory> {
        let Some(ids) = self.membership.get(sprint) else {
            return Vec::new();
        };

        ids.iter()
            .filter_map(|id| self.stories.iter().find(|s| s.id == *id))
            .collect()
    }

    /// Tasks whose parent is `story_id`
    pub fn tasks_for_story(&self, story_id: i64) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.parent == Some(story_id))
            .collect()
    }

    /// Tasks under any user story of the sprint
    pub fn tasks_for_sprint(&self, sprint: &str) -> Vec<&Task> {
        let story_ids: HashSet<i64> = self
            .stories_for_sprint(sprint)
            .iter()
            .map(|s| s.id)
            .collect();

        self.tasks
            .iter()
            .filter(|t| t.parent.is_some_and(|p| story_ids.contains(&p)))
            .collect()
    }

    /// Assigned task counts per developer for the sprint
    pub fn task_counts_for_sprint(&self, sprint: &str) -> HashMap<String, u32> {
        count_tasks_by_developer(self.tasks_for_sprint(sprint))
    }
}
