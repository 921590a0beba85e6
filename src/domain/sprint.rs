//! Sprint (iteration) model and current-sprint window selection
//!
//! Iterations arrive in upstream order, assumed chronological. The dashboard
//! shows a window of at most seven of them: three either side of the current
//! sprint, or the last seven when no sprint is current.

use serde::{Deserialize, Serialize};

use super::calendar::SprintRange;
use super::date::Timestamp;

/// Sprints shown before the current one
pub const WINDOW_BEFORE: usize = 3;

/// Sprints shown after the current one
pub const WINDOW_AFTER: usize = 3;

/// Sprints shown when none is current
pub const FALLBACK_WINDOW: usize = 7;

/// A named, time-boxed work period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub start_date: Option<Timestamp>,

    #[serde(default)]
    pub end_date: Option<Timestamp>,
}

impl Iteration {
    /// Creates an undated iteration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            path: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets both dates
    pub fn with_dates(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Returns true unless the name is empty or blank
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Returns true if both dates are set and `now` is in `[start, end)`
    pub fn is_current_at(&self, now: &Timestamp) -> bool {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => start <= now && now < end,
            _ => false,
        }
    }

    /// Calendar dates of the iteration in its own offset
    pub fn range(&self) -> SprintRange {
        SprintRange::new(
            self.start_date.map(|d| d.date_naive()),
            self.end_date.map(|d| d.date_naive()),
        )
    }
}

/// A contiguous run of iterations chosen for display
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SprintWindow {
    pub sprints: Vec<Iteration>,

    /// Index of the current sprint within `sprints`
    pub current: Option<usize>,
}

/// One row of a rendered [`SprintWindow`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_current: bool,
}

impl SprintWindow {
    pub fn is_empty(&self) -> bool {
        self.sprints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sprints.len()
    }

    /// Returns the current sprint, if one is in the window
    pub fn current_sprint(&self) -> Option<&Iteration> {
        self.current.and_then(|i| self.sprints.get(i))
    }

    /// Flattens the window into rows carrying an `is_current` flag
    pub fn entries(&self) -> Vec<SprintEntry> {
        self.sprints
            .iter()
            .enumerate()
            .map(|(i, sprint)| SprintEntry {
                id: sprint.id.clone(),
                name: sprint.name.clone(),
                start_date: sprint.start_date,
                end_date: sprint.end_date,
                is_current: self.current == Some(i),
            })
            .collect()
    }
}

/// Selects the display window around the sprint current at `now`.
///
/// Nameless iterations are dropped first. The first iteration whose
/// `[start, end)` contains `now` is current, even if later ones overlap.
pub fn select_window(iterations: &[Iteration], now: &Timestamp) -> SprintWindow {
    let named: Vec<&Iteration> = iterations.iter().filter(|it| it.has_name()).collect();
    let current = named.iter().position(|it| it.is_current_at(now));

    let (from, to) = match current {
        Some(i) => (
            i.saturating_sub(WINDOW_BEFORE),
            (i + WINDOW_AFTER + 1).min(named.len()),
        ),
        None => (named.len().saturating_sub(FALLBACK_WINDOW), named.len()),
    };

    SprintWindow {
        sprints: named[from..to].iter().map(|it| (*it).clone()).collect(),
        current: current.map(|i| i - from),
    }
}

/// Finds the first iteration named exactly `name`
pub fn find_by_name<'a>(iterations: &'a [Iteration], name: &str) -> Option<&'a Iteration> {
    iterations.iter().find(|it| it.name == name)
}
