//! Sprint window command

use anyhow::{Context, Result};
use chrono::Utc;

use super::output::Output;
use super::session::Session;
use crate::domain::{select_window, Timestamp};

/// Show sprints around the current one
pub fn list(output: &Output, session: &Session, now: Option<&str>) -> Result<()> {
    let now: Timestamp = match now {
        Some(raw) => session
            .config
            .project
            .date_normalizer()
            .normalize(raw)
            .with_context(|| format!("Invalid --now value '{}'", raw))?,
        None => Utc::now().fixed_offset(),
    };
    output.verbose_ctx("sprints", &format!("Reference time: {}", now.to_rfc3339()));

    let window = select_window(session.snapshot.iterations(), &now);
    output.verbose_ctx(
        "sprints",
        &match window.current_sprint() {
            Some(sprint) => format!("Current sprint: {}", sprint.name),
            None => "No current sprint, showing the latest".to_string(),
        },
    );

    if output.is_json() {
        output.data(&window.entries());
    } else if window.is_empty() {
        println!("No sprints found.");
    } else {
        println!("Sprints ({}):", window.len());
        println!("  {:<30} {:<12} END", "NAME", "START");
        println!("{}", "-".repeat(58));
        for entry in window.entries() {
            let marker = if entry.is_current { "*" } else { " " };
            println!(
                "{} {:<30} {:<12} {}",
                marker,
                entry.name,
                format_date(entry.start_date),
                format_date(entry.end_date)
            );
        }
    }

    Ok(())
}

pub(super) fn format_date(date: Option<Timestamp>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
