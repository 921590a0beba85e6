//! Developer capacity command

use anyhow::Result;

use super::output::Output;
use super::session::Session;
use crate::domain::aggregate_with;

/// Show developer capacity for a sprint
pub fn report(output: &Output, session: &Session, sprint: &str) -> Result<()> {
    let iteration = session.sprint(sprint)?;
    let range = iteration.range();
    if !range.is_bounded() {
        output.warn(&format!(
            "Sprint '{}' has no start or end date; capacity will be zero",
            iteration.name
        ));
    }

    let project = &session.config.project;
    let (capacities, errors) = project.capacity_inputs();
    for error in &errors {
        output.warn(&format!("{}; using the default allocation", error));
    }
    output.verbose_ctx(
        "developers",
        &format!("{} developers configured", capacities.len()),
    );

    let task_counts = session.snapshot.task_counts_for_sprint(&iteration.name);
    output.verbose_ctx(
        "developers",
        &format!("{} developers with assigned tasks", task_counts.len()),
    );

    let summary = aggregate_with(&range, &task_counts, &capacities, &project.default_activity());

    if output.is_json() {
        output.data(&summary);
        return Ok(());
    }

    let show = |date: Option<chrono::NaiveDate>| {
        date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    };

    println!(
        "Capacity for {} ({} to {})",
        iteration.name,
        show(summary.sprint_start),
        show(summary.sprint_end)
    );
    println!();

    if summary.developers.is_empty() {
        println!("No developers with assigned tasks.");
    } else {
        println!(
            "{:<28} {:>6} {:>10} {:>9} {:>10}",
            "DEVELOPER", "TASKS", "HOURS/DAY", "DAYS OFF", "CAPACITY"
        );
        println!("{}", "-".repeat(67));
        for dev in &summary.developers {
            let marker = if dev.defaulted { "*" } else { "" };
            println!(
                "{:<28} {:>6} {:>10.1} {:>9} {:>10.1}",
                format!("{}{}", dev.name, marker),
                dev.tasks,
                dev.capacity_per_day,
                dev.days_off,
                dev.total_capacity
            );
        }
    }

    println!();
    println!("Working days:   {}", summary.working_days);
    println!("Days off:       {}", summary.total_days_off);
    println!("Total capacity: {:.1}h", summary.total_capacity);

    if summary.developers.iter().any(|d| d.defaulted) {
        println!();
        println!("* default allocation ({})", describe(&project.default_activity()));
    }

    Ok(())
}

fn describe(activity: &crate::domain::Activity) -> String {
    format!("{} {}h/day", activity.name, activity.capacity_per_day)
}
