//! User story and task commands

use anyhow::Result;

use super::output::Output;
use super::session::Session;
use super::sprints::format_date;

/// Show user stories of a sprint
pub fn list(output: &Output, session: &Session, sprint: &str) -> Result<()> {
    let iteration = session.sprint(sprint)?;
    let stories = session.snapshot.stories_for_sprint(&iteration.name);
    output.verbose_ctx("stories", &format!("Found {} user stories", stories.len()));

    if output.is_json() {
        output.data(&stories);
    } else if stories.is_empty() {
        println!("No user stories in {}.", iteration.name);
    } else {
        println!("User stories in {} ({}):", iteration.name, stories.len());
        println!("{:<8} {:<12} {:<12} TITLE", "ID", "STATE", "DUE");
        println!("{}", "-".repeat(70));
        for story in stories {
            println!(
                "{:<8} {:<12} {:<12} {}",
                story.id,
                story.state,
                format_date(story.due_date),
                story.title
            );
        }
    }

    Ok(())
}

/// Show tasks of a user story
pub fn tasks(output: &Output, session: &Session, story_id: i64) -> Result<()> {
    let tasks = session.snapshot.tasks_for_story(story_id);
    output.verbose_ctx("tasks", &format!("Found {} tasks for #{}", tasks.len(), story_id));

    if output.is_json() {
        output.data(&tasks);
    } else if tasks.is_empty() {
        println!("No tasks for user story #{}.", story_id);
    } else {
        println!("Tasks for #{} ({}):", story_id, tasks.len());
        println!("{:<8} {:<12} {:<24} TITLE", "ID", "STATE", "ASSIGNED TO");
        println!("{}", "-".repeat(70));
        for task in tasks {
            println!(
                "{:<8} {:<12} {:<24} {}",
                task.id,
                task.state,
                task.assignee().unwrap_or("-"),
                task.title
            );
        }
    }

    Ok(())
}
