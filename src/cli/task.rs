//! td task command implementations
//!
//! Every mutating command goes through the dashboard view-model, so the
//! CLI follows the same reload-after-mutation rule as the interactive UI.

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{Filter, Task, TaskCounts};

use super::Context;

#[derive(serde::Serialize)]
struct ListReport<'a> {
    filter: Filter,
    counts: TaskCounts,
    tasks: Vec<&'a Task>,
}

#[derive(serde::Serialize)]
struct MutationReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a Task>,
    counts: TaskCounts,
}

fn dashboard(ctx: &Context) -> Result<Dashboard> {
    let session = ctx.session()?;
    let token = session.require_token()?.to_string();
    let mut dashboard = Dashboard::new(ctx.api.clone(), token);
    dashboard.load()?;
    Ok(dashboard)
}

fn options(ctx: &Context) -> OutputOptions {
    OutputOptions {
        json: ctx.json,
        quiet: ctx.quiet,
    }
}

fn describe(task: &Task) -> String {
    let marker = if task.is_completed() { "x" } else { " " };
    match task.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("[{marker}] {}  {} - {description}", task.id, task.title),
        None => format!("[{marker}] {}  {}", task.id, task.title),
    }
}

pub fn run_ls(ctx: &Context, filter: Filter) -> Result<()> {
    let mut board = dashboard(ctx)?;
    board.set_filter(filter);

    let counts = board.counts();
    let visible = board.visible();

    let mut human = HumanOutput::new(format!(
        "td task ls: {} ({} shown)",
        filter.label(),
        visible.len()
    ));
    human.push_summary("total", counts.total.to_string());
    human.push_summary("pending", counts.pending.to_string());
    human.push_summary("completed", counts.completed.to_string());
    if visible.is_empty() {
        human.push_detail("No tasks found");
    }
    for task in &visible {
        human.push_detail(describe(task));
    }

    emit_success(
        options(ctx),
        "task ls",
        &ListReport {
            filter,
            counts,
            tasks: visible.clone(),
        },
        Some(&human),
    )
}

pub fn run_add(ctx: &Context, title: &str, description: &str) -> Result<()> {
    let mut board = dashboard(ctx)?;
    board.create(title, description)?;

    let created = board
        .tasks()
        .iter()
        .find(|task| task.title == title.trim());
    let mut human = HumanOutput::new(format!("td task add: created '{}'", title.trim()));
    if let Some(task) = created {
        human.push_summary("id", task.id.clone());
        human.push_summary("status", task.status.to_string());
    }

    emit_success(
        options(ctx),
        "task add",
        &MutationReport {
            task: created,
            counts: board.counts(),
        },
        Some(&human),
    )
}

pub fn run_edit(
    ctx: &Context,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let mut board = dashboard(ctx)?;

    // Seed the draft from the cached task so a partial edit keeps the
    // other field, then save through the single edit slot.
    board.start_edit(id)?;
    if let Some(slot) = board.edit_mut() {
        if let Some(title) = title {
            slot.title = title.to_string();
        }
        if let Some(description) = description {
            slot.description = description.to_string();
        }
    }
    board.save_edit()?;

    let task = board.task_by_id(id);
    let mut human = HumanOutput::new(format!("td task edit: updated {id}"));
    if let Some(task) = task {
        human.push_summary("title", task.title.clone());
        if let Some(description) = task.description.as_deref() {
            human.push_summary("description", description);
        }
    }

    emit_success(
        options(ctx),
        "task edit",
        &MutationReport {
            task,
            counts: board.counts(),
        },
        Some(&human),
    )
}

pub fn run_toggle(ctx: &Context, id: &str) -> Result<()> {
    let mut board = dashboard(ctx)?;
    board.toggle(id)?;

    let task = board.task_by_id(id);
    let status = task
        .map(|task| task.status.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let mut human = HumanOutput::new(format!("td task toggle: {id} is now {status}"));
    if let Some(task) = task {
        human.push_detail(describe(task));
    }

    emit_success(
        options(ctx),
        "task toggle",
        &MutationReport {
            task,
            counts: board.counts(),
        },
        Some(&human),
    )
}

pub fn run_rm(ctx: &Context, id: &str) -> Result<()> {
    let mut board = dashboard(ctx)?;
    board.delete(id)?;

    let counts = board.counts();
    let mut human = HumanOutput::new(format!("td task rm: deleted {id}"));
    human.push_summary("remaining", counts.total.to_string());

    emit_success(
        options(ctx),
        "task rm",
        &MutationReport { task: None, counts },
        Some(&human),
    )
}

pub fn run_stats(ctx: &Context) -> Result<()> {
    let board = dashboard(ctx)?;
    let counts = board.counts();

    let mut human = HumanOutput::new("td task stats");
    human.push_summary("total", counts.total.to_string());
    human.push_summary("pending", counts.pending.to_string());
    human.push_summary("completed", counts.completed.to_string());

    emit_success(options(ctx), "task stats", &counts, Some(&human))
}
