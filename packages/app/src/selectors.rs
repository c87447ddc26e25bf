// ABOUTME: Pure selectors derived from collection snapshots
// ABOUTME: Board grouping, tallies, per-user lookup and target summaries

use std::collections::HashMap;

use taskdeck_core::{OrgUser, Target, TargetStatus, Task, TaskStatus};

/// Tasks split into the three board columns, preserving server order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedTasks {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

pub fn grouped_tasks(tasks: &[Task]) -> GroupedTasks {
    let mut grouped = GroupedTasks::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => grouped.todo.push(task.clone()),
            TaskStatus::InProgress => grouped.in_progress.push(task.clone()),
            TaskStatus::Done => grouped.done.push(task.clone()),
        }
    }
    grouped
}

/// Open/completed/total tallies for the task board header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskTotals {
    pub open: usize,
    pub completed: usize,
    pub total: usize,
}

pub fn task_totals(tasks: &[Task]) -> TaskTotals {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.is_done()).count();
    TaskTotals {
        open: total - completed,
        completed,
        total,
    }
}

/// Tasks assigned to the given user
pub fn my_tasks<'a>(user_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.assigned_to.as_deref() == Some(user_id))
        .collect()
}

/// Id-to-member lookup for rendering names
pub fn user_map(org_users: &[OrgUser]) -> HashMap<&str, &OrgUser> {
    org_users.iter().map(|u| (u.id.as_str(), u)).collect()
}

/// Target tallies by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub done: usize,
}

pub fn target_summary(targets: &[Target]) -> TargetSummary {
    let mut summary = TargetSummary {
        total: targets.len(),
        ..TargetSummary::default()
    };
    for target in targets {
        match target.status {
            TargetStatus::Open => summary.open += 1,
            TargetStatus::InProgress => summary.in_progress += 1,
            TargetStatus::Done => summary.done += 1,
        }
    }
    summary
}
