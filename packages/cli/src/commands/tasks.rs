// ABOUTME: Task board commands: list with server-side filtering, create with policy gate

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::*;
use taskdeck_app::{task_totals, Workspace};
use taskdeck_client::{TaskCreateInput, TaskFilter};
use taskdeck_core::TaskStatus;

use super::signed_in_workspace;
use crate::output::{member_name, table, truncate};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

#[derive(Subcommand)]
pub enum TasksCommands {
    /// List tasks, optionally filtered by status or a search term
    List {
        /// Only show tasks in this column
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Server-side title search
        #[arg(long)]
        search: Option<String>,
        /// Only show tasks assigned to me
        #[arg(long)]
        mine: bool,
    },
    /// Create a task (owner or senior only)
    Create {
        /// Task title
        title: String,
        /// Due date (ISO, e.g. 2026-09-01)
        #[arg(long)]
        due: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Priority from 1 (low) to 5 (high)
        #[arg(short, long)]
        priority: Option<u8>,
        /// Assignee user id; must be one of your juniors
        #[arg(long)]
        assign: Option<String>,
        /// Parent task id for a subtask
        #[arg(long)]
        parent: Option<String>,
        /// Estimated hours
        #[arg(long)]
        hours: Option<f64>,
    },
}

pub async fn handle(command: TasksCommands) -> Result<()> {
    match command {
        TasksCommands::List {
            status,
            search,
            mine,
        } => list(status, search, mine).await,
        TasksCommands::Create {
            title,
            due,
            description,
            priority,
            assign,
            parent,
            hours,
        } => {
            create(TaskCreateInput {
                title,
                description,
                due_date: due,
                priority,
                status: TaskStatus::Todo,
                assigned_to: assign,
                parent_task_id: parent,
                estimated_hours: hours,
            })
            .await
        }
    }
}

async fn list(status: Option<StatusArg>, search: Option<String>, mine: bool) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    let filter = TaskFilter {
        status: status.map(Into::into),
        search,
    };
    workspace.refresh_tasks(filter).await?;
    let _ = workspace.refresh_org_users().await;

    let mut tasks = workspace.tasks().await;
    if mine {
        if let Some(user) = workspace.user().await {
            tasks.retain(|t| t.assigned_to.as_deref() == Some(user.id.as_str()));
        }
    }

    if tasks.is_empty() {
        println!("{}", "No tasks found".yellow());
        return Ok(());
    }

    let roster = workspace.org_users().await;
    let mut out = table(vec!["ID", "Title", "Status", "Due", "Priority", "Assignee"]);
    for task in &tasks {
        out.add_row(vec![
            task.id.clone(),
            truncate(&task.title, 30),
            status_label(task.status).to_string(),
            task.due_date.clone(),
            task.priority.map_or("—".to_string(), |p| p.to_string()),
            member_name(task.assigned_to.as_deref(), &roster),
        ]);
    }
    println!("{out}");

    let totals = task_totals(&tasks);
    println!(
        "Total: {}  Open: {}  Completed: {}",
        totals.total.to_string().cyan(),
        totals.open,
        totals.completed
    );
    print_banners(&workspace).await;
    Ok(())
}

async fn create(input: TaskCreateInput) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    // The assignable set comes from the roster
    let _ = workspace.refresh_org_users().await;
    workspace.create_task(input).await?;
    println!("{}", "Task created".green());
    Ok(())
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "To do",
        TaskStatus::InProgress => "In progress",
        TaskStatus::Done => "Done",
    }
}

async fn print_banners(workspace: &Workspace) {
    let banners = workspace.banners().await;
    if let Some(info) = banners.info() {
        println!("{}", info.dimmed());
    }
}
