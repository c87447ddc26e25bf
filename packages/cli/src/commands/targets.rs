// ABOUTME: Target commands: list with progress, create and status/progress updates

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::*;
use taskdeck_app::target_summary;
use taskdeck_client::TargetCreateInput;
use taskdeck_core::{TargetPeriod, TargetStatus};

use super::signed_in_workspace;
use crate::output::{dash_if_empty, table, truncate};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Week,
    Month,
    Quarter,
    Year,
}

impl From<PeriodArg> for TargetPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Week => TargetPeriod::Week,
            PeriodArg::Month => TargetPeriod::Month,
            PeriodArg::Quarter => TargetPeriod::Quarter,
            PeriodArg::Year => TargetPeriod::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetStatusArg {
    Open,
    InProgress,
    Done,
}

impl From<TargetStatusArg> for TargetStatus {
    fn from(value: TargetStatusArg) -> Self {
        match value {
            TargetStatusArg::Open => TargetStatus::Open,
            TargetStatusArg::InProgress => TargetStatus::InProgress,
            TargetStatusArg::Done => TargetStatus::Done,
        }
    }
}

#[derive(Subcommand)]
pub enum TargetsCommands {
    /// List targets with their progress
    List,
    /// Create a target (owner only)
    Create {
        /// Target title
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Planning period
        #[arg(short, long, value_enum)]
        period: PeriodArg,
        /// Due date (ISO)
        #[arg(long)]
        due: Option<String>,
    },
    /// Update a target's status and progress
    Update {
        /// Target id
        id: String,
        /// New status
        #[arg(short, long, value_enum)]
        status: TargetStatusArg,
        /// Progress percentage; values outside 0..=100 are clamped
        #[arg(short, long)]
        progress: Option<i64>,
    },
}

pub async fn handle(command: TargetsCommands) -> Result<()> {
    match command {
        TargetsCommands::List => list().await,
        TargetsCommands::Create {
            title,
            description,
            period,
            due,
        } => create(title, description, period, due).await,
        TargetsCommands::Update {
            id,
            status,
            progress,
        } => update(id, status, progress).await,
    }
}

async fn list() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_targets().await?;

    let targets = workspace.targets().await;
    if targets.is_empty() {
        println!("{}", "No targets found".yellow());
        return Ok(());
    }

    let mut out = table(vec!["ID", "Title", "Period", "Status", "Progress", "Due"]);
    for target in &targets {
        out.add_row(vec![
            target.id.clone(),
            truncate(&target.title, 30),
            format!("{:?}", target.period),
            format!("{:?}", target.status),
            format!("{}%", target.progress),
            dash_if_empty(target.due_date.as_deref()),
        ]);
    }
    println!("{out}");

    let summary = target_summary(&targets);
    println!(
        "Total: {}  Open: {}  In progress: {}  Done: {}",
        summary.total.to_string().cyan(),
        summary.open,
        summary.in_progress,
        summary.done
    );
    Ok(())
}

async fn create(
    title: String,
    description: Option<String>,
    period: PeriodArg,
    due: Option<String>,
) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace
        .create_target(TargetCreateInput {
            title,
            description,
            period: period.into(),
            due_date: due,
        })
        .await?;
    println!("{}", "Target created".green());
    Ok(())
}

async fn update(id: String, status: TargetStatusArg, progress: Option<i64>) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.update_target(&id, status.into(), progress).await?;
    println!("{}", "Target updated".green());
    Ok(())
}
