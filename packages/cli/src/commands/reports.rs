// ABOUTME: Report lifecycle commands: request from a junior, submit, review with a grade

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use taskdeck_core::ReportStatus;

use super::signed_in_workspace;
use crate::output::{member_name, table, truncate};

#[derive(Subcommand)]
pub enum ReportsCommands {
    /// List reports visible to you
    List,
    /// Request a report from one of your juniors
    Request {
        /// Responder user id
        responder: String,
        /// What the report should cover
        #[arg(short, long)]
        message: String,
        /// Related task id
        #[arg(long)]
        task: Option<String>,
    },
    /// Submit a response to a requested report
    Submit {
        /// Report id
        id: String,
        /// Response text
        #[arg(short, long)]
        message: String,
    },
    /// Review a submitted report with a grade
    Review {
        /// Report id
        id: String,
        /// Numeric grade
        #[arg(short, long)]
        grade: f64,
    },
}

pub async fn handle(command: ReportsCommands) -> Result<()> {
    match command {
        ReportsCommands::List => list().await,
        ReportsCommands::Request {
            responder,
            message,
            task,
        } => request(responder, message, task).await,
        ReportsCommands::Submit { id, message } => submit(id, message).await,
        ReportsCommands::Review { id, grade } => review(id, grade).await,
    }
}

async fn list() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_reports().await?;
    let _ = workspace.refresh_org_users().await;

    let reports = workspace.reports().await;
    if reports.is_empty() {
        println!("{}", "No reports found".yellow());
        return Ok(());
    }

    let roster = workspace.org_users().await;
    let mut out = table(vec![
        "ID",
        "Requester",
        "Responder",
        "Status",
        "Request",
        "Grade",
    ]);
    for report in &reports {
        out.add_row(vec![
            report.id.clone(),
            member_name(Some(&report.requester_id), &roster),
            member_name(Some(&report.responder_id), &roster),
            status_label(report.status).to_string(),
            truncate(&report.request_message, 40),
            report.grade.map_or("—".to_string(), |g| g.to_string()),
        ]);
    }
    println!("{out}");
    Ok(())
}

async fn request(responder: String, message: String, task: Option<String>) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    // Requests are only valid towards the caller's own juniors
    let _ = workspace.refresh_org_users().await;
    workspace.request_report(&responder, &message, task).await?;
    println!("{}", "Report requested".green());
    Ok(())
}

async fn submit(id: String, message: String) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_reports().await?;
    workspace.submit_report(&id, &message).await?;
    println!("{}", "Report submitted".green());
    Ok(())
}

async fn review(id: String, grade: f64) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_reports().await?;
    workspace.review_report(&id, grade).await?;
    println!("{}", "Report reviewed".green());
    Ok(())
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Requested => "Requested",
        ReportStatus::Submitted => "Submitted",
        ReportStatus::Reviewed => "Reviewed",
    }
}
