// ABOUTME: Employee roster commands: list, create and junior-to-senior assignment

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::*;
use inquire::Password;
use taskdeck_client::EmployeeCreateInput;
use taskdeck_core::Role;

use super::signed_in_workspace;
use crate::output::{dash_if_empty, member_name, table};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Senior,
    Junior,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Senior => Role::Senior,
            RoleArg::Junior => Role::Junior,
        }
    }
}

#[derive(Subcommand)]
pub enum EmployeesCommands {
    /// List organization members
    List,
    /// Create an employee (owner only)
    Create {
        /// Employee name
        name: String,
        /// Employee email
        #[arg(short, long)]
        email: String,
        /// Role in the organization
        #[arg(short, long, value_enum)]
        role: RoleArg,
        /// Designation id; required
        #[arg(short, long)]
        designation: String,
        /// Manager id for a junior; must reference a senior
        #[arg(short, long)]
        manager: Option<String>,
    },
    /// Assign a junior under a senior (owner only)
    Assign {
        /// Junior user id
        junior: String,
        /// Senior user id to manage them
        #[arg(long)]
        manager: String,
    },
}

pub async fn handle(command: EmployeesCommands) -> Result<()> {
    match command {
        EmployeesCommands::List => list().await,
        EmployeesCommands::Create {
            name,
            email,
            role,
            designation,
            manager,
        } => create(name, email, role, designation, manager).await,
        EmployeesCommands::Assign { junior, manager } => assign(junior, manager).await,
    }
}

async fn list() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_org_users().await?;
    let _ = workspace.refresh_designations().await;

    let roster = workspace.org_users().await;
    if roster.is_empty() {
        println!("{}", "No members found".yellow());
        let banners = workspace.banners().await;
        if let Some(info) = banners.info() {
            println!("{}", info.dimmed());
        }
        return Ok(());
    }

    let designations = workspace.designations().await;
    let mut out = table(vec!["ID", "Name", "Email", "Role", "Designation", "Manager"]);
    for member in &roster {
        let designation = member
            .designation_id
            .as_deref()
            .and_then(|id| designations.iter().find(|d| d.id == id))
            .map(|d| d.name.clone());
        out.add_row(vec![
            member.id.clone(),
            member.name.clone(),
            member.email.clone(),
            member.role.as_str().to_string(),
            dash_if_empty(designation.as_deref()),
            member_name(member.manager_id.as_deref(), &roster),
        ]);
    }
    println!("{out}");
    println!("Total: {} members", roster.len().to_string().cyan());
    Ok(())
}

async fn create(
    name: String,
    email: String,
    role: RoleArg,
    designation: String,
    manager: Option<String>,
) -> Result<()> {
    let password = Password::new("Initial password:").prompt()?;

    let workspace = signed_in_workspace().await?;
    // Manager validation runs against the roster
    let _ = workspace.refresh_org_users().await;
    workspace
        .create_employee(EmployeeCreateInput {
            name,
            email,
            password,
            role: role.into(),
            designation_id: Some(designation),
            manager_id: manager,
        })
        .await?;

    println!("{}", "Employee created".green());
    Ok(())
}

async fn assign(junior: String, manager: String) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    let _ = workspace.refresh_org_users().await;
    workspace.assign_junior(&junior, &manager).await?;
    println!("{}", "Assignment updated".green());
    Ok(())
}
