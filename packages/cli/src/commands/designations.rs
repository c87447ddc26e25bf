// ABOUTME: Designation commands: list the org's designations, create new ones

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::*;
use taskdeck_client::DesignationCreateInput;
use taskdeck_core::DesignationRole;

use super::signed_in_workspace;
use crate::output::{dash_if_empty, table};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DesignationRoleArg {
    Senior,
    Junior,
    MidLevel,
    Fresher,
}

impl From<DesignationRoleArg> for DesignationRole {
    fn from(value: DesignationRoleArg) -> Self {
        match value {
            DesignationRoleArg::Senior => DesignationRole::Senior,
            DesignationRoleArg::Junior => DesignationRole::Junior,
            DesignationRoleArg::MidLevel => DesignationRole::MidLevel,
            DesignationRoleArg::Fresher => DesignationRole::Fresher,
        }
    }
}

#[derive(Subcommand)]
pub enum DesignationsCommands {
    /// List designations
    List,
    /// Create a designation (owner only)
    Create {
        /// Designation name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Seniority level of the designation
        #[arg(short, long, value_enum)]
        role: DesignationRoleArg,
    },
}

pub async fn handle(command: DesignationsCommands) -> Result<()> {
    match command {
        DesignationsCommands::List => list().await,
        DesignationsCommands::Create {
            name,
            description,
            role,
        } => create(name, description, role).await,
    }
}

async fn list() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_designations().await?;

    let designations = workspace.designations().await;
    if designations.is_empty() {
        println!("{}", "No designations found".yellow());
        let banners = workspace.banners().await;
        if let Some(info) = banners.info() {
            println!("{}", info.dimmed());
        }
        return Ok(());
    }

    let mut out = table(vec!["ID", "Name", "Role", "Description"]);
    for designation in &designations {
        out.add_row(vec![
            designation.id.clone(),
            designation.name.clone(),
            format!("{:?}", designation.role),
            dash_if_empty(designation.description.as_deref()),
        ]);
    }
    println!("{out}");
    Ok(())
}

async fn create(
    name: String,
    description: Option<String>,
    role: DesignationRoleArg,
) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace
        .create_designation(DesignationCreateInput {
            name,
            description,
            role: role.into(),
        })
        .await?;
    println!("{}", "Designation created".green());
    Ok(())
}
