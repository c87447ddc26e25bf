// ABOUTME: Register, login, logout and status commands

use anyhow::Result;
use clap::Args;
use colored::*;
use inquire::{Password, Text};

use super::{signed_in_workspace, workspace};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Owner email
    #[arg(short, long)]
    pub email: Option<String>,
    /// Owner display name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Organization name
    #[arg(short, long)]
    pub org: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: Option<String>,
}

pub async fn register(args: RegisterArgs) -> Result<()> {
    println!("{}", "Register a new organization".blue().bold());
    println!();

    let email = match args.email {
        Some(e) => e,
        None => Text::new("Email:").prompt()?,
    };
    let name = match args.name {
        Some(n) => n,
        None => Text::new("Your name:").prompt()?,
    };
    let org = match args.org {
        Some(o) => o,
        None => Text::new("Organization name:").prompt()?,
    };
    let password = Password::new("Password:").prompt()?;

    let workspace = workspace().await?;
    workspace.register(&email, &password, &name, &org).await?;

    println!("{}", "Registered! Please login.".green());
    Ok(())
}

pub async fn login(args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(e) => e,
        None => Text::new("Email:").prompt()?,
    };
    let password = Password::new("Password:").without_confirmation().prompt()?;

    let workspace = workspace().await?;
    let user = workspace.login(&email, &password).await?;

    println!(
        "{} {} ({})",
        "Logged in as".green(),
        user.name.bold(),
        user.role.as_str()
    );
    Ok(())
}

pub async fn logout() -> Result<()> {
    let workspace = workspace().await?;
    workspace.logout().await?;
    println!("{}", "Logged out".green());
    Ok(())
}

pub async fn status() -> Result<()> {
    let workspace = workspace().await?;
    match workspace.user().await {
        Some(user) => {
            println!("{}", "Session".blue().bold());
            println!("  Name:  {}", user.name);
            println!("  Email: {}", user.email);
            println!("  Role:  {}", user.role.as_str());
            println!("  Org:   {}", user.org_id);
        }
        None if workspace.is_authenticated().await => {
            // Token restored but the stored profile was unreadable
            println!("{}", "Logged in (profile unavailable)".yellow());
        }
        None => {
            println!("{}", "Not logged in".yellow());
        }
    }
    Ok(())
}
