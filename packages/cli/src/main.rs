// ABOUTME: Taskdeck command-line entry point
// ABOUTME: Parses the subcommand tree and dispatches to the command handlers

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::auth::{self, LoginArgs, RegisterArgs};
use commands::chat::ChatCommands;
use commands::designations::DesignationsCommands;
use commands::employees::EmployeesCommands;
use commands::reports::ReportsCommands;
use commands::summary;
use commands::targets::TargetsCommands;
use commands::tasks::TasksCommands;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck CLI - organizational task management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new owner and organization
    Register(RegisterArgs),
    /// Log in and store the session
    Login(LoginArgs),
    /// Log out and remove the stored session
    Logout,
    /// Show who is logged in
    Status,
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommands),
    /// Manage employees
    #[command(subcommand)]
    Employees(EmployeesCommands),
    /// Manage designations
    #[command(subcommand)]
    Designations(DesignationsCommands),
    /// Manage targets
    #[command(subcommand)]
    Targets(TargetsCommands),
    /// Organization chat
    #[command(subcommand)]
    Chat(ChatCommands),
    /// Request, submit and review reports
    #[command(subcommand)]
    Reports(ReportsCommands),
    /// Show the organization-wide task summary (owner only)
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Register(args) => auth::register(args).await,
        Commands::Login(args) => auth::login(args).await,
        Commands::Logout => auth::logout().await,
        Commands::Status => auth::status().await,
        Commands::Tasks(command) => commands::tasks::handle(command).await,
        Commands::Employees(command) => commands::employees::handle(command).await,
        Commands::Designations(command) => commands::designations::handle(command).await,
        Commands::Targets(command) => commands::targets::handle(command).await,
        Commands::Chat(command) => commands::chat::handle(command).await,
        Commands::Reports(command) => commands::reports::handle(command).await,
        Commands::Summary => summary::show().await,
    }
}
