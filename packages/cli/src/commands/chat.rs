// ABOUTME: Organization chat: list the feed and send broadcast or direct messages

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use super::signed_in_workspace;
use crate::output::member_name;

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Show the message feed
    List,
    /// Send a message; broadcasts unless --to is given
    Send {
        /// Message content
        message: String,
        /// Recipient user id for a direct message
        #[arg(long)]
        to: Option<String>,
    },
}

pub async fn handle(command: ChatCommands) -> Result<()> {
    match command {
        ChatCommands::List => list().await,
        ChatCommands::Send { message, to } => send(message, to).await,
    }
}

async fn list() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.refresh_messages().await?;
    let _ = workspace.refresh_org_users().await;

    let messages = workspace.messages().await;
    if messages.is_empty() {
        println!("{}", "No messages yet".yellow());
        return Ok(());
    }

    let roster = workspace.org_users().await;
    for message in &messages {
        let sender = member_name(Some(&message.sender_id), &roster);
        let audience = match message.recipient_id.as_deref() {
            Some(recipient) => format!(" → {}", member_name(Some(recipient), &roster)),
            None => String::new(),
        };
        println!("{}{}: {}", sender.bold(), audience.dimmed(), message.content);
    }
    Ok(())
}

async fn send(message: String, to: Option<String>) -> Result<()> {
    let workspace = signed_in_workspace().await?;
    workspace.send_message(&message, to).await?;
    if message.trim().is_empty() {
        println!("{}", "Nothing to send".yellow());
    } else {
        println!("{}", "Message sent".green());
    }
    Ok(())
}
