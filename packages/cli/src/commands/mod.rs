// ABOUTME: Command handler modules and the shared workspace constructor

use anyhow::{bail, Result};
use taskdeck_app::Workspace;
use taskdeck_client::{ApiClient, ClientConfig};
use taskdeck_session::SessionStore;

pub mod auth;
pub mod chat;
pub mod designations;
pub mod employees;
pub mod reports;
pub mod summary;
pub mod targets;
pub mod tasks;

/// Build the workspace over the stored session, without requiring one
pub async fn workspace() -> Result<Workspace> {
    let session = SessionStore::new()?;
    session.restore().await?;
    let config = ClientConfig::from_env();
    let client = ApiClient::new(&config, session.clone())?;
    Ok(Workspace::new(client, session))
}

/// Build the workspace and fail early when nobody is logged in
pub async fn signed_in_workspace() -> Result<Workspace> {
    let workspace = workspace().await?;
    if !workspace.is_authenticated().await {
        bail!("Not logged in. Run 'taskdeck login' first.");
    }
    Ok(workspace)
}
