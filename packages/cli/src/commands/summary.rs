// ABOUTME: Organization-wide task summary; owner only

use anyhow::{bail, Result};
use colored::*;
use taskdeck_policy::can_view_summary;

use super::signed_in_workspace;
use crate::output::{member_name, table};

pub async fn show() -> Result<()> {
    let workspace = signed_in_workspace().await?;
    let Some(user) = workspace.user().await else {
        bail!("Stored profile unavailable; log in again.");
    };
    if !can_view_summary(&user) {
        bail!("Only the owner can view the organization summary.");
    }

    workspace.refresh_summary().await?;
    let _ = workspace.refresh_org_users().await;

    let summary = workspace.summary().await;
    println!("{}", "Organization summary".blue().bold());
    println!(
        "Total: {}  Done: {}  Open: {}",
        summary.total.to_string().cyan(),
        summary.done,
        summary.open
    );

    if summary.per_user.is_empty() {
        return Ok(());
    }

    let roster = workspace.org_users().await;
    let mut out = table(vec!["Member", "Done", "Total"]);
    for slice in &summary.per_user {
        let name = match slice.id.as_deref() {
            Some(id) => member_name(Some(id), &roster),
            None => "Unassigned".to_string(),
        };
        out.add_row(vec![name, slice.done.to_string(), slice.total.to_string()]);
    }
    println!("{out}");
    Ok(())
}
