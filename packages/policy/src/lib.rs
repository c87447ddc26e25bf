// ABOUTME: Pure role-based authorization rules computed from the current user and org roster
// ABOUTME: A usability gate for hiding/disabling controls; the backend stays the security boundary

use taskdeck_core::{report_transition_allowed, OrgUser, Report, ReportStatus, Role, User};

/// Juniors the given user may assign work to.
///
/// Owners see every junior in the organization; seniors only the juniors
/// reporting to them; juniors none.
pub fn allowed_assignees<'a>(user: &User, org_users: &'a [OrgUser]) -> Vec<&'a OrgUser> {
    let juniors = org_users.iter().filter(|u| u.role == Role::Junior);
    match user.role {
        Role::Owner => juniors.collect(),
        Role::Senior => juniors
            .filter(|j| j.manager_id.as_deref() == Some(user.id.as_str()))
            .collect(),
        Role::Junior => Vec::new(),
    }
}

/// Owners and seniors create and assign tasks
pub fn can_create_task(user: &User) -> bool {
    matches!(user.role, Role::Owner | Role::Senior)
}

/// Designation creation, employee creation, junior-to-senior assignment and
/// target creation are all owner-only
pub fn can_manage_org_structure(user: &User) -> bool {
    user.role == Role::Owner
}

/// The org-wide task summary is owner-only
pub fn can_view_summary(user: &User) -> bool {
    user.role == Role::Owner
}

/// A report may be requested by an owner or senior, from someone in their
/// allowed-assignee set
pub fn can_request_report(user: &User, responder_id: &str, org_users: &[OrgUser]) -> bool {
    if !matches!(user.role, Role::Owner | Role::Senior) {
        return false;
    }
    allowed_assignees(user, org_users)
        .iter()
        .any(|u| u.id == responder_id)
}

/// Only the responder may submit, and only while the report is REQUESTED
pub fn can_submit_report(user: &User, report: &Report) -> bool {
    report.responder_id == user.id
        && report_transition_allowed(report.status, ReportStatus::Submitted)
}

/// Only the requester may review, and only while the report is SUBMITTED.
/// The grade is any number; no client-side range is imposed.
pub fn can_review_report(user: &User, report: &Report) -> bool {
    report.requester_id == user.id
        && report_transition_allowed(report.status, ReportStatus::Reviewed)
}
